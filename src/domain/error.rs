//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for signalback.
#[derive(Debug, thiserror::Error)]
pub enum SignalbackError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid bar on {date}: {reason}")]
    InvalidBar { date: NaiveDate, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SignalbackError> for std::process::ExitCode {
    fn from(err: &SignalbackError) -> Self {
        let code: u8 = match err {
            SignalbackError::Io(_) => 1,
            SignalbackError::ConfigParse { .. }
            | SignalbackError::ConfigMissing { .. }
            | SignalbackError::ConfigInvalid { .. } => 2,
            SignalbackError::Data { .. } => 3,
            SignalbackError::InvalidBar { .. } => 4,
            SignalbackError::Report { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = SignalbackError::Data {
            reason: "missing close column".into(),
        };
        assert_eq!(err.to_string(), "data error: missing close column");

        let err = SignalbackError::ConfigMissing {
            section: "backtest".into(),
            key: "start_date".into(),
        };
        assert_eq!(err.to_string(), "missing config key [backtest] start_date");
    }

    #[test]
    fn invalid_bar_message_includes_date() {
        let err = SignalbackError::InvalidBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            reason: "non-finite close".into(),
        };
        assert_eq!(err.to_string(), "invalid bar on 2024-03-01: non-finite close");
    }
}
