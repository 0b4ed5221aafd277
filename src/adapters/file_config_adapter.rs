//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[backtest]
start_date = 2015-01-01
stock_ratio = 60

[strategy]
mode = hybrid
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "start_date"),
            Some("2015-01-01".to_string())
        );
        assert_eq!(adapter.get_string("strategy", "mode"), Some("hybrid".to_string()));
        assert_eq!(adapter.get_double("backtest", "stock_ratio", 0.0), 60.0);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "start_date"), None);
        assert_eq!(adapter.get_int("rsi", "period", 14), 14);
        assert_eq!(adapter.get_double("rsi", "buy_threshold", 25.0), 25.0);
        assert!(adapter.get_bool("backtest", "verbose", true));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nstock_ratio = plenty\n").unwrap();
        assert_eq!(adapter.get_double("backtest", "stock_ratio", 50.0), 50.0);
    }

    #[test]
    fn bool_parsing_variants() {
        let adapter = FileConfigAdapter::from_string(
            "[flags]\na = yes\nb = 0\nc = True\nd = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("flags", "a", false));
        assert!(!adapter.get_bool("flags", "b", true));
        assert!(adapter.get_bool("flags", "c", false));
        assert!(adapter.get_bool("flags", "d", false));
    }

    #[test]
    fn from_file_reads_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[backtest]\nstart_date = 2020-06-01\n").unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("backtest", "start_date"),
            Some("2020-06-01".to_string())
        );
    }
}
