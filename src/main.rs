use clap::Parser;
use signalback::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
