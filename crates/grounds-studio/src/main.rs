mod cli;

use std::process::ExitCode;

use clap::Parser;
use grounds_engine::logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();

    let config = match args.verbose {
        0 => LoggingConfig::default(),
        1 => LoggingConfig::with_filter("debug"),
        _ => LoggingConfig::with_filter("trace"),
    };
    init_logging(config);

    match cli::run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
