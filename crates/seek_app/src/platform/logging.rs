//! Logger setup for the console.
//!
//! The terminal is the UI, so log lines go to `shallowseek.log` unless the
//! config asks for terminal output.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// `log` field of `shallowseek.ron`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    /// Mixed mode: warnings and errors on stderr, the rest on stdout.
    Terminal,
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

pub fn initialize(destination: LogDestination, log_path: &Path) {
    let loggers = build_loggers(destination, log_path, LevelFilter::Info);
    if loggers.is_empty() {
        return;
    }
    // A second initialization keeps the first logger.
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(
    destination: LogDestination,
    log_path: &Path,
    level: LevelFilter,
) -> Vec<Box<dyn SharedLogger>> {
    let config = log_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        match File::create(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            // No logger is running yet to report this.
            Err(err) => eprintln!("Cannot open log file {:?}: {}", log_path, err),
        }
    }
    loggers
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
