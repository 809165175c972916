//! Platform logging initialization for the ClarityAssist terminal app.
//!
//! The terminal is owned by the UI, so logs go to `./clarity.log` in the
//! current working directory unless disabled in settings.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

pub(crate) const LOG_FILENAME: &str = "clarity.log";

/// Destination for log output.
pub(crate) enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Discard all log output.
    Disabled,
}

pub(crate) fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(level, build_config(), &path) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Disabled => return,
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
