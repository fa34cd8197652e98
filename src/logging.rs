//! Logger setup.
//!
//! The TUI owns the terminal, so in that mode log lines go to a timestamped
//! file. The report subcommand logs to stderr. `RUST_LOG` overrides the levels.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{AppError, EXIT_INPUT};

pub enum LogTarget<'a> {
    /// Write to `<dir>/bikes-<timestamp>.log`.
    File(&'a Path),
    Stderr,
}

/// Install the global logger. Returns the log file path when logging to a file.
pub fn init(target: LogTarget<'_>) -> Result<Option<PathBuf>, AppError> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .filter_module("bike_trends", log::LevelFilter::Info)
        .parse_default_env();

    let path = match target {
        LogTarget::File(dir) => {
            create_dir_all(dir).map_err(|e| {
                AppError::new(EXIT_INPUT, format!("Failed to create log dir '{}': {e}", dir.display()))
            })?;
            let ts = Local::now().format("%Y%m%d-%H%M%S");
            let path = dir.join(format!("bikes-{ts}.log"));
            let file = File::create(&path).map_err(|e| {
                AppError::new(EXIT_INPUT, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            Some(path)
        }
        LogTarget::Stderr => {
            builder.target(env_logger::Target::Stderr);
            None
        }
    };

    // A second init (e.g. in tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(path)
}
