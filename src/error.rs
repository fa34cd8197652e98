//! Error types.
//!
//! `AppError` is what the binary reports: a message plus the process exit code.
//! `DataError` describes structural problems with the source dataset (load or
//! enrichment) and converts into an `AppError`.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for configuration, input and load failures.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for rows whose date cannot be parsed.
pub const EXIT_ENRICH: u8 = 3;
/// Exit code for terminal/UI failures.
pub const EXIT_TERMINAL: u8 = 4;

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

/// Fatal dataset problems. None of these are recovered from: the session aborts.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to open CSV '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required column: `{0}`")]
    MissingColumn(&'static str),

    #[error("CSV parse error on line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Line {line}: invalid `{column}` value '{value}'")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset contains no rows")]
    Empty,

    #[error("Row {row}: invalid date '{value}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, DD-MM-YYYY.")]
    InvalidDate { row: usize, value: String },
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let exit_code = match err {
            DataError::InvalidDate { .. } => EXIT_ENRICH,
            _ => EXIT_INPUT,
        };
        AppError::new(exit_code, err.to_string())
    }
}
