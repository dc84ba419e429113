//! Pipeline-level error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Pipeline error types.
///
/// These abort a run. Per-line engine failures never become an `AppError`;
/// they are isolated and reported by the batch instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input file is missing.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An input table does not match its expected shape.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Output rows violate a business-rule contract.
    #[error("Contract violation: {0}")]
    Contract(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingInput(_) => 2,
            Self::Config(_) => 3,
            Self::Schema(_) => 4,
            Self::Contract(_) => 5,
            Self::Io(_) | Self::Internal(_) => 1,
        }
    }

    /// Returns a stable error code for log lines.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Schema(_) => "SCHEMA_ERROR",
            Self::Contract(_) => "CONTRACT_VIOLATION",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
