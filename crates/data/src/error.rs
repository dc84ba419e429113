//! Data layer errors.

use std::path::PathBuf;

use poflow_shared::AppError;
use thiserror::Error;

/// Error types for reading and writing pipeline tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A required column is absent from the header row.
    #[error("{}: missing required column '{column}'", path.display())]
    MissingColumn {
        /// File being read.
        path: PathBuf,
        /// Column name.
        column: &'static str,
    },

    /// A value in a typed (non-raw) file could not be parsed.
    #[error("{}: {source}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// File system error.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns a stable error code for log lines.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::Csv { .. } => "CSV_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::MissingInput(_) => Self::MissingInput(err.to_string()),
            DataError::MissingColumn { .. } | DataError::Csv { .. } => {
                Self::Schema(err.to_string())
            }
            DataError::Io { .. } => Self::Io(err.to_string()),
        }
    }
}
