//! Error taxonomy for salescope.
//!
//! Only loader and configuration failures are fatal. Data-quality findings
//! (nulls, referential gaps, negative sales) travel as data in the quality
//! report, and per-row computation gaps (division by zero, missing prior
//! period) are `None` values in the affected row.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SalescopeError {
    /// A malformed required field in an input file. Names the file, the
    /// 1-based line, and the offending column.
    #[error("{}: line {line}, column '{column}': {message}", file.display())]
    Load {
        file: PathBuf,
        line: u64,
        column: String,
        message: String,
    },

    /// An input file could not be opened or read.
    #[error("failed to read {}: {source}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SalescopeError {
    pub fn load(
        file: impl Into<PathBuf>,
        line: u64,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Load {
            file: file.into(),
            line,
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            file: file.into(),
            source,
        }
    }
}
