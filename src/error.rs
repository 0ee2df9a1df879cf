//! Error types for eda_plots.
//!
//! Each module declares its own `thiserror` enum; `EdaError` gathers them for the
//! public operations.

use crate::data::{LoaderError, ProcessorError};
use thiserror::Error;

/// Result type alias for eda_plots operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Errors surfaced by the public plotting operations.
#[derive(Debug, Error)]
pub enum EdaError {
    /// Loading the dataset failed.
    #[error(transparent)]
    Load(#[from] LoaderError),

    /// A column lookup, type check or aggregation failed.
    #[error(transparent)]
    Data(#[from] ProcessorError),

    /// The rendering backend reported a failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid plot configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EdaError {
    /// Create a Render error from anything printable.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }

    /// True when the failure is a lookup of a column that is not in the dataset.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, Self::Data(ProcessorError::ColumnNotFound { .. }))
    }

    /// True when a column had the wrong dtype for the requested operation.
    pub fn is_not_numeric(&self) -> bool {
        matches!(self, Self::Data(ProcessorError::NotNumeric { .. }))
    }
}
