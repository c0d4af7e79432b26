//! Error types for output streams and progress bars.

use tagtint_markup::MarkupError;
use thiserror::Error;

/// Errors raised while writing to or reading from an [`Output`](crate::Output).
#[derive(Debug, Error)]
pub enum OutputError {
    /// The message markup could not be compiled.
    #[error("invalid markup: {0}")]
    Markup(#[from] MarkupError),

    /// The underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream is exhausted.
    #[error("failed to read line: end of input")]
    ReadFailed,
}

/// Errors raised when constructing a [`ProgressBar`](crate::ProgressBar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("max steps must be greater than 0")]
    InvalidMaxSteps,
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
