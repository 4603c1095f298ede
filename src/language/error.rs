use std::{fmt, path::Path};

use thiserror::Error;

/// A file could not be read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}: {}", self.problem, self.filename.display())
        } else {
            write!(
                f,
                "{}: {}: {}",
                self.problem,
                self.filename.display(),
                self.details
            )
        }
    }
}

impl<'i> std::error::Error for LoadingError<'i> {}

/// A caller or the host broke the contract of an operation. These are
/// integration bugs rather than problems with user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid name '{0}': must contain only letters and digits")]
    InvalidName(String),

    #[error("expected a message followed by pairs of stack lines, but got {0} lines")]
    UnpairedStackLines(usize),

    #[error("value for key {0} is not a string")]
    NotAString(f64),

    #[error("value for key {0} is empty")]
    EmptyValue(f64),

    #[error("key {0} is not a sequence number")]
    InvalidKey(f64),
}
