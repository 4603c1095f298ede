//! Errors reported by the host when invoking PML, and their stack traces

use thiserror::Error;

use crate::language::ArgumentError;

mod error;
mod frame;
mod trace;

pub use error::*;
pub use frame::*;
pub use trace::*;

/// A line of stack information did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unrecognized stack line '{0}'")]
    UnrecognizedLine(String),

    #[error("line number '{0}' out of range")]
    InvalidLineNumber(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StackError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
