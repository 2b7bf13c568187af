//! The error returned by every tool adapter.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The category of a [`ToolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// The expression or one of the arguments could not be parsed.
    Parse,

    /// The expression parsed, but the requested operation failed.
    Compute,

    /// The requested unit conversion is not in the conversion table.
    UnsupportedConversion,
}

impl Display for ToolErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse error"),
            Self::Compute => write!(f, "compute error"),
            Self::UnsupportedConversion => write!(f, "unsupported conversion"),
        }
    }
}

/// An error produced by a tool adapter.
///
/// The message is the text of the underlying error, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ToolError {
    /// The category of the error.
    pub kind: ToolErrorKind,

    /// The message of the underlying error.
    pub message: String,
}

impl ToolError {
    /// Creates an error of the given kind.
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Wraps an error that occurred while parsing.
    pub fn parse(err: panguan_error::Error) -> Self {
        Self::new(ToolErrorKind::Parse, err.message())
    }

    /// Wraps an error that occurred while computing.
    pub fn compute(err: panguan_error::Error) -> Self {
        Self::new(ToolErrorKind::Compute, err.message())
    }
}
