//! The serializable form of an adapter result.

use crate::error::ToolError;
use serde::{Deserialize, Serialize};

/// The tagged, serializable form of an adapter result.
///
/// Serializes as `{"status": "ok", ...}` with the fields of the output flattened in, or as
/// `{"status": "error", "message": "..."}`.
///
/// ```
/// use panguan_tools::{simplify, Envelope};
///
/// let envelope = Envelope::from(simplify("x + x"));
/// let json = serde_json::to_value(&envelope).unwrap();
/// assert_eq!(json["status"], "ok");
/// assert_eq!(json["simplified_str"], "2*x");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    /// The adapter succeeded.
    Ok(T),

    /// The adapter failed.
    Error {
        /// The message of the underlying error.
        message: String,
    },
}

impl<T> Envelope<T> {
    /// Returns true if this is the [`Envelope::Ok`] shape.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns the status tag, `"ok"` or `"error"`.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Error { .. } => "error",
        }
    }
}

impl<T> From<Result<T, ToolError>> for Envelope<T> {
    fn from(result: Result<T, ToolError>) -> Self {
        match result {
            Ok(output) => Self::Ok(output),
            Err(err) => Self::Error { message: err.message },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{convert, solve_equation};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn ok_fields_are_flattened() {
        let envelope = Envelope::from(solve_equation("x^2 - 4", "x"));
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({
            "status": "ok",
            "solutions_latex": ["-2", "2"],
            "solutions": ["-2", "2"],
        }));
    }

    #[test]
    fn error_shape() {
        let envelope = Envelope::from(convert(1.0, "m", "deg"));
        assert_eq!(envelope.status(), "error");
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({
            "status": "error",
            "message": "cannot convert from `m` to `deg`",
        }));
    }

    #[test]
    fn deserialize_error() {
        let envelope: Envelope<crate::Simplified> = serde_json::from_value(json!({
            "status": "error",
            "message": "unexpected end of file",
        })).unwrap();
        assert!(!envelope.is_ok());
    }
}
