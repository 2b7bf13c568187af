//! Symbolic tool adapters for panguan.
//!
//! Each adapter takes plain strings, parses them, runs one operation from [`panguan_compute`] or
//! [`panguan_units`], and returns `Result<Output, ToolError>`. No adapter panics: parse failures
//! become [`ToolErrorKind::Parse`] errors and failed operations become
//! [`ToolErrorKind::Compute`] errors, each carrying the underlying error message unchanged. A
//! result that divides by zero, like that of `1/0`, is a [`ToolErrorKind::Compute`] error too. Use
//! [`Envelope`] to get the serializable `{"status": ...}` form of a result.
//!
//! The tokenizer reads both `^` and `**` as exponentiation, so expressions written in either
//! notation are accepted as-is.
//!
//! ```
//! use panguan_tools::{integrate, solve_equation};
//!
//! let area = integrate("x**2", "x", Some(("x", "0", "1"))).unwrap();
//! assert_eq!(area.result_str, "1/3");
//!
//! let roots = solve_equation("x^2 - 5*x + 6", "x").unwrap();
//! assert_eq!(roots.solutions, ["2", "3"]);
//! ```

pub mod algebra;
pub mod calculus;
pub mod envelope;
pub mod error;
pub mod numeric;
pub mod render;
pub mod units;

pub use algebra::{simplify, solve_equation, Simplified, Solutions};
pub use calculus::{differentiate, integrate, limit, Derivative, Integral, Limit};
pub use envelope::Envelope;
pub use error::{ToolError, ToolErrorKind};
pub use numeric::{evaluate, Evaluation};
pub use render::{pretty, render_steps};
pub use units::{convert, Conversion};

use panguan_compute::symbolic::{self, SymExpr};
use tracing::debug;

/// Parses an expression, logging and wrapping the error on failure.
pub(crate) fn parse_expr(source: &str) -> Result<SymExpr, ToolError> {
    symbolic::parse(source).map_err(|err| {
        debug!(source, error = %err, "failed to parse expression");
        ToolError::parse(err)
    })
}

/// Parses an expression that an operation will work on, rejecting it if it divides by zero
/// once simplified.
pub(crate) fn parse_operand(source: &str, operation: &'static str) -> Result<SymExpr, ToolError> {
    let expr = parse_expr(source)?;
    defined(symbolic::simplify(&expr), operation)?;
    Ok(expr)
}

/// Parses a variable name, logging and wrapping the error on failure.
pub(crate) fn parse_var(source: &str) -> Result<String, ToolError> {
    symbolic::parse_variable(source).map_err(|err| {
        debug!(source, error = %err, "invalid variable");
        ToolError::parse(err)
    })
}

/// Wraps an error from a symbolic operation, logging it first.
pub(crate) fn compute_error(operation: &'static str) -> impl FnOnce(panguan_error::Error) -> ToolError {
    move |err| {
        debug!(operation, error = %err, "symbolic operation failed");
        ToolError::compute(err)
    }
}

/// Rejects a result that divides by zero, such as the `0/0` left behind by simplifying `0/0`.
pub(crate) fn defined(expr: SymExpr, operation: &'static str) -> Result<SymExpr, ToolError> {
    symbolic::ensure_defined(&expr).map_err(compute_error(operation))?;
    Ok(expr)
}
