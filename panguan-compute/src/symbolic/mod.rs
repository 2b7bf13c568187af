//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`panguan_parser::parser::ast::Expr`] nodes produced by [`panguan_parser`], with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure. See the
//! [`expr`] module for details.
//!
//! Use [`parse`] to go straight from source text to a [`SymExpr`]:
//!
//! ```
//! use panguan_compute::symbolic::{parse, SymExpr};
//!
//! let expr = parse("x + (y + z)").unwrap();
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Operations
//!
//! - [`simplify()`] reduces an expression to a canonical form of low complexity.
//! - [`derivative()`] differentiates with respect to a symbol.
//! - [`integrate()`] and [`integrate_definite()`] find antiderivatives and definite integrals.
//! - [`solve()`] finds the roots of an expression.
//! - [`limit()`] finds the limit of an expression at a point.
//! - [`latex::to_latex`] renders an expression as LaTeX.
//!
//! ```
//! use panguan_compute::symbolic::{parse, simplify};
//!
//! let simplified = simplify(&parse("x + x + x").unwrap());
//! assert_eq!(simplified.to_string(), "3*x");
//! ```

pub mod derivative;
pub mod expand;
pub mod expr;
pub mod integrate;
pub mod latex;
pub mod limit;
pub mod simplify;
pub mod solve;
pub mod step_collector;

use panguan_parser::parser::{ast::Expr as AstExpr, Parser};
use crate::error::Error;

pub use derivative::derivative;
pub use expand::expand;
pub use expr::{Constant, Primary, SymExpr};
pub use integrate::{integrate, integrate_definite};
pub use limit::limit;
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use solve::solve;
pub use step_collector::StepCollector;

/// Parses the source text into a [`SymExpr`].
///
/// The whole input must be a single expression. Parse errors and conversion errors (such as a
/// function called with the wrong number of arguments) are returned with their spans.
pub fn parse(source: &str) -> Result<SymExpr, Error> {
    let mut parser = Parser::new(source);
    let ast = parser.try_parse_full::<AstExpr>()?;
    SymExpr::try_from(&ast)
}

/// Parses the source text as a variable name. Valid names are single symbols that are not
/// constants.
pub fn parse_variable(source: &str) -> Result<String, Error> {
    let invalid = || Error::spanless(crate::error::kind::InvalidVariable { name: source.trim().to_owned() });
    match parse(source) {
        Ok(SymExpr::Primary(Primary::Symbol(name))) => Ok(name),
        _ => Err(invalid()),
    }
}

/// Returns an error if the expression divides by zero anywhere. Simplification keeps forms like
/// `1/0` and `0/0` intact, so this is how callers find out that a result is undefined.
///
/// ```
/// use panguan_compute::symbolic::{ensure_defined, parse, simplify};
///
/// assert!(ensure_defined(&simplify(&parse("0/0").unwrap())).is_err());
/// assert!(ensure_defined(&simplify(&parse("x/2").unwrap())).is_ok());
/// ```
pub fn ensure_defined(expr: &SymExpr) -> Result<(), Error> {
    if expr.divides_by_zero() {
        return Err(Error::spanless(crate::error::kind::DivisionByZero { expr: expr.to_string() }));
    }
    Ok(())
}
