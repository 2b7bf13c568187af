//! Numerical evaluation of symbolic expressions.
//!
//! Expressions are evaluated to [`Float`](rug::Float)s with [`PRECISION`](crate::primitive::PRECISION) bits of
//! precision. Evaluation is real-valued only: anything that would produce a complex number, an
//! infinity or `NaN` is reported as an error instead.

pub mod ctxt;
pub mod eval;

pub use ctxt::Ctxt;
pub use eval::eval;
