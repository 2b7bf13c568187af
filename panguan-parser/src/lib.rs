//! Parsing for panguan.
//!
//! The [`tokenizer`] turns raw text into tokens, the [`parser`] builds an abstract syntax tree for
//! a single mathematical expression, and the [`problem`] module recognizes the handful of
//! problem statements the solver understands (integrals, `integrate(...)` and `limit(...)` calls,
//! and equations), handing back the source text of each validated piece.

pub mod parser;
pub mod problem;
pub mod tokenizer;
