//! Symbolic and numerical computation for panguan.
//!
//! The [`symbolic`] module holds the expression type the rest of the workspace computes with,
//! along with simplification, differentiation, integration, equation solving, limits and LaTeX
//! rendering. The [`numerical`] module evaluates expressions to arbitrary precision floats.

pub mod approx;
pub mod consts;
pub mod error;
pub mod numerical;
pub mod primitive;
pub mod symbolic;

pub use error::Error;
pub use symbolic::{parse, SymExpr};
