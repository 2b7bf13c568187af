//! Simplification and equation solving.

use crate::{compute_error, defined, parse_expr, parse_operand, parse_var, ToolError};
use panguan_compute::symbolic::{self, latex::to_latex};
use serde::{Deserialize, Serialize};

/// The output of [`simplify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simplified {
    /// The simplified expression, as LaTeX.
    pub latex: String,

    /// The simplified expression, in the syntax accepted by the parser.
    pub simplified_str: String,
}

/// Simplifies the expression.
///
/// The output is a fixed point: simplifying `simplified_str` again gives back the same string.
/// Expressions that divide by zero are errors.
pub fn simplify(expr: &str) -> Result<Simplified, ToolError> {
    let simplified = defined(symbolic::simplify(&parse_expr(expr)?), "simplify")?;
    Ok(Simplified {
        latex: to_latex(&simplified),
        simplified_str: simplified.to_string(),
    })
}

/// The output of [`solve_equation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solutions {
    /// Each solution, as LaTeX.
    pub solutions_latex: Vec<String>,

    /// Each solution, in the syntax accepted by the parser.
    pub solutions: Vec<String>,
}

/// Solves `expr = 0` for `var`.
///
/// Solutions are listed in the order the solver produces them: real numeric roots in ascending
/// order, followed by roots that depend on other symbols. An equation with no real solutions
/// succeeds with an empty list.
pub fn solve_equation(expr: &str, var: &str) -> Result<Solutions, ToolError> {
    let parsed = parse_operand(expr, "solve")?;
    let var = parse_var(var)?;
    let roots = symbolic::solve(&parsed, &var).map_err(compute_error("solve"))?;
    Ok(Solutions {
        solutions_latex: roots.iter().map(to_latex).collect(),
        solutions: roots.iter().map(ToString::to_string).collect(),
    })
}
