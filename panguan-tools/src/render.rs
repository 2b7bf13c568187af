//! LaTeX rendering helpers.

use panguan_compute::symbolic::{self, latex::to_latex};

/// Joins LaTeX lines into an `aligned` block, one line per step.
///
/// ```
/// use panguan_tools::render_steps;
///
/// assert_eq!(
///     render_steps(&["x^2 - 1 = 0", "x = \\pm 1"]),
///     "\\begin{aligned}\nx^2 - 1 = 0 \\\\\nx = \\pm 1\n\\end{aligned}",
/// );
/// ```
pub fn render_steps<S: AsRef<str>>(steps: &[S]) -> String {
    let lines = steps.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" \\\\\n");
    format!("\\begin{{aligned}}\n{}\n\\end{{aligned}}", lines)
}

/// Renders an expression as LaTeX. Text that does not parse as an expression is returned as-is.
pub fn pretty(expr: &str) -> String {
    match symbolic::parse(expr) {
        Ok(parsed) => to_latex(&parsed),
        Err(_) => expr.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn expression() {
        assert_eq!(pretty("sin(x)/2"), r"\frac{\sin{\left(x \right)}}{2}");
    }

    #[test]
    fn raw_fallback() {
        assert_eq!(pretty(r"\text{Unable to parse problem}"), r"\text{Unable to parse problem}");
    }

    #[test]
    fn single_step() {
        assert_eq!(render_steps(&["a = b"]), "\\begin{aligned}\na = b\n\\end{aligned}");
    }
}
