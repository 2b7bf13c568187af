//! Differentiation, integration and limits.

use crate::{compute_error, defined, parse_expr, parse_operand, parse_var, ToolError};
use panguan_compute::symbolic::{self, latex::to_latex};
use serde::{Deserialize, Serialize};

/// The note attached to indefinite integrals.
pub const CONSTANT_OF_INTEGRATION: &str = "+C";

/// The output of [`differentiate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivative {
    /// The derivative, as LaTeX.
    pub latex: String,

    /// The derivative, in the syntax accepted by the parser.
    pub derivative_str: String,
}

/// Differentiates the expression with respect to `var`, simplifying the result.
pub fn differentiate(expr: &str, var: &str) -> Result<Derivative, ToolError> {
    let parsed = parse_operand(expr, "differentiate")?;
    let var = parse_var(var)?;
    let derivative = symbolic::derivative(&parsed, &var)
        .map(|derivative| symbolic::simplify(&derivative))
        .map_err(compute_error("differentiate"))?;
    let derivative = defined(derivative, "differentiate")?;
    Ok(Derivative {
        latex: to_latex(&derivative),
        derivative_str: derivative.to_string(),
    })
}

/// The output of [`integrate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integral {
    /// The result, as LaTeX. Indefinite integrals do not include the constant of integration.
    pub latex: String,

    /// The result, in the syntax accepted by the parser.
    pub result_str: String,

    /// [`CONSTANT_OF_INTEGRATION`] for indefinite integrals, and empty for definite integrals.
    pub constant_note: String,
}

/// Integrates the expression.
///
/// If `limits` is given as `(limit_var, a, b)`, the definite integral over `[a, b]` is taken with
/// respect to `limit_var`, and `var` is only checked to be a valid variable. The bounds are parsed
/// as expressions, so `oo`, `-∞` and `pi` are all valid bounds. Otherwise, the indefinite
/// integral with respect to `var` is taken.
pub fn integrate(
    expr: &str,
    var: &str,
    limits: Option<(&str, &str, &str)>,
) -> Result<Integral, ToolError> {
    let parsed = parse_operand(expr, "integrate")?;
    let var = parse_var(var)?;

    match limits {
        Some((limit_var, lower, upper)) => {
            let limit_var = parse_var(limit_var)?;
            let lower = parse_expr(lower)?;
            let upper = parse_expr(upper)?;
            let result = symbolic::integrate_definite(&parsed, &limit_var, &lower, &upper)
                .map_err(compute_error("integrate"))?;
            let result = defined(result, "integrate")?;
            Ok(Integral {
                latex: to_latex(&result),
                result_str: result.to_string(),
                constant_note: String::new(),
            })
        },
        None => {
            let result = symbolic::integrate(&parsed, &var).map_err(compute_error("integrate"))?;
            let result = defined(result, "integrate")?;
            Ok(Integral {
                latex: to_latex(&result),
                result_str: result.to_string(),
                constant_note: CONSTANT_OF_INTEGRATION.to_owned(),
            })
        },
    }
}

/// The output of [`limit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    /// The limit, as LaTeX.
    pub latex: String,

    /// The limit, in the syntax accepted by the parser.
    pub result_str: String,
}

/// Takes the limit of the expression as `var` approaches `point`.
///
/// Finite points are approached from the right. Use `oo` or `-oo` for limits at infinity.
pub fn limit(expr: &str, var: &str, point: &str) -> Result<Limit, ToolError> {
    let parsed = parse_operand(expr, "limit")?;
    let var = parse_var(var)?;
    let point = parse_expr(point)?;
    let result = symbolic::limit(&parsed, &var, &point).map_err(compute_error("limit"))?;
    let result = defined(result, "limit")?;
    Ok(Limit {
        latex: to_latex(&result),
        result_str: result.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::{evaluate, ToolErrorKind};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn derivative_of_product() {
        let derivative = differentiate("x^2*sin(x)", "x").unwrap();
        let value = evaluate(&derivative.derivative_str, &[("x", "3/2")]).unwrap().float_value;
        let expected = 3.0 * 1.5f64.sin() + 2.25 * 1.5f64.cos();
        assert!((value - expected).abs() < 1e-12, "{} != {}", value, expected);
    }

    #[test]
    fn derivative_with_respect_to_other_symbol() {
        let derivative = differentiate("x*y^2", "y").unwrap();
        assert_eq!(derivative.derivative_str, "2*x*y");
    }

    #[test]
    fn definite_integral() {
        let integral = integrate("x**2", "x", Some(("x", "0", "1"))).unwrap();
        assert_eq!(integral, Integral {
            latex: r"\frac{1}{3}".to_owned(),
            result_str: "1/3".to_owned(),
            constant_note: String::new(),
        });
    }

    #[test]
    fn improper_integral() {
        let integral = integrate("exp(-x)", "x", Some(("x", "0", "∞"))).unwrap();
        assert_eq!(integral.result_str, "1");
    }

    #[test]
    fn indefinite_integral() {
        let integral = integrate("x^2", "x", None).unwrap();
        assert_eq!(integral.result_str, "x^3/3");
        assert_eq!(integral.latex, r"\frac{x^{3}}{3}");
        assert_eq!(integral.constant_note, "+C");
    }

    #[test]
    fn integral_without_closed_form() {
        let err = integrate("exp(x^2)", "x", None).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Compute);
        assert!(err.message.contains("antiderivative"));
    }

    #[test]
    fn malformed_bound() {
        let err = integrate("x", "x", Some(("x", "(0", "1"))).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Parse);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn compound_interest() {
        let limit = limit("(1+1/n)**n", "n", "oo").unwrap();
        assert_eq!(limit.result_str, "E");
        assert_eq!(limit.latex, "e");
    }

    #[test]
    fn removable_singularity() {
        assert_eq!(limit("sin(x)/x", "x", "0").unwrap().result_str, "1");
    }
}
