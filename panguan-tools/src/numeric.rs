//! Numerical evaluation.

use crate::{compute_error, parse_expr, parse_var, ToolError};
use panguan_compute::{
    error::kind::NonFinite,
    numerical::{eval, Ctxt},
    primitive::PRECISION,
};
use panguan_error::Error;
use serde::{Deserialize, Serialize};

/// The output of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The value, rounded to the nearest 64-bit float.
    pub float_value: f64,

    /// How the value was computed.
    pub precision_note: String,
}

/// Evaluates the expression to a number.
///
/// Each substitution is a `(name, value)` pair. The value is parsed as an expression and
/// substituted symbolically before evaluation, so values such as `pi/2` or `sqrt(2)` are exact
/// until the final numeric step. Evaluation is done with arbitrary precision floats and rounded at
/// the end; results that are not real or not finite are errors.
pub fn evaluate(expr: &str, substitutions: &[(&str, &str)]) -> Result<Evaluation, ToolError> {
    let mut parsed = parse_expr(expr)?;
    for (name, value) in substitutions {
        let name = parse_var(name)?;
        let value = parse_expr(value)?;
        parsed = parsed.substitute(&name, &value);
    }

    let value = eval(&parsed, &Ctxt::new()).map_err(compute_error("evaluate"))?;
    let float_value = value.to_f64();
    if !float_value.is_finite() {
        return Err(compute_error("evaluate")(Error::spanless(NonFinite {
            expr: parsed.to_string(),
        })));
    }

    Ok(Evaluation {
        float_value,
        precision_note: format!("evaluated with {}-bit floats", PRECISION),
    })
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        assert_float_relative_eq,
    };
    use crate::ToolErrorKind;
    use super::*;

    #[test]
    fn constants() {
        let value = evaluate("E", &[]).unwrap();
        assert_float_relative_eq!(value.float_value, std::f64::consts::E);
        assert_eq!(value.precision_note, "evaluated with 512-bit floats");
    }

    #[test]
    fn symbolic_substitution() {
        let value = evaluate("sin(x) + y", &[("x", "pi/2"), ("y", "1/4")]).unwrap();
        assert_float_relative_eq!(value.float_value, 1.25);
    }

    #[test]
    fn free_symbol() {
        let err = evaluate("x + 1", &[]).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Compute);
        assert_eq!(err.message, "`x` has no numeric value");
    }

    #[test]
    fn non_real() {
        assert!(evaluate("sqrt(-1)", &[]).is_err());
        assert!(evaluate("ln(0)", &[]).is_err());
    }

    #[test]
    fn empty_input() {
        let err = evaluate("", &[]).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Parse);
    }
}
