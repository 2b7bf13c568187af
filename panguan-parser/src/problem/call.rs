use crate::{
    parser::{error::{kind, Error}, token::Name, Parser},
    problem::{parse_args, whole, Arg},
};

/// The limits of a definite integral: the variable of integration and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// The variable the bounds apply to.
    pub var: String,

    /// The lower bound.
    pub lower: String,

    /// The upper bound.
    pub upper: String,
}

/// An explicit integration call, in one of the forms:
///
/// - `integrate(expr, var)`
/// - `integrate(expr, var, (var, a, b))`
/// - `integrate(expr, var, a, b)`
///
/// Arguments may be quoted (`"x**2"`) or written inline (`x**2`).
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrateCall {
    /// The integrand.
    pub expr: String,

    /// The variable of integration.
    pub var: String,

    /// The limits of integration, if the integral is definite.
    pub limits: Option<Limits>,
}

impl IntegrateCall {
    /// Parses an integration call that spans the entire source.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut input = Parser::new(source);
        let args = parse_call(&mut input, source, "integrate")?;

        let given = args.len();
        let mut args = args.into_iter();
        let (Some(expr), Some(var)) = (args.next(), args.next()) else {
            return Err(wrong_count("integrate", "2, 3 or 4", given, source));
        };
        let (expr, var) = (expr.into_text()?, var.into_text()?);

        let limits = match (args.next(), args.next(), args.next()) {
            (None, None, None) => None,
            (Some(Arg::Tuple(values, span)), None, None) => {
                let [lim_var, lower, upper]: [Arg; 3] = values.try_into()
                    .map_err(|values: Vec<Arg>| Error::new(vec![span], kind::WrongArgumentCount {
                        name: "limits".to_owned(),
                        expected: "3",
                        given: values.len(),
                    }))?;
                Some(Limits {
                    var: lim_var.into_text()?,
                    lower: lower.into_text()?,
                    upper: upper.into_text()?,
                })
            },
            (Some(lower), Some(upper), None) => Some(Limits {
                var: var.clone(),
                lower: lower.into_text()?,
                upper: upper.into_text()?,
            }),
            _ => return Err(wrong_count("integrate", "2, 3 or 4", given, source)),
        };

        Ok(Self { expr, var, limits })
    }
}

/// A limit call, `limit(expr, var, point)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitCall {
    /// The expression to take the limit of.
    pub expr: String,

    /// The variable that approaches the point.
    pub var: String,

    /// The point the variable approaches, such as `0` or `oo`.
    pub point: String,
}

impl LimitCall {
    /// Parses a limit call that spans the entire source.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut input = Parser::new(source);
        let args = parse_call(&mut input, source, "limit")?;
        let given = args.len();
        let [expr, var, point]: [Arg; 3] = args.try_into()
            .map_err(|_| wrong_count("limit", "3", given, source))?;

        Ok(Self {
            expr: expr.into_text()?,
            var: var.into_text()?,
            point: point.into_text()?,
        })
    }
}

/// Parses `name(args...)` covering the whole source. The function name is matched without regard
/// to case.
fn parse_call(input: &mut Parser, source: &str, name: &'static str) -> Result<Vec<Arg>, Error> {
    let found = input.try_parse::<Name>()?;
    if !found.lexeme.eq_ignore_ascii_case(name) {
        return Err(Error::new(vec![found.span], kind::ExpectedProblem {
            expected: if name == "limit" { "a `limit` call" } else { "an `integrate` call" },
        }));
    }

    let (args, _) = parse_args(input, source)?;
    if let Some(token) = input.current_token() {
        return Err(Error::new(vec![token.span.clone()], kind::ExpectedEof));
    }
    Ok(args)
}

fn wrong_count(name: &str, expected: &'static str, given: usize, source: &str) -> Error {
    Error::new(vec![whole(source)], kind::WrongArgumentCount {
        name: name.to_owned(),
        expected,
        given,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn quoted_definite_integral() {
        let call = IntegrateCall::parse(r#"integrate("x**2", "x", ("x", 0, 1))"#).unwrap();
        assert_eq!(call, IntegrateCall {
            expr: "x**2".to_owned(),
            var: "x".to_owned(),
            limits: Some(Limits {
                var: "x".to_owned(),
                lower: "0".to_owned(),
                upper: "1".to_owned(),
            }),
        });
    }

    #[test]
    fn bare_indefinite_integral() {
        let call = IntegrateCall::parse("integrate(x*sin(x), x)").unwrap();
        assert_eq!(call, IntegrateCall {
            expr: "x*sin(x)".to_owned(),
            var: "x".to_owned(),
            limits: None,
        });
    }

    #[test]
    fn flat_bounds() {
        let call = IntegrateCall::parse("Integrate(exp(-x), x, 0, oo)").unwrap();
        assert_eq!(call.limits, Some(Limits {
            var: "x".to_owned(),
            lower: "0".to_owned(),
            upper: "oo".to_owned(),
        }));
    }

    #[test]
    fn parenthesized_integrand_is_not_a_tuple() {
        let call = IntegrateCall::parse("integrate((x + 1)^2, x)").unwrap();
        assert_eq!(call.expr, "(x + 1)^2");
    }

    #[test]
    fn too_many_arguments() {
        let err = IntegrateCall::parse("integrate(x, x, 0, 1, 2)").unwrap_err();
        assert_eq!(err.message(), "`integrate` takes 2, 3 or 4 argument(s), but 5 were given");
    }

    #[test]
    fn unclosed_call() {
        let err = IntegrateCall::parse("integrate(x, x").unwrap_err();
        assert_eq!(err.message(), "unclosed parenthesis");
    }

    #[test]
    fn limit_call() {
        let call = LimitCall::parse("limit((1+1/n)**n, n, oo)").unwrap();
        assert_eq!(call, LimitCall {
            expr: "(1+1/n)**n".to_owned(),
            var: "n".to_owned(),
            point: "oo".to_owned(),
        });
    }

    #[test]
    fn limit_wrong_name() {
        assert!(LimitCall::parse("lim(x, x, 0)").is_err());
    }

    #[test]
    fn limit_trailing_text() {
        let err = LimitCall::parse("limit(x, x, 0) please").unwrap_err();
        assert_eq!(err.message(), "expected end of file");
    }
}
