use crate::{
    consts::{E, PI},
    error::{kind, Error},
    primitive::float,
    symbolic::expr::{Constant, Primary, SymExpr},
};
use rug::Float;
use super::Ctxt;

/// Checks that a computed value is a finite real number.
fn check(value: Float, expr: &SymExpr) -> Result<Float, Error> {
    if value.is_nan() {
        Err(Error::spanless(kind::NonReal { expr: expr.to_string() }))
    } else if value.is_infinite() {
        Err(Error::spanless(kind::NonFinite { expr: expr.to_string() }))
    } else {
        Ok(value)
    }
}

/// Evaluates a call to one of the supported functions.
fn eval_call(name: &str, args: &[SymExpr], ctxt: &Ctxt, expr: &SymExpr) -> Result<Float, Error> {
    let [arg] = args else {
        return Err(Error::spanless(kind::WrongArgumentCount {
            name: name.to_owned(),
            expected: 1,
            given: args.len(),
        }));
    };
    let x = eval(arg, ctxt)?;

    let value = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "cot" => x.cot(),
        "sec" => x.sec(),
        "csc" => x.csc(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "abs" => x.abs(),
        "ln" | "log" => {
            if x.is_zero() {
                return Err(Error::spanless(kind::NonFinite { expr: expr.to_string() }));
            }
            x.ln()
        },
        "exp" => x.exp(),
        "sqrt" => x.sqrt(),
        _ => return Err(Error::spanless(kind::UnsupportedFunction { name: name.to_owned() })),
    };

    check(value, expr)
}

/// Evaluates the expression numerically, using the given context for the values of symbols.
///
/// ```
/// use panguan_compute::{numerical::{eval, Ctxt}, primitive::float, symbolic::parse};
///
/// let expr = parse("x^2 + 1").unwrap();
/// let ctxt = Ctxt::new().with_var("x", float(3));
/// assert_eq!(eval(&expr, &ctxt).unwrap().to_f64(), 10.0);
/// ```
pub fn eval(expr: &SymExpr, ctxt: &Ctxt) -> Result<Float, Error> {
    match expr {
        SymExpr::Primary(Primary::Rational(r)) => Ok(float(r)),
        SymExpr::Primary(Primary::Float(f)) => Ok(float(f)),
        SymExpr::Primary(Primary::Symbol(name)) => ctxt.get_var(name)
            .cloned()
            .ok_or_else(|| Error::spanless(kind::UndefinedSymbol { name: name.clone() })),
        SymExpr::Primary(Primary::Constant(constant)) => match constant {
            Constant::Pi => Ok(float(&*PI)),
            Constant::E => Ok(float(&*E)),
            Constant::I => Err(Error::spanless(kind::NonReal { expr: expr.to_string() })),
            Constant::Infinity => Err(Error::spanless(kind::NonFinite { expr: expr.to_string() })),
        },
        SymExpr::Primary(Primary::Call(name, args)) => eval_call(name, args, ctxt, expr),
        SymExpr::Add(terms) => {
            let mut sum = float(0);
            for term in terms {
                sum += eval(term, ctxt)?;
            }
            check(sum, expr)
        },
        SymExpr::Mul(factors) => {
            let mut product = float(1);
            for factor in factors {
                product *= eval(factor, ctxt)?;
            }
            check(product, expr)
        },
        SymExpr::Exp(base, exp) => {
            let exp_value = eval(exp, ctxt)?;
            if base.is_constant(Constant::E) {
                return check(exp_value.exp(), expr);
            }

            let base_value = eval(base, ctxt)?;
            if base_value.is_sign_negative() && !base_value.is_zero() && !exp_value.is_integer() {
                return Err(Error::spanless(kind::NonReal { expr: expr.to_string() }));
            }
            check(base_value.pow(&exp_value), expr)
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use crate::symbolic::parse;
    use super::*;

    fn evaluate(input: &str) -> Result<f64, Error> {
        eval(&parse(input).unwrap(), &Ctxt::default()).map(|f| f.to_f64())
    }

    #[test]
    fn constants() {
        assert_float_absolute_eq!(evaluate("pi").unwrap(), std::f64::consts::PI);
        assert_float_absolute_eq!(evaluate("exp(1)").unwrap(), std::f64::consts::E);
        assert_float_absolute_eq!(evaluate("E^2").unwrap(), std::f64::consts::E.powi(2));
    }

    #[test]
    fn arithmetic() {
        assert_float_absolute_eq!(evaluate("1/3 + 2/3").unwrap(), 1.0);
        assert_float_absolute_eq!(evaluate("sqrt(2)^2").unwrap(), 2.0);
        assert_float_absolute_eq!(evaluate("(-2)^3").unwrap(), -8.0);
    }

    #[test]
    fn symbols_from_context() {
        let ctxt = Ctxt::new().with_var("x", float(2));
        let value = eval(&parse("x*sin(x)").unwrap(), &ctxt).unwrap().to_f64();
        assert_float_absolute_eq!(value, 2.0 * 2f64.sin());
    }

    #[test]
    fn errors() {
        assert!(evaluate("x + 1").is_err());
        assert!(evaluate("sqrt(-1)").is_err());
        assert!(evaluate("1/0").is_err());
        assert!(evaluate("ln(0)").is_err());
        assert!(evaluate("I").is_err());
    }
}
