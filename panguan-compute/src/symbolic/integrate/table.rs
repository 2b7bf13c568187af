//! Antiderivatives of basic forms.
//!
//! Every form accepts a linear argument `u = a*x + b`, dividing the result by the slope `a`.

use crate::symbolic::{
    derivative::derivative,
    expr::{Constant, Primary, SymExpr},
    simplify::simplify,
};

/// If `u` is linear in `var`, returns its slope.
pub(super) fn linear_slope(u: &SymExpr, var: &str) -> Option<SymExpr> {
    let slope = simplify(&derivative(u, var).ok()?);
    if slope.is_zero() || slope.contains_symbol(var) {
        None
    } else {
        Some(slope)
    }
}

fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// Returns `1 + x^2`.
fn one_plus_square(var: &str) -> SymExpr {
    SymExpr::int(1) + SymExpr::symbol(var).pow(SymExpr::int(2))
}

/// Returns `1 - x^2`.
fn one_minus_square(var: &str) -> SymExpr {
    SymExpr::int(1) - SymExpr::symbol(var).pow(SymExpr::int(2))
}

/// Antiderivatives of powers.
///
/// - `∫ u^n dx = u^(n + 1) / ((n + 1)*a)`
/// - `∫ u^-1 dx = ln(u) / a`
/// - `∫ c^u dx = c^u / (a*ln(c))`
/// - `∫ cos(u)^-2 dx = tan(u) / a`
/// - `∫ sin(u)^-2 dx = -cot(u) / a`
/// - `∫ (1 + x^2)^-1 dx = atan(x)`
/// - `∫ (1 - x^2)^(-1/2) dx = asin(x)`
fn power(base: &SymExpr, exp: &SymExpr, var: &str) -> Option<SymExpr> {
    match (base.contains_symbol(var), exp.contains_symbol(var)) {
        (true, false) => {
            if *exp == SymExpr::int(-1) && *base == one_plus_square(var) {
                return Some(call("atan", &SymExpr::symbol(var)));
            }
            if *exp == SymExpr::frac(-1, 2) && *base == one_minus_square(var) {
                return Some(call("asin", &SymExpr::symbol(var)));
            }

            if *exp == SymExpr::int(-2) {
                if let Some(u) = base.as_call1("cos") {
                    let a = linear_slope(u, var)?;
                    return Some(call("tan", u) / a);
                }
                if let Some(u) = base.as_call1("sin") {
                    let a = linear_slope(u, var)?;
                    return Some(-call("cot", u) / a);
                }
            }

            let a = linear_slope(base, var)?;
            if *exp == SymExpr::int(-1) {
                return Some(call("ln", base) / a);
            }

            let exp_plus_one = if exp.is_number() {
                exp.add_number(&SymExpr::int(1))
            } else {
                exp.clone() + SymExpr::int(1)
            };
            let denominator = if a.is_number() && exp_plus_one.is_number() {
                exp_plus_one.mul_number(&a)
            } else {
                exp_plus_one.clone() * a
            };
            Some(base.clone().pow(exp_plus_one) / denominator)
        },
        (false, true) => {
            let a = linear_slope(exp, var)?;
            let result = base.clone().pow(exp.clone());
            if base.is_constant(Constant::E) {
                Some(result / a)
            } else {
                Some(result / (a * call("ln", base)))
            }
        },
        _ => None,
    }
}

/// Antiderivatives of functions of a linear argument.
fn function(name: &str, u: &SymExpr, var: &str) -> Option<SymExpr> {
    let a = linear_slope(u, var)?;
    let result = match name {
        "sin" => -call("cos", u),
        "cos" => call("sin", u),
        "tan" => -call("ln", &call("cos", u)),
        "cot" => call("ln", &call("sin", u)),
        "sec" => call("ln", &(call("sec", u) + call("tan", u))),
        "csc" => -call("ln", &(call("csc", u) + call("cot", u))),
        "sinh" => call("cosh", u),
        "cosh" => call("sinh", u),
        "tanh" => call("ln", &call("cosh", u)),
        "ln" => u.clone() * call("ln", u) - u.clone(),
        "atan" => u.clone() * call("atan", u)
            - call("ln", &(SymExpr::int(1) + u.clone().pow(SymExpr::int(2)))) / SymExpr::int(2),
        "asin" => u.clone() * call("asin", u)
            + (SymExpr::int(1) - u.clone().pow(SymExpr::int(2))).sqrt(),
        "acos" => u.clone() * call("acos", u)
            - (SymExpr::int(1) - u.clone().pow(SymExpr::int(2))).sqrt(),
        _ => return None,
    };
    Some(result / a)
}

/// Looks up the antiderivative of a single power, function call or symbol.
pub(super) fn basic(expr: &SymExpr, var: &str) -> Option<SymExpr> {
    match expr {
        SymExpr::Primary(Primary::Symbol(sym)) if sym == var => {
            Some(expr.clone().pow(SymExpr::int(2)) / SymExpr::int(2))
        },
        SymExpr::Primary(Primary::Call(name, args)) => match args.as_slice() {
            [u] => function(name, u, var),
            _ => None,
        },
        SymExpr::Exp(base, exp) => power(base, exp, var),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn looked_up(input: &str) -> String {
        simplify(&basic(&simplify(&parse(input).unwrap()), "x").unwrap()).to_string()
    }

    #[test]
    fn powers() {
        assert_eq!(looked_up("x"), "x^2/2");
        assert_eq!(looked_up("x^3"), "x^4/4");
        assert_eq!(looked_up("1/x"), "ln(x)");
    }

    #[test]
    fn inverse_trigonometric_forms() {
        assert_eq!(looked_up("1/(x^2 + 1)"), "atan(x)");
        assert_eq!(looked_up("1/sqrt(1 - x^2)"), "asin(x)");
    }

    #[test]
    fn functions() {
        assert_eq!(looked_up("cos(x)"), "sin(x)");
        assert_eq!(looked_up("sin(x)"), "-cos(x)");
        assert_eq!(looked_up("exp(x)"), "exp(x)");
    }

    #[test]
    fn linear_slope_rejects_nonlinear() {
        assert!(linear_slope(&parse("x^2").unwrap(), "x").is_none());
        assert_eq!(linear_slope(&parse("3*x + 1").unwrap(), "x"), Some(SymExpr::int(3)));
    }
}
