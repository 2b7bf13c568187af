//! Symbolic integration.
//!
//! [`integrate`] searches for an antiderivative by trying a sequence of strategies, in order:
//!
//! 1. linearity: sums are integrated term by term, and factors that do not depend on the variable
//!    are pulled out of products;
//! 2. a [table](table) of basic forms, including the power rule and functions of a linear
//!    argument, such as `sin(3*x + 1)`;
//! 3. expanding products and integer powers of sums, then integrating term by term;
//! 4. [substitution](substitution), where some subexpression `u` and its derivative `du` both
//!    appear in the integrand;
//! 5. [integration by parts](parts), for products of a polynomial or logarithm with another
//!    integrable factor.
//!
//! The constant of integration is never included in the result.

mod parts;
mod substitution;
mod table;

use crate::{
    error::{kind, Error},
    numerical::{eval, Ctxt},
};
use super::{
    expand::expand,
    expr::{Constant, SymExpr},
    limit::limit,
    simplify::simplify,
    solve::{denominators, solve},
};
use tracing::debug;

/// How many strategies may be nested inside each other before the search gives up.
const MAX_DEPTH: usize = 6;

/// Finds an antiderivative of `expr` with respect to `var`, without simplifying it. Returns
/// [`None`] if no strategy applies.
fn antiderivative(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH {
        return None;
    }

    if !expr.contains_symbol(var) {
        return Some(expr.clone() * SymExpr::symbol(var));
    }

    match expr {
        SymExpr::Add(terms) => {
            return terms.iter()
                .map(|term| antiderivative(term, var, depth))
                .collect::<Option<Vec<_>>>()
                .map(|terms| SymExpr::Add(terms).downgrade());
        },
        SymExpr::Mul(factors) => {
            let (constant, varying): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| !factor.contains_symbol(var));
            if !constant.is_empty() {
                let inner = antiderivative(&SymExpr::Mul(varying).downgrade(), var, depth)?;
                return Some(SymExpr::Mul(constant) * inner);
            }
        },
        _ => {},
    }

    table::basic(expr, var)
        .or_else(|| by_expansion(expr, var, depth))
        .or_else(|| substitution::by_substitution(expr, var, depth))
        .or_else(|| parts::by_parts(expr, var, depth))
}

/// `∫ (x + 1)*(x - 1) dx = ∫ x^2 dx - ∫ 1 dx`
fn by_expansion(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let SymExpr::Add(terms) = expand(expr) else {
        return None;
    };

    let terms = terms.iter()
        .map(|term| antiderivative(&simplify(term), var, depth + 1))
        .collect::<Option<Vec<_>>>()?;
    Some(SymExpr::Add(terms).downgrade())
}

/// Finds the antiderivative of `expr` with respect to the symbol `var`. The result is simplified
/// and does not include a constant of integration.
///
/// ```
/// use panguan_compute::symbolic::{integrate, parse};
///
/// let expr = parse("x^2").unwrap();
/// assert_eq!(integrate(&expr, "x").unwrap().to_string(), "x^3/3");
/// ```
pub fn integrate(expr: &SymExpr, var: &str) -> Result<SymExpr, Error> {
    let integrand = simplify(expr);
    match antiderivative(&integrand, var, 0) {
        Some(result) => Ok(simplify(&result)),
        None => {
            debug!(integrand = %integrand, var, "no antiderivative found");
            Err(Error::spanless(kind::NoClosedForm {
                integrand: integrand.to_string(),
                var: var.to_owned(),
            }))
        },
    }
}

/// Evaluates an antiderivative at one bound of a definite integral.
///
/// Infinite bounds, and finite bounds where the antiderivative cannot be evaluated directly
/// (such as `x*ln(x)` at `0`), are handled by taking a limit.
fn evaluate_at(antiderivative: &SymExpr, var: &str, point: &SymExpr) -> Result<SymExpr, Error> {
    if point.contains(&SymExpr::constant(Constant::Infinity)) {
        return limit(antiderivative, var, point);
    }

    let value = simplify(&antiderivative.substitute(var, point));
    if value.free_symbols().is_empty()
        && !value.contains_imaginary()
        && eval(&value, &Ctxt::default()).is_err()
    {
        return limit(antiderivative, var, point);
    }
    Ok(value)
}

/// Returns the value of a bound, including the infinite bounds `oo` and `-oo`.
fn numeric_bound(point: &SymExpr) -> Option<f64> {
    let infinity = SymExpr::constant(Constant::Infinity);
    if *point == infinity {
        return Some(f64::INFINITY);
    }
    if point.negated_if_negative().as_ref() == Some(&infinity) {
        return Some(f64::NEG_INFINITY);
    }
    eval(point, &Ctxt::default()).ok().map(|value| value.to_f64())
}

/// Finds a point strictly between the bounds where a denominator of the integrand vanishes.
///
/// Bounds that are not numeric are not checked.
fn interior_singularity(
    integrand: &SymExpr,
    var: &str,
    lower: &SymExpr,
    upper: &SymExpr,
) -> Option<SymExpr> {
    let (a, b) = (numeric_bound(lower)?, numeric_bound(upper)?);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    denominators(integrand, var)
        .iter()
        .filter_map(|denominator| solve(denominator, var).ok())
        .flatten()
        .find(|root| {
            eval(root, &Ctxt::default())
                .map(|value| {
                    let value = value.to_f64();
                    low < value && value < high
                })
                .unwrap_or(false)
        })
}

/// Computes the definite integral of `expr` with respect to `var` over `[lower, upper]`, as
/// `F(upper) - F(lower)` for an antiderivative `F`.
///
/// The fundamental theorem of calculus does not apply across a singularity, so an integrand
/// whose denominator vanishes strictly inside the interval, such as `1/x^2` over `[-1, 1]`, is
/// an error.
///
/// ```
/// use panguan_compute::symbolic::{integrate_definite, parse, SymExpr};
///
/// let expr = parse("x^2").unwrap();
/// let result = integrate_definite(&expr, "x", &SymExpr::int(0), &SymExpr::int(1)).unwrap();
/// assert_eq!(result.to_string(), "1/3");
/// ```
pub fn integrate_definite(
    expr: &SymExpr,
    var: &str,
    lower: &SymExpr,
    upper: &SymExpr,
) -> Result<SymExpr, Error> {
    let integrand = simplify(expr);
    if let Some(point) = interior_singularity(&integrand, var, &simplify(lower), &simplify(upper)) {
        debug!(integrand = %integrand, var, point = %point, "singularity inside the interval");
        return Err(Error::spanless(kind::SingularIntegrand {
            integrand: integrand.to_string(),
            var: var.to_owned(),
            point: point.to_string(),
        }));
    }

    let antiderivative = integrate(&integrand, var)?;
    let upper_value = evaluate_at(&antiderivative, var, upper)?;
    let lower_value = evaluate_at(&antiderivative, var, lower)?;
    Ok(simplify(&(upper_value - lower_value)))
}

#[cfg(test)]
mod tests {
    use crate::{primitive::float, symbolic::{derivative, parse}};
    use pretty_assertions::assert_eq;
    use super::*;

    fn integrated(input: &str) -> String {
        integrate(&parse(input).unwrap(), "x").unwrap().to_string()
    }

    fn definite(input: &str, lower: &str, upper: &str) -> String {
        integrate_definite(
            &parse(input).unwrap(),
            "x",
            &parse(lower).unwrap(),
            &parse(upper).unwrap(),
        ).unwrap().to_string()
    }

    /// Checks that differentiating the antiderivative recovers the integrand at a few points.
    fn check_by_differentiation(input: &str, points: impl IntoIterator<Item = f64>) {
        let integrand = parse(input).unwrap();
        let antiderivative = integrate(&integrand, "x")
            .unwrap_or_else(|_| panic!("no antiderivative found for \"{input}\""));
        let recovered = derivative(&antiderivative, "x").unwrap();

        for point in points {
            let ctxt = Ctxt::new().with_var("x", float(point));
            let expected = eval(&integrand, &ctxt).unwrap().to_f64();
            let actual = eval(&recovered, &ctxt).unwrap().to_f64();
            assert!(
                (expected - actual).abs() < 1e-9,
                "d/dx of {antiderivative} at x={point} was {actual}, expected {expected}",
            );
        }
    }

    #[test]
    fn power_rule() {
        assert_eq!(integrated("x^2"), "x^3/3");
        assert_eq!(integrated("3"), "3*x");
        assert_eq!(integrated("1/x"), "ln(x)");
    }

    #[test]
    fn linearity() {
        check_by_differentiation("3*x^2 - 4*x + 7", [-1., 0., 2.]);
        check_by_differentiation("sqrt(x) + 2/x^2", [0.5, 1., 4.]);
    }

    #[test]
    fn linear_arguments() {
        check_by_differentiation("sin(2*x + 1)", [0., 1., 2.]);
        check_by_differentiation("exp(-3*x)", [0., 1.]);
        check_by_differentiation("(2*x + 1)^4", [0., 1.]);
        check_by_differentiation("1/(3*x + 2)", [0., 1.]);
        check_by_differentiation("2^x", [0., 1., 3.]);
    }

    #[test]
    fn expansion() {
        check_by_differentiation("(x + 1)*(x - 1)", [0., 1., 2.]);
        check_by_differentiation("x*(x + 2)^2", [0., 1., 2.]);
    }

    #[test]
    fn substitution() {
        check_by_differentiation("2*x*cos(x^2)", [0., 0.5, 1.]);
        check_by_differentiation("x*exp(x^2)", [0., 0.5, 1.]);
        check_by_differentiation("sin(x)*cos(x)", [0., 0.5, 1.]);
        check_by_differentiation("ln(x)/x", [0.5, 1., 2.]);
    }

    #[test]
    fn by_parts() {
        check_by_differentiation("x*exp(x)", [0., 1., 2.]);
        check_by_differentiation("x^2*sin(x)", [0., 1., 2.]);
        check_by_differentiation("x*ln(x)", [0.5, 1., 2.]);
        check_by_differentiation("ln(x)", [0.5, 1., 2.]);
    }

    #[test]
    fn definite_integrals() {
        assert_eq!(definite("x^2", "0", "1"), "1/3");
        assert_eq!(definite("sin(x)", "0", "pi"), "2");
        assert_eq!(definite("2*x + 1", "1", "3"), "10");
        assert_eq!(definite("exp(-x)", "0", "oo"), "1");
    }

    #[test]
    fn singularity_inside_interval() {
        for (input, lower, upper) in [("x^-2", "-1", "1"), ("1/x", "-2", "3"), ("1/(x - 1)", "3", "0")] {
            let result = integrate_definite(
                &parse(input).unwrap(),
                "x",
                &parse(lower).unwrap(),
                &parse(upper).unwrap(),
            );
            assert!(result.is_err(), "{input} over [{lower}, {upper}] gave {:?}", result.map(|r| r.to_string()));
        }
    }

    #[test]
    fn singularity_outside_interval() {
        assert_eq!(definite("1/x^2", "1", "2"), "1/2");
    }

    #[test]
    fn no_closed_form() {
        assert!(integrate(&parse("exp(x^2)").unwrap(), "x").is_err());
    }
}
