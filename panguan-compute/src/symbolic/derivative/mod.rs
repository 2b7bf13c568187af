//! Symbolic differentiation.
//!
//! The derivative is built directly from the structure of the expression using the sum, product,
//! power and chain rules. Trivial zeros and ones are cleaned up while building, but the result is
//! otherwise unsimplified; pass it through [`simplify`](super::simplify()) before displaying it.

mod function;

use crate::error::Error;
use super::expr::{Constant, Primary, SymExpr};

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up trees
/// and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Rational(_)) => e.is_zero(),
        SymExpr::Primary(Primary::Float(f)) => f.is_zero(),
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => is_trivially_zero(base) && !is_trivially_zero(exp),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Rational(_)) => e.is_one(),
        SymExpr::Primary(Primary::Float(f)) => *f == 1,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => is_trivially_zero(exp) || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::int(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, with)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        // factors that don't depend on the variable contribute nothing when differentiated
        if !product[derivative_index].contains_symbol(with) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, with)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Differentiates `base^exp`.
///
/// - `(f^n)' = n * f^(n - 1) * f'`, when `n` does not depend on the variable
/// - `(a^g)' = a^g * ln(a) * g'`, when `a` does not depend on the variable
/// - `(f^g)' = f^g * (g' * ln(f) + g * f' / f)` otherwise
fn power_rule(base: &SymExpr, exp: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    let base_varies = base.contains_symbol(with);
    let exp_varies = exp.contains_symbol(with);
    let mut mult_group = MultBuilder::default();

    match (base_varies, exp_varies) {
        (false, false) => return Ok(SymExpr::int(0)),
        (true, false) => {
            let exp_minus_one = if exp.is_number() {
                exp.add_number(&SymExpr::int(-1))
            } else {
                exp.clone() + SymExpr::int(-1)
            };
            mult_group.mult(exp.clone());
            mult_group.mult(base.clone().pow(exp_minus_one));
            mult_group.mult(derivative(base, with)?);
        },
        (false, true) => {
            mult_group.mult(base.clone().pow(exp.clone()));
            if !base.is_constant(Constant::E) {
                mult_group.mult(SymExpr::call("ln", vec![base.clone()]));
            }
            mult_group.mult(derivative(exp, with)?);
        },
        (true, true) => {
            let mut inner = SumBuilder::default();

            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exp, with)?);
            log_term.mult(SymExpr::call("ln", vec![base.clone()]));
            inner.add(log_term.into());

            let mut ratio_term = MultBuilder::default();
            ratio_term.mult(exp.clone());
            ratio_term.mult(derivative(base, with)?);
            ratio_term.mult(base.clone().recip());
            inner.add(ratio_term.into());

            mult_group.mult(base.clone().pow(exp.clone()));
            mult_group.mult(inner.into());
        },
    }

    Ok(mult_group.into())
}

/// Computes the derivative of the given expression with respect to the symbol `with`. Returns
/// [`Err`] if the expression contains a function whose derivative is not known.
///
/// ```
/// use panguan_compute::symbolic::{derivative, parse, simplify};
///
/// let expr = parse("x^3 + sin(x)").unwrap();
/// let result = simplify(&derivative(&expr, "x").unwrap());
/// assert_eq!(result.to_string(), "3*x^2 + cos(x)");
/// ```
pub fn derivative(f: &SymExpr, with: &str) -> Result<SymExpr, Error> {
    if is_trivially_zero(f) || !f.contains_symbol(with) {
        return Ok(SymExpr::int(0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Symbol(sym)) => {
            if sym == with {
                SymExpr::int(1)
            } else {
                SymExpr::int(0)
            }
        },
        SymExpr::Primary(Primary::Call(func, args)) => {
            function::function_derivative(func, args, with)?
        },
        SymExpr::Primary(_) => SymExpr::int(0),
        SymExpr::Add(terms) => sum_rule(terms, with)?,
        SymExpr::Mul(factors) => product_rule(factors, with)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, with)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::int(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        numerical::{eval, Ctxt},
        primitive::float,
        symbolic::{parse, simplify},
    };
    use pretty_assertions::assert_eq;
    use super::*;

    /// Boilerplate helper function for evaluating an expression and substituting in "x".
    fn eval_x(e: &SymExpr, x: f64) -> f64 {
        let ctxt = Ctxt::new().with_var("x", float(x));
        eval(e, &ctxt).unwrap().to_f64()
    }

    /// Performs a central finite difference to approximate the derivative of the expression.
    fn finite_difference(e: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 0.00001;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &'static str, points: impl IntoIterator<Item = f64>) {
        const TOL: f64 = 0.0001;

        let expr = parse(function).unwrap();
        let symbolic = derivative(&expr, "x")
            .unwrap_or_else(|_| panic!("derivative of \"{function}\" could not be computed"));

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);

            assert!(
                (symbolically_computed - numerically_computed).abs() < TOL,
                "for \"{function}\" at x={point}, symbolically computed derivative was {symbolically_computed} but numerically computed derivative was {numerically_computed}",
            );
        }
    }

    fn differentiated(input: &str) -> String {
        simplify(&derivative(&parse(input).unwrap(), "x").unwrap()).to_string()
    }

    #[test]
    fn power_rule() {
        test_for_function("x^2 + x + 1", [0., 1., 2., 5., 8.]);
        test_for_function("sqrt(x) + 1/x", [0.5, 1., 2., 5.]);
        test_for_function("(3*x + 1)^5", [-1., 0., 0.5, 1.]);
    }

    #[test]
    fn exponentials() {
        test_for_function("exp(2*x)", [-1., 0., 1.]);
        test_for_function("2^x", [-1., 0., 1., 3.]);
        test_for_function("x^x", [0.5, 1., 2.]);
    }

    #[test]
    fn functions() {
        test_for_function("sin(x)*cos(x)", [0., 0.3, 1., 2.]);
        test_for_function("tan(x) + atan(x)", [0., 0.3, 1.]);
        test_for_function("ln(x^2 + 1)", [-2., 0., 1., 3.]);
        test_for_function("asin(x/2) + acos(x/3)", [-0.5, 0., 0.5]);
        test_for_function("sinh(x) + cosh(x) + tanh(x)", [-1., 0., 1.]);
        test_for_function("sec(x) + csc(x) + cot(x)", [0.4, 1., 1.2]);
    }

    #[test]
    fn partial_derivatives() {
        assert_eq!(simplify(&derivative(&parse("x*y + y^2").unwrap(), "y").unwrap()).to_string(), "x + 2*y");
        assert_eq!(differentiated("y^2"), "0");
    }

    #[test]
    fn simplified_results() {
        assert_eq!(differentiated("x^3"), "3*x^2");
        assert_eq!(differentiated("5*x + 2"), "5");
        assert_eq!(differentiated("sin(x)"), "cos(x)");
    }

    #[test]
    fn unknown_function() {
        let expr = SymExpr::call("gamma", vec![SymExpr::symbol("x")]);
        assert!(derivative(&expr, "x").is_err());
    }
}
