//! Solving equations of the form `expr = 0`.
//!
//! [`solve`] returns the real roots of an expression. It works by repeatedly reducing the problem
//! into smaller ones:
//!
//! - denominators that depend on the variable are cleared by multiplying through, and roots that
//!   would make a denominator zero are discarded afterwards;
//! - products are split with the zero-product rule;
//! - [polynomials](poly) are solved with the linear and quadratic formulas, rational root search
//!   with deflation, and real roots of binomials `a*x^n + b`;
//! - anything else is [isolated](isolate): when the variable appears in exactly one term, that
//!   term is moved to one side and the outermost function is inverted.

mod isolate;
mod poly;

use crate::{
    error::{kind, Error},
    numerical::{eval, Ctxt},
};
use super::{
    expand::expand,
    expr::{Primary, SymExpr},
    simplify::simplify,
};
use std::cmp::Ordering;
use tracing::debug;

/// How many reductions may be nested before the solver gives up.
const MAX_DEPTH: usize = 8;

/// Two numeric roots closer than this are considered the same root.
const ROOT_TOLERANCE: f64 = 1e-12;

/// Returns the sign of an expression, if it can be evaluated numerically.
fn numeric_sign(expr: &SymExpr) -> Option<Ordering> {
    eval(expr, &Ctxt::default()).ok().and_then(|value| value.cmp0())
}

/// Returns the real values of `base` for which `base^exp = rhs`.
///
/// For even integer powers, both the positive and negative root are returned; odd integer powers
/// have exactly one real root. Roots that are known to be non-real are left out.
fn real_roots_of_power(rhs: &SymExpr, exp: &SymExpr) -> Vec<SymExpr> {
    let sign = numeric_sign(rhs);
    let inverse = SymExpr::int(1) / exp.clone();

    if sign == Some(Ordering::Equal) {
        // 0^n = 0 only for positive n
        return match numeric_sign(exp) {
            Some(Ordering::Greater) => vec![SymExpr::int(0)],
            _ => Vec::new(),
        };
    }

    match exp.as_integer() {
        Some(n) if n.is_even() => {
            if sign == Some(Ordering::Less) {
                Vec::new()
            } else {
                let root = rhs.clone().pow(inverse);
                vec![-root.clone(), root]
            }
        },
        Some(_) => {
            if sign == Some(Ordering::Less) {
                vec![-(-rhs.clone()).pow(inverse)]
            } else {
                vec![rhs.clone().pow(inverse)]
            }
        },
        None => {
            // x^(p/q) is only defined for non-negative x
            if sign == Some(Ordering::Less) {
                Vec::new()
            } else {
                vec![rhs.clone().pow(inverse)]
            }
        },
    }
}

/// Collects the factors of `expr` that are raised to a negative power and depend on `var`,
/// returned with the sign of the exponent flipped.
pub(crate) fn denominators(expr: &SymExpr, var: &str) -> Vec<SymExpr> {
    let terms = match expr {
        SymExpr::Add(terms) => terms.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut denominators = Vec::new();
    for term in terms {
        let factors = match term {
            SymExpr::Mul(factors) => factors.as_slice(),
            other => std::slice::from_ref(other),
        };
        for factor in factors {
            if let SymExpr::Exp(base, exp) = factor {
                if exp.is_negative_number() && base.contains_symbol(var) {
                    let denominator = simplify(&(**base).clone().pow(-(**exp).clone()));
                    if !denominators.contains(&denominator) {
                        denominators.push(denominator);
                    }
                }
            }
        }
    }
    denominators
}

/// Finds the roots of `expr`. Returns [`None`] if the expression could not be solved.
fn roots_of(expr: &SymExpr, var: &str, depth: usize) -> Option<Vec<SymExpr>> {
    if depth > MAX_DEPTH {
        return None;
    }

    let expr = simplify(expr);
    if !expr.contains_symbol(var) {
        // `0 = 0` holds everywhere, which can't be expressed as a list of roots
        return if expr.is_zero() { None } else { Some(Vec::new()) };
    }

    let denominators = denominators(&expr, var);
    if !denominators.is_empty() {
        let cleared = denominators.iter()
            .fold(expr.clone(), |acc, denominator| acc * denominator.clone());
        let roots = roots_of(&expand(&simplify(&cleared)), var, depth + 1)?;
        return Some(roots.into_iter()
            .filter(|root| {
                denominators.iter().all(|denominator| {
                    numeric_sign(&denominator.substitute(var, root)) != Some(Ordering::Equal)
                        && !simplify(&denominator.substitute(var, root)).is_zero()
                })
            })
            .collect());
    }

    match &expr {
        // zero-product rule
        SymExpr::Mul(factors) => {
            let mut roots = Vec::new();
            for factor in factors.iter().filter(|factor| factor.contains_symbol(var)) {
                roots.extend(roots_of(factor, var, depth + 1)?);
            }
            return Some(roots);
        },
        SymExpr::Exp(base, exp) if !exp.contains_symbol(var)
            && numeric_sign(exp) == Some(Ordering::Greater) => {
            return roots_of(base, var, depth + 1);
        },
        _ => {},
    }

    if let Some(coefficients) = poly::coefficients(&expr, var) {
        return poly::roots(&coefficients);
    }

    isolate::isolate(&expr, var, depth)
}

/// Returns true if two numeric roots are the same.
fn same_root(a: f64, b: f64) -> bool {
    (a - b).abs() <= ROOT_TOLERANCE * a.abs().max(1.0)
}

/// Finds the real roots of the given expression with respect to the symbol `var`, that is, the
/// solutions of `expr = 0`.
///
/// Roots are simplified and deduplicated. Roots that can be evaluated numerically are sorted in
/// ascending order, followed by any roots that depend on other symbols.
///
/// ```
/// use panguan_compute::symbolic::{parse, solve};
///
/// let expr = parse("x^2 - 5*x + 6").unwrap();
/// let roots = solve(&expr, "x").unwrap();
/// let roots = roots.iter().map(ToString::to_string).collect::<Vec<_>>();
/// assert_eq!(roots, ["2", "3"]);
/// ```
pub fn solve(expr: &SymExpr, var: &str) -> Result<Vec<SymExpr>, Error> {
    let Some(roots) = roots_of(expr, var, 0) else {
        debug!(expr = %expr, var, "no solving strategy applies");
        return Err(Error::spanless(kind::CannotSolve {
            expr: simplify(expr).to_string(),
            var: var.to_owned(),
        }));
    };

    let mut numeric: Vec<(f64, SymExpr)> = Vec::new();
    let mut symbolic: Vec<SymExpr> = Vec::new();
    for root in roots.iter().map(simplify) {
        if root.contains_imaginary() {
            continue;
        }

        match eval(&root, &Ctxt::default()) {
            Ok(value) => {
                let value = value.to_f64();
                if !numeric.iter().any(|(existing, _)| same_root(*existing, value)) {
                    numeric.push((value, root));
                }
            },
            Err(_) if !root.free_symbols().is_empty() => {
                if !symbolic.contains(&root) {
                    symbolic.push(root);
                }
            },
            // a root like `sqrt(-2)` that failed to evaluate is not real
            Err(_) => {},
        }
    }

    numeric.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    Ok(numeric.into_iter()
        .map(|(_, root)| root)
        .chain(symbolic)
        .collect())
}

/// Returns true if the expression is the variable itself.
fn is_var(expr: &SymExpr, var: &str) -> bool {
    matches!(expr, SymExpr::Primary(Primary::Symbol(sym)) if sym == var)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn solved(input: &str) -> Vec<String> {
        solve(&parse(input).unwrap(), "x")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn linear() {
        assert_eq!(solved("2*x + 4"), ["-2"]);
        assert_eq!(solved("x/3 - 1"), ["3"]);
    }

    #[test]
    fn quadratic() {
        assert_eq!(solved("x^2 - 5*x + 6"), ["2", "3"]);
        assert_eq!(solved("x^2 - 2"), ["-sqrt(2)", "sqrt(2)"]);
        assert_eq!(solved("x^2 - 2*x + 1"), ["1"]);
        assert!(solved("x^2 + 1").is_empty());
    }

    #[test]
    fn symbolic_coefficients() {
        let roots = solve(&parse("a*x + b").unwrap(), "x").unwrap();
        assert_eq!(roots, vec![simplify(&parse("-b/a").unwrap())]);
    }

    #[test]
    fn rational_roots() {
        assert_eq!(solved("x^3 - 6*x^2 + 11*x - 6"), ["1", "2", "3"]);
        assert_eq!(solved("x^3 - 8"), ["2"]);
        assert_eq!(solved("x^4 - 16"), ["-2", "2"]);
        assert_eq!(solved("2*x^3 - x^2"), ["0", "1/2"]);
    }

    #[test]
    fn zero_product() {
        assert_eq!(solved("(x - 1)*(x + 4)*sin(x)^2"), ["-4", "0", "1", "pi"]);
    }

    #[test]
    fn denominators_are_cleared() {
        assert_eq!(solved("(x^2 - 1)/(x - 1)"), ["-1"]);
        assert_eq!(solved("1/x - 2"), ["1/2"]);
    }

    #[test]
    fn isolation() {
        assert_eq!(solved("exp(x) - 2"), ["ln(2)"]);
        assert_eq!(solved("sqrt(x) - 3"), ["9"]);
        assert_eq!(solved("ln(x) - 1"), ["E"]);
        assert_eq!(solved("sin(x)"), ["0", "pi"]);
        assert!(solved("cos(x) - 2").is_empty());
    }

    #[test]
    fn unsolvable() {
        assert!(solve(&parse("x^5 - x - 1").unwrap(), "x").is_err());
        assert!(solve(&parse("x - x").unwrap(), "x").is_err());
    }
}
