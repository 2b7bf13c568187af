//! Module to simplify expressions.
//!
//! This module provides the [`simplify`] function, which attempts to reduce the complexity of an
//! expression. It does this by repeatedly applying rewriting rules to the expression in multiple
//! passes, until no more rules apply.
//!
//! The rules never expand products of sums, since that usually increases complexity. Instead,
//! [`simplify`] also simplifies the [expanded](super::expand::expand) form of the expression,
//! and keeps whichever result is less complex. This is how `(x + 1)^2 - x^2` reduces to
//! `2*x + 1`, while `(x + 1)^2` is left alone.
//!
//! Complexity is an informal, arbitrary metric that is used to determine whether one expression is
//! simpler than another. The default complexity heuristic used is [`default_complexity`] (click
//! for more information). However, this can be overridden by providing a custom complexity
//! function to the [`simplify_with`] function.

pub mod rules;
pub mod step;

use crate::symbolic::step_collector::StepCollector;
use step::Step;
use super::{expand::expand, expr::{Primary, SymExpr}};
use tracing::trace;

/// The maximum number of passes over an expression before giving up on reaching a fixed point.
const MAX_PASSES: usize = 64;

/// The default complexity heuristic function.
///
/// This function computes complexity using these simple rules:
///
/// - `complexity(rational) = number of digits`
/// - `complexity(float) = 2`
/// - `complexity(symbol) = complexity(constant) = 1`
/// - `complexity(call) = 2 + sum(complexity(args))`
/// - `complexity(add) = 3 + sum(complexity(terms))`
/// - `complexity(mul) = 2 + sum(complexity(factors))`
/// - `complexity(exp) = 1 + complexity(lhs) + complexity(rhs)`
pub fn default_complexity(expr: &SymExpr) -> usize {
    let mut complexity = 0;
    let mut stack = vec![expr];
    while let Some(expr) = stack.pop() {
        complexity += match expr {
            SymExpr::Primary(primary) => match primary {
                Primary::Rational(r) => {
                    let digits = r.numer().to_string().len();
                    if *r.denom() == 1 {
                        digits
                    } else {
                        digits + r.denom().to_string().len()
                    }
                },
                Primary::Float(_) => 2,
                Primary::Symbol(_) | Primary::Constant(_) => 1,
                Primary::Call(_, args) => {
                    stack.extend(args.iter());
                    2
                },
            },
            SymExpr::Add(terms) => {
                stack.extend(terms.iter());
                3
            },
            SymExpr::Mul(factors) => {
                stack.extend(factors.iter());
                2
            },
            SymExpr::Exp(lhs, rhs) => {
                stack.push(lhs);
                stack.push(rhs);
                1
            },
        };
    }
    complexity
}

/// Base implementation of the simplification algorithm.
///
/// Rules are applied to the expression itself, then the children are simplified, and this repeats
/// until a pass makes no changes. Returns the new expression and whether anything changed.
fn inner_simplify_with(
    expr: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
    depth: usize,
) -> (SymExpr, bool) {
    let mut expr = expr.clone();
    let mut changed_at_least_once = false;

    for _ in 0..MAX_PASSES {
        let mut changed_in_this_pass = false;

        // try to simplify this expression using all rules
        if let Some(new_expr) = rules::all(&expr, step_collector) {
            expr = new_expr;
            changed_in_this_pass = true;
            changed_at_least_once = true;
        }

        // then begin recursing into the expression's children
        let children: Vec<&mut SymExpr> = match expr {
            SymExpr::Primary(Primary::Call(_, ref mut args)) => args.iter_mut().collect(),
            SymExpr::Primary(_) => Vec::new(),
            SymExpr::Add(ref mut terms) => terms.iter_mut().collect(),
            SymExpr::Mul(ref mut factors) => factors.iter_mut().collect(),
            SymExpr::Exp(ref mut lhs, ref mut rhs) => vec![&mut **lhs, &mut **rhs],
        };
        for child in children {
            let (new_child, changed) = inner_simplify_with(child, step_collector, depth + 1);
            *child = new_child;
            // use |= instead of = to not reset these variables to false if already true
            changed_in_this_pass |= changed;
            changed_at_least_once |= changed;
        }

        if !changed_in_this_pass {
            return (expr, changed_at_least_once);
        }
    }

    trace!(depth, expr = %expr, "simplification did not reach a fixed point");
    (expr, changed_at_least_once)
}

/// Applies the rules to both the expression and its expanded form, keeping the less complex
/// result. Ties keep the unexpanded form.
fn simplify_once<F>(
    expr: &SymExpr,
    complexity: F,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let mut direct_steps = Vec::new();
    let (direct, _) = inner_simplify_with(expr, &mut direct_steps, 0);

    let mut expanded_steps = Vec::new();
    let (expanded, _) = inner_simplify_with(&expand(&direct), &mut expanded_steps, 0);

    if complexity(&expanded) < complexity(&direct) {
        for step in direct_steps.into_iter().chain(expanded_steps) {
            step_collector.push(step);
        }
        expanded
    } else {
        for step in direct_steps {
            step_collector.push(step);
        }
        direct
    }
}

/// Simplifies until the result stops changing, then sorts it into canonical order.
fn simplify_to_fixed_point<F>(
    expr: &SymExpr,
    complexity: F,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    let mut current = simplify_once(expr, complexity, step_collector);
    for _ in 0..3 {
        let next = simplify_once(&current, complexity, step_collector);
        if next == current {
            break;
        }
        current = next;
    }
    current.sorted()
}

/// Simplify the given expression, using the default complexity heuristic function.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_to_fixed_point(expr, default_complexity, &mut ())
}

/// Simplify the given expression, using the given complexity heuristic function.
///
/// The complexity heuristic function should return a number that represents the complexity of the
/// given expression. The lower the number, the simpler the expression.
pub fn simplify_with<F>(expr: &SymExpr, complexity: F) -> SymExpr
where
    F: Copy + Fn(&SymExpr) -> usize,
{
    simplify_to_fixed_point(expr, complexity, &mut ())
}

/// Simplify the given expression, using the default complexity heuristic function. The steps taken
/// by the simplifier will also be collected and returned. This is useful for debugging, and also
/// for displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = simplify_to_fixed_point(expr, default_complexity, &mut steps);
    (expr, steps)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        simplify(&parse(input).unwrap()).to_string()
    }

    #[test]
    fn add_rules() {
        // also tests multiply_zero
        assert_eq!(simplified("0+0*(3x+5b^2)+0+(3a)"), "3*a");
    }

    #[test]
    fn multiply_rules() {
        assert_eq!(simplified("0*(3x+5b^2)*1*(3a)"), "0");
        assert_eq!(simplified("1*3*1*1*1*(1+(x^2+5x+6)*0)*1*1"), "3");
    }

    #[test]
    fn combine_like_factors() {
        let expr = simplify(&parse("a * b * a^3 * c^2 * d^2 * a^2 * b^4 * d^2").unwrap());
        assert_eq!(expr, parse("a^6 * b^5 * c^2 * d^4").unwrap());
    }

    #[test]
    fn combine_like_factors_strict_eq() {
        let expr = simplify(&parse("(a + 1 + b) * (b + a) * (b + a + 1) * (a + b)").unwrap());
        assert_eq!(expr, parse("(a + b + 1)^2 * (a + b)^2").unwrap());
    }

    #[test]
    fn division_by_zero_is_kept() {
        for input in ["0/0", "1/0", "x/0", "0*(1/0)", "sin(x)*0/(2 - 2)"] {
            let expr = simplify(&parse(input).unwrap());
            assert!(expr.divides_by_zero(), "{} simplified to {}", input, expr);
        }
        assert_eq!(simplified("0/x"), "0");
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplified("(1^0)^(3x+5b^2)^1^(3a)"), "1");
        assert_eq!(simplified("(0^1)^0"), "1");
    }

    #[test]
    fn power_rule_steps() {
        let (expr, steps) = simplify_with_steps(&parse("(1^0)^(3x+5b^2)^1^(3a)").unwrap());
        assert_eq!(expr, SymExpr::int(1));
        assert_eq!(steps.first(), Some(&Step::PowerPower));
        assert!(steps.contains(&Step::MultiplyZero));
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(12)"), "2*sqrt(3)");
        assert_eq!(simplified("sqrt(1/2)"), "sqrt(2)/2");
        assert_eq!(simplified("sqrt(-4)"), "2*I");
        assert_eq!(simplified("8^(2/3)"), "4");
    }

    #[test]
    fn fractions() {
        assert_eq!(simplified("1/3 + 1/6"), "1/2");
        assert_eq!(simplified("x/(2*x)"), "1/2");
        assert_eq!(simplified("2*x/4"), "x/2");
    }

    #[test]
    fn like_terms_cancel() {
        assert_eq!(simplified("x - x"), "0");
        assert_eq!(simplified("x + x + x"), "3*x");
    }

    #[test]
    fn expansion_when_simpler() {
        assert_eq!(simplified("(x + 1)^2 - x^2"), "2*x + 1");
        assert_eq!(simplified("(x + 1)^2"), "(x + 1)^2");
    }

    #[test]
    fn pythagorean_identity() {
        assert_eq!(simplified("sin(x)^2 + cos(x)^2"), "1");
        assert_eq!(simplified("2*sin(y)^2 + 2*cos(y)^2 + x"), "x + 2");
    }

    #[test]
    fn trigonometric_values() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("tan(pi/4)"), "1");
        assert_eq!(simplified("sin(-x)"), "-sin(x)");
    }

    #[test]
    fn logarithms() {
        assert_eq!(simplified("ln(1)"), "0");
        assert_eq!(simplified("ln(exp(x))"), "x");
        assert_eq!(simplified("exp(2*ln(x))"), "x^2");
    }

    #[test]
    fn imaginary_powers() {
        assert_eq!(simplified("I^2"), "-1");
        assert_eq!(simplified("I^7"), "-I");
    }

    #[test]
    fn idempotent() {
        for input in ["x^2 - 5*x + 6", "(x + 1)^2", "2*sqrt(3)*x/3", "sin(x)*exp(x)", "1/(x + 1)"] {
            let once = simplify(&parse(input).unwrap());
            let twice = simplify(&once);
            assert_eq!(once, twice, "simplify is not idempotent on {}", input);
        }
    }
}
