//! Simplification rules for trigonometric functions.

use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::{do_add, do_call}, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// If the expression is a rational multiple of `pi` (including zero), returns the multiple.
fn pi_multiple(expr: &SymExpr) -> Option<Rational> {
    if expr.is_zero() {
        return Some(Rational::new());
    }
    if expr.is_constant(Constant::Pi) {
        return Some(Rational::from(1));
    }

    match expr {
        SymExpr::Mul(factors) => match factors.as_slice() {
            [q, pi] | [pi, q] if pi.is_constant(Constant::Pi) => q.as_rational().cloned(),
            _ => None,
        },
        _ => None,
    }
}

/// `sin(q*pi)`, for `q` with a denominator of 1, 2, 3, 4 or 6.
fn sin_of_pi_multiple(q: &Rational) -> Option<SymExpr> {
    // reduce into [0, 2)
    let turns = Rational::from(q / 2u32).floor();
    let mut q = Rational::from(q - turns * 2u32);

    let mut negate = false;
    if q >= 1 {
        q -= 1u32;
        negate = true;
    }
    if q > Rational::from((1, 2)) {
        q = Rational::from(1u32 - q);
    }

    let value = match (q.numer().to_u32()?, q.denom().to_u32()?) {
        (0, _) => SymExpr::int(0),
        (1, 6) => SymExpr::frac(1, 2),
        (1, 4) => SymExpr::Mul(vec![SymExpr::frac(1, 2), SymExpr::int(2).sqrt()]),
        (1, 3) => SymExpr::Mul(vec![SymExpr::frac(1, 2), SymExpr::int(3).sqrt()]),
        (1, 2) => SymExpr::int(1),
        _ => return None,
    };

    Some(if negate { -value } else { value })
}

fn cos_of_pi_multiple(q: &Rational) -> Option<SymExpr> {
    sin_of_pi_multiple(&Rational::from(q + Rational::from((1, 2))))
}

/// Evaluates `sin` at multiples of `pi/6` and `pi/4`, and applies `sin(-x) = -sin(x)`.
pub fn sin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "sin", |args| {
        let [arg] = args else { return None };
        if let Some(q) = pi_multiple(arg) {
            return sin_of_pi_multiple(&q);
        }
        let positive = arg.negated_if_negative()?;
        Some(-SymExpr::call("sin", vec![positive]))
    })?;

    step_collector.push(Step::Sin);
    Some(opt)
}

/// Evaluates `cos` at multiples of `pi/6` and `pi/4`, and applies `cos(-x) = cos(x)`.
pub fn cos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "cos", |args| {
        let [arg] = args else { return None };
        if let Some(q) = pi_multiple(arg) {
            return cos_of_pi_multiple(&q);
        }
        let positive = arg.negated_if_negative()?;
        Some(SymExpr::call("cos", vec![positive]))
    })?;

    step_collector.push(Step::Cos);
    Some(opt)
}

/// Evaluates `tan` where both `sin` and `cos` are known and `cos` is nonzero, and applies
/// `tan(-x) = -tan(x)`.
pub fn tan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "tan", |args| {
        let [arg] = args else { return None };
        if let Some(q) = pi_multiple(arg) {
            let sin = sin_of_pi_multiple(&q)?;
            let cos = cos_of_pi_multiple(&q)?;
            if cos.is_zero() {
                return None;
            }
            return Some(sin / cos);
        }
        let positive = arg.negated_if_negative()?;
        Some(-SymExpr::call("tan", vec![positive]))
    })?;

    step_collector.push(Step::Tan);
    Some(opt)
}

/// `a*sin(x)^2 + a*cos(x)^2 = a`
pub fn pythagorean(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let square_of = |term: &SymExpr, name: &str| -> Option<(SymExpr, SymExpr)> {
            let (coefficient, rest) = term.split_coefficient();
            let (base, exp) = rest.split_power();
            if exp.as_integer().map(|n| *n == 2) != Some(true) {
                return None;
            }
            Some((coefficient, base.as_call1(name)?.clone()))
        };

        for (i, term) in terms.iter().enumerate() {
            let Some((coefficient, arg)) = square_of(term, "sin") else {
                continue;
            };

            let matching = terms.iter()
                .enumerate()
                .position(|(j, other)| {
                    j != i && square_of(other, "cos")
                        .map_or(false, |(other_coefficient, other_arg)| {
                            other_coefficient == coefficient && other_arg == arg
                        })
                })?;

            let mut new_terms = terms.iter()
                .enumerate()
                .filter(|(k, _)| *k != i && *k != matching)
                .map(|(_, term)| term.clone())
                .collect::<Vec<_>>();
            new_terms.push(coefficient);
            return Some(SymExpr::Add(new_terms).downgrade());
        }

        None
    })?;

    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// `q*pi`
fn pi_times(q: Rational) -> SymExpr {
    if q.cmp0() == std::cmp::Ordering::Equal {
        SymExpr::int(0)
    } else {
        SymExpr::Mul(vec![SymExpr::from(q), SymExpr::constant(Constant::Pi)])
    }
}

/// Returns `q` such that `asin(value) = q*pi`, for the non-negative values in the sine table.
fn asin_table(value: &SymExpr) -> Option<Rational> {
    [
        (SymExpr::int(0), (0, 1)),
        (SymExpr::frac(1, 2), (1, 6)),
        (SymExpr::Mul(vec![SymExpr::frac(1, 2), SymExpr::int(2).sqrt()]), (1, 4)),
        (SymExpr::Mul(vec![SymExpr::frac(1, 2), SymExpr::int(3).sqrt()]), (1, 3)),
        (SymExpr::int(1), (1, 2)),
    ]
        .into_iter()
        .find(|(known, _)| known == value)
        .map(|(_, q)| Rational::from(q))
}

/// Returns `q` such that `atan(value) = q*pi`, for the non-negative values in the tangent table.
fn atan_table(value: &SymExpr) -> Option<Rational> {
    [
        (SymExpr::int(0), (0, 1)),
        (SymExpr::Mul(vec![SymExpr::frac(1, 3), SymExpr::int(3).sqrt()]), (1, 6)),
        (SymExpr::int(1), (1, 4)),
        (SymExpr::int(3).sqrt(), (1, 3)),
    ]
        .into_iter()
        .find(|(known, _)| known == value)
        .map(|(_, q)| Rational::from(q))
}

/// Evaluates `asin` at the values in the sine table, and applies `asin(-x) = -asin(x)`.
pub fn asin(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "asin", |args| {
        let [arg] = args else { return None };
        if let Some(q) = asin_table(arg) {
            return Some(pi_times(q));
        }
        let positive = arg.negated_if_negative()?;
        Some(-SymExpr::call("asin", vec![positive]))
    })?;

    step_collector.push(Step::InverseTrigonometric);
    Some(opt)
}

/// Evaluates `acos` at the values in the sine table, and applies `acos(-x) = pi - acos(x)`.
pub fn acos(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "acos", |args| {
        let [arg] = args else { return None };
        if let Some(q) = asin_table(arg) {
            return Some(pi_times(Rational::from((1, 2)) - q));
        }
        let positive = arg.negated_if_negative()?;
        Some(SymExpr::constant(Constant::Pi) - SymExpr::call("acos", vec![positive]))
    })?;

    step_collector.push(Step::InverseTrigonometric);
    Some(opt)
}

/// Evaluates `atan` at the values in the tangent table, and applies `atan(-x) = -atan(x)`.
pub fn atan(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "atan", |args| {
        let [arg] = args else { return None };
        if let Some(q) = atan_table(arg) {
            return Some(pi_times(q));
        }
        let positive = arg.negated_if_negative()?;
        Some(-SymExpr::call("atan", vec![positive]))
    })?;

    step_collector.push(Step::InverseTrigonometric);
    Some(opt)
}

/// Applies all trigonometric rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    sin(expr, step_collector)
        .or_else(|| cos(expr, step_collector))
        .or_else(|| tan(expr, step_collector))
        .or_else(|| asin(expr, step_collector))
        .or_else(|| acos(expr, step_collector))
        .or_else(|| atan(expr, step_collector))
        .or_else(|| pythagorean(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_table() {
        assert_eq!(sin_of_pi_multiple(&Rational::from((1, 6))), Some(SymExpr::frac(1, 2)));
        assert_eq!(sin_of_pi_multiple(&Rational::from((3, 2))), Some(SymExpr::int(-1)));
        assert_eq!(sin_of_pi_multiple(&Rational::from(1)), Some(SymExpr::int(0)));
        assert_eq!(sin_of_pi_multiple(&Rational::from((1, 5))), None);
    }

    #[test]
    fn cos_table() {
        assert_eq!(cos_of_pi_multiple(&Rational::new()), Some(SymExpr::int(1)));
        assert_eq!(cos_of_pi_multiple(&Rational::from(1)), Some(SymExpr::int(-1)));
        assert_eq!(cos_of_pi_multiple(&Rational::from((-1, 3))), Some(SymExpr::frac(1, 2)));
    }

    #[test]
    fn pi_multiples() {
        let half_pi = SymExpr::Mul(vec![SymExpr::frac(1, 2), SymExpr::constant(Constant::Pi)]);
        assert_eq!(pi_multiple(&half_pi), Some(Rational::from((1, 2))));
        assert_eq!(pi_multiple(&SymExpr::symbol("x")), None);
    }

    #[test]
    fn inverse_tables() {
        assert_eq!(asin_table(&SymExpr::frac(1, 2)), Some(Rational::from((1, 6))));
        assert_eq!(atan_table(&SymExpr::int(1)), Some(Rational::from((1, 4))));
        assert_eq!(asin_table(&SymExpr::int(2)), None);
    }
}
