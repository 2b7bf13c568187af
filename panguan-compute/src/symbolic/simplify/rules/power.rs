//! Simplification rules for power expressions.

use crate::{
    primitive::int,
    symbolic::{
        expr::{Constant, Primary, SymExpr},
        simplify::{rules::do_power, step::Step},
        step_collector::StepCollector,
    },
};
use rug::{ops::Pow, Integer, Rational};
use std::cmp::Ordering;

/// The largest exponent magnitude that is evaluated exactly.
const MAX_EXACT_EXPONENT: i32 = 4096;

/// The largest root index `q` that [`extract_root_rule`] searches for perfect `q`-th powers.
const MAX_ROOT_INDEX: u32 = 64;

/// `a^0 = 1`
///
/// `0^0` is defined as `1` by this rule, though it may be undefined in other mathematical
/// contexts.
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::int(1))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `0^a = 0`, for positive numbers `a`
///
/// `0^0` is handled by the [`power_zero`] rule.
pub fn power_zero_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.is_zero() && rhs.is_number() && !rhs.is_negative_number() {
            Some(SymExpr::int(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerZeroLeft);
    Some(opt)
}

/// `1^a = 1`
pub fn power_one_left(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::int(1))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOneLeft);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// Returns true if the expression is known to be positive.
fn is_positive(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Rational(r)) => r.cmp0() == Ordering::Greater,
        SymExpr::Primary(Primary::Float(f)) => f.cmp0() == Some(Ordering::Greater),
        SymExpr::Primary(Primary::Constant(Constant::E | Constant::Pi)) => true,
        _ => false,
    }
}

/// `(a^b)^c = a^(b*c)`
///
/// This only holds in general when `c` is an integer, or `a` is positive.
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, exponent) = lhs {
            if rhs.as_integer().is_some() || is_positive(base) {
                return Some((**base).clone().pow((**exponent).clone() * rhs.clone()));
            }
        }

        None
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// `(a*b)^c = a^c*b^c`
///
/// For non-integer `c`, only positive numeric factors are pulled out, such as
/// `(2x)^(1/2) = 2^(1/2)*x^(1/2)`.
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };

        if rhs.as_integer().is_some() {
            return Some(SymExpr::Mul(
                factors.iter().map(|factor| factor.clone().pow(rhs.clone())).collect(),
            ));
        }

        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(is_positive);
        if positive.is_empty() || rest.is_empty() {
            return None;
        }

        let mut new_factors = positive.into_iter()
            .map(|factor| factor.pow(rhs.clone()))
            .collect::<Vec<_>>();
        new_factors.push(SymExpr::Mul(rest).downgrade().pow(rhs.clone()));
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Raises a rational to an integer power, if the exponent is small enough.
fn rational_pow(base: &Rational, exp: &Integer) -> Option<Rational> {
    let exp = exp.to_i32().filter(|exp| exp.abs() <= MAX_EXACT_EXPONENT)?;
    if base.cmp0() == Ordering::Equal && exp < 0 {
        return None;
    }
    Some(base.clone().pow(exp))
}

/// `2^3 = 8`
/// `(1/2)^-2 = 4`
/// `2.0^0.5 = 1.414...`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let (Some(base), Some(exp)) = (lhs.as_rational(), rhs.as_integer()) {
            return rational_pow(base, exp).map(SymExpr::from);
        }

        if lhs.is_number() && rhs.is_number() && (lhs.is_float() || rhs.is_float()) {
            let base = lhs.to_float()?;
            let exp = rhs.to_float()?;
            if base.is_sign_negative() && !exp.is_integer() {
                return None;
            }
            let value = base.pow(&exp);
            return value.is_finite().then(|| SymExpr::from(value));
        }

        None
    })?;

    step_collector.push(Step::RationalPower);
    Some(opt)
}

/// Factors `n` as `outside^q * inside`, pulling out as many perfect `q`-th powers as can be found
/// by trial division.
pub(crate) fn extract_root(n: &Integer, q: u32) -> (Integer, Integer) {
    let mut outside = int(1);
    let mut inside = n.clone();
    let mut candidate: u32 = 2;

    while candidate <= 10_000 {
        let power = int(candidate).pow(q);
        if power > inside {
            break;
        }
        while inside.is_divisible(&power) {
            inside /= &power;
            outside *= candidate;
        }
        candidate += 1;
    }

    (outside, inside)
}

/// Simplifies rational numbers raised to non-integer rational powers.
///
/// `12^(1/2) = 2*3^(1/2)`
/// `8^(2/3) = 4`
/// `2^(3/2) = 2*2^(1/2)`
/// `2^(-1/2) = 1/2*2^(1/2)`
/// `(1/4)^(1/2) = 1/2`
/// `(-4)^(1/2) = 2*i`
pub fn extract_root_rule(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_rational()?;
        let exp = rhs.as_rational()?;
        if *exp.denom() == 1 || base.cmp0() == Ordering::Equal {
            return None;
        }

        // (-n)^(p/2) = i^p * n^(p/2)
        if base.cmp0() == Ordering::Less {
            if *exp.denom() != 2 {
                return None;
            }
            return Some(SymExpr::Mul(vec![
                SymExpr::constant(Constant::I).pow(SymExpr::from(exp.numer().clone())),
                SymExpr::from(Rational::from(-base)).pow(rhs.clone()),
            ]));
        }

        // (n/d)^e = n^e * d^-e
        if *base.denom() != 1 {
            return Some(SymExpr::Mul(vec![
                SymExpr::from(base.numer().clone()).pow(rhs.clone()),
                SymExpr::from(base.denom().clone()).pow(SymExpr::from(Rational::from(-exp))),
            ]));
        }

        // n^e = n^k * n^(r/q), where k is the integer part of e and 0 < r/q < 1
        let q = exp.denom().to_u32().filter(|q| *q <= MAX_ROOT_INDEX)?;
        let whole = exp.clone().floor();
        let fract = Rational::from(exp - &whole);
        let (outside, inside) = extract_root(base.numer(), q);

        if whole.cmp0() == Ordering::Equal && outside == 1 {
            return None;
        }

        let mut factors = vec![
            SymExpr::from(rational_pow(base, whole.numer())?),
            SymExpr::from(rational_pow(&Rational::from(outside), fract.numer())?),
        ];
        if inside != 1 {
            factors.push(SymExpr::from(inside).pow(SymExpr::from(fract)));
        }
        Some(SymExpr::Mul(factors).downgrade())
    })?;

    step_collector.push(Step::ExtractRoot);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_zero_left(expr, step_collector))
        .or_else(|| power_one_left(expr, step_collector))
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| extract_root_rule(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse, simplify, SymExpr};
    use pretty_assertions::assert_eq;

    #[test]
    fn huge_root_index_is_left_alone() {
        let simplified = simplify(&parse("2^(1/4000000000)").unwrap());
        let SymExpr::Exp(base, exp) = simplified else {
            panic!("expected a power, got {simplified}");
        };
        assert_eq!(*base, SymExpr::int(2));
        assert_eq!(exp.as_rational().map(|r| r.denom().to_string()), Some("4000000000".to_owned()));
    }

    #[test]
    fn small_root_index_is_extracted() {
        assert_eq!(simplify(&parse("64^(1/6)").unwrap()).to_string(), "2");
    }
}
