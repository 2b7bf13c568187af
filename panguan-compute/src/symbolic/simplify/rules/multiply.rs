//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::{
    numerical::{eval, Ctxt},
    symbolic::{
        expr::SymExpr,
        simplify::{rules::do_multiply, step::Step},
        step_collector::StepCollector,
    },
};

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &SymExpr, _: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
            return None;
        }

        Some(factors.iter()
            .cloned()
            .fold(SymExpr::Mul(Vec::new()), |acc, factor| acc * factor))
    })
}

/// Returns true if the factor divides by zero, or by a constant that evaluates to zero but has
/// not been simplified yet, such as the `(2 - 2)^-1` in `0/(2 - 2)`.
fn may_divide_by_zero(factor: &SymExpr) -> bool {
    factor.post_order_iter().any(|expr| match expr {
        SymExpr::Exp(base, exp) if exp.is_negative_number() => {
            base.is_zero()
                || (base.free_symbols().is_empty()
                    && eval(base, &Ctxt::default()).map_or(true, |value| value.is_zero()))
        },
        _ => false,
    })
}

/// `0*a = 0`
/// `a*0 = 0`
///
/// Products that also divide by zero, such as `0*0^-1`, are undefined and left alone.
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(may_divide_by_zero) {
            return None;
        }

        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::int(0))
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*3 = 6`
/// `1/2*0.5 = 0.25`
pub fn combine_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(SymExpr::is_number);
        let product = numbers.iter()
            .fold(SymExpr::int(1), |acc, n| acc.mul_number(n));

        let mut new_factors = vec![product];
        new_factors.extend(rest);
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::Evaluate);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a*a*a = a^3`
/// `a^2*a^3 = a^5`
/// `sqrt(2)*sqrt(2) = 2^(1/2 + 1/2)`
/// etc.
///
/// Plain numbers are never grouped; they are handled by [`combine_numbers`].
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = Vec::new();

        // pairs of (base, summed exponent), in order of first appearance
        let mut groups: Vec<(SymExpr, SymExpr)> = Vec::new();
        let mut changed = false;

        for factor in factors {
            if factor.is_number() {
                new_factors.push(factor.clone());
                continue;
            }

            let (base, exp) = factor.split_power();
            match groups.iter_mut().find(|(other, _)| *other == base) {
                Some(group) => {
                    group.1 = group.1.clone() + exp;
                    changed = true;
                },
                None => groups.push((base, exp)),
            }
        }

        if !changed {
            return None;
        }

        for (base, exp) in groups {
            if exp.is_one() {
                new_factors.push(base);
            } else {
                new_factors.push(base.pow(exp));
            }
        }

        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| multiply_zero(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
