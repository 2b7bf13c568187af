//! Simplification rules for logarithms and exponentials.

use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::{do_call, do_power}, step::Step},
    step_collector::StepCollector,
};

/// `ln(1) = 0`
/// `ln(e) = 1`
/// `ln(e^x) = x`
pub fn ln(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "ln", |args| {
        let [arg] = args else { return None };
        if arg.is_one() {
            return Some(SymExpr::int(0));
        }
        if arg.is_constant(Constant::E) {
            return Some(SymExpr::int(1));
        }
        match arg {
            SymExpr::Exp(base, exp) if base.is_constant(Constant::E) => Some((**exp).clone()),
            _ => None,
        }
    })?;

    step_collector.push(Step::Logarithm);
    Some(opt)
}

/// `e^ln(x) = x`
/// `e^(k*ln(x)) = x^k`, for numbers `k`
pub fn exp_ln(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if !lhs.is_constant(Constant::E) {
            return None;
        }

        if let Some(arg) = rhs.as_call1("ln") {
            return Some(arg.clone());
        }

        match rhs {
            SymExpr::Mul(factors) => match factors.as_slice() {
                [k, log] | [log, k] if k.is_number() => {
                    Some(log.as_call1("ln")?.clone().pow(k.clone()))
                },
                _ => None,
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::Exponential);
    Some(opt)
}

/// Applies all logarithm rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    ln(expr, step_collector)
        .or_else(|| exp_ln(expr, step_collector))
}
