//! Numeric evaluation of function calls with numeric arguments.

use crate::{
    numerical::{eval, Ctxt},
    symbolic::{
        expr::{Primary, SymExpr},
        simplify::step::Step,
        step_collector::StepCollector,
    },
};

/// `abs(-2) = 2`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let arg = expr.as_call1("abs")?;
    if !arg.is_number() {
        return None;
    }

    step_collector.push(Step::AbsoluteValue);
    Some(if arg.is_negative_number() { -arg.clone() } else { arg.clone() })
}

/// `sin(0.5) = 0.479...`
///
/// Calls whose arguments are all numbers, with at least one floating-point number, are evaluated
/// numerically. Exact arguments such as `sin(1)` are left alone.
pub fn float_call(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let SymExpr::Primary(Primary::Call(_, args)) = expr else {
        return None;
    };
    if !args.iter().all(SymExpr::is_number) || !args.iter().any(SymExpr::is_float) {
        return None;
    }

    let value = eval(expr, &Ctxt::default()).ok()?;
    step_collector.push(Step::Evaluate);
    Some(SymExpr::from(value))
}

/// Applies all evaluation rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    abs(expr, step_collector)
        .or_else(|| float_call(expr, step_collector))
}
