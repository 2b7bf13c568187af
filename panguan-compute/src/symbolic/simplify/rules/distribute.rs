//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `c*(a+b) = c*a + c*b`, for numbers `c`
///
/// Only a numeric coefficient is distributed, and only over a single sum. Products of sums such
/// as `(x+1)*(x-1)` are left for [`expand`](crate::symbolic::expand::expand).
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let ([coefficient, SymExpr::Add(terms)] | [SymExpr::Add(terms), coefficient]) = factors else {
            return None;
        };
        if !coefficient.is_number() {
            return None;
        }

        let new_terms = terms.iter()
            .map(|term| coefficient.clone() * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// Applies all distribution rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distribute_coefficient(expr, step_collector)
}
