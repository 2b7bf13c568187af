//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// `a+(b+c) = a+b+c`
///
/// Rules that replace a term can leave a sum nested in a sum; this splices it back in.
pub fn flatten(expr: &SymExpr, _: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    do_add(expr, |terms| {
        if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
            return None;
        }

        Some(terms.iter()
            .cloned()
            .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term))
    })
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2+3 = 5`
/// `1/2+0.25 = 0.75`
pub fn combine_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        if terms.iter().filter(|term| term.is_number()).count() < 2 {
            return None;
        }

        let (numbers, mut new_terms): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(SymExpr::is_number);
        let sum = numbers.iter()
            .fold(SymExpr::int(0), |acc, n| acc.add_number(n));
        new_terms.push(sum);
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::Evaluate);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `a-a = 0`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = Vec::new();

        // pairs of (coefficient, remaining factors), in order of first appearance
        // this is O(n^2) worst case, due to scanning the whole vec for each term
        let mut groups: Vec<(SymExpr, SymExpr)> = Vec::new();
        let mut changed = false;

        for term in terms {
            if term.is_number() {
                new_terms.push(term.clone());
                continue;
            }

            let (coefficient, factors) = term.split_coefficient();

            // factors must be strictly equal
            match groups.iter_mut().find(|(_, other)| *other == factors) {
                Some(group) => {
                    group.0 = group.0.add_number(&coefficient);
                    changed = true;
                },
                None => groups.push((coefficient, factors)),
            }
        }

        if !changed {
            return None;
        }

        for (coefficient, factors) in groups {
            if coefficient.is_zero() {
                continue;
            }

            if coefficient.is_one() {
                new_terms.push(factors);
            } else {
                new_terms.push(coefficient * factors);
            }
        }

        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    flatten(expr, step_collector)
        .or_else(|| add_zero(expr, step_collector))
        .or_else(|| combine_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}
