//! Integration by substitution.
//!
//! For each subexpression `u` of the integrand, the integrand is divided by `du/dx`. If what
//! remains can be written in terms of `u` alone, it is integrated with respect to `u`, and `u` is
//! substituted back into the result:
//!
//! ```text
//! ∫ 2x*cos(x^2) dx = ∫ cos(u) du = sin(u) = sin(x^2)
//! ```

use crate::symbolic::{derivative::derivative, expr::SymExpr, simplify::simplify};
use super::antiderivative;

/// The most subexpressions that are tried as `u`.
const MAX_CANDIDATES: usize = 16;

pub(super) fn by_substitution(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    // parsed symbols always start with a letter, so this name cannot clash with the integrand
    let u_name = format!("_u{}", depth);
    let u_symbol = SymExpr::symbol(u_name.as_str());

    let mut tried: Vec<&SymExpr> = Vec::new();
    for candidate in expr.post_order_iter() {
        if candidate == expr
            || candidate.as_symbol() == Some(var)
            || !candidate.contains_symbol(var)
            || tried.contains(&candidate)
        {
            continue;
        }
        if tried.len() >= MAX_CANDIDATES {
            break;
        }
        tried.push(candidate);

        let Ok(du) = derivative(candidate, var) else {
            continue;
        };
        let du = simplify(&du);
        if du.is_zero() {
            continue;
        }

        let in_u = simplify(&(expr.clone() / du)).replace(candidate, &u_symbol);
        if in_u.contains_symbol(var) {
            continue;
        }

        if let Some(result) = antiderivative(&in_u, &u_name, depth + 1) {
            return Some(result.replace(&u_symbol, candidate));
        }
    }

    None
}
