//! Integration by parts.
//!
//! `∫ u dv = u*v - ∫ v du`
//!
//! The factor chosen as `u` is a logarithm or inverse trigonometric function if there is one,
//! otherwise a polynomial in the variable. Everything else in the product is `dv`.

use crate::symbolic::{
    derivative::derivative,
    expr::{Primary, SymExpr},
    simplify::simplify,
};
use super::antiderivative;

/// Returns true if the expression is a logarithm or an inverse trigonometric function, which
/// become simpler when differentiated.
fn is_log_like(expr: &SymExpr) -> bool {
    matches!(
        expr,
        SymExpr::Primary(Primary::Call(name, _)) if matches!(name.as_str(), "ln" | "asin" | "acos" | "atan")
    )
}

/// Returns true if the expression is a polynomial in `var` that depends on `var`.
fn is_polynomial(expr: &SymExpr, var: &str) -> bool {
    fn inner(expr: &SymExpr, var: &str) -> bool {
        match expr {
            SymExpr::Primary(Primary::Call(..)) => !expr.contains_symbol(var),
            SymExpr::Primary(_) => true,
            SymExpr::Add(terms) => terms.iter().all(|term| inner(term, var)),
            SymExpr::Mul(factors) => factors.iter().all(|factor| inner(factor, var)),
            SymExpr::Exp(base, exp) => {
                !exp.contains_symbol(var)
                    && (!base.contains_symbol(var)
                        || (inner(base, var) && exp.as_integer().is_some_and(|n| n.cmp0().is_gt())))
            },
        }
    }

    expr.contains_symbol(var) && inner(expr, var)
}

pub(super) fn by_parts(expr: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let SymExpr::Mul(factors) = expr else {
        return None;
    };

    let index = factors.iter()
        .position(is_log_like)
        .or_else(|| factors.iter().position(|factor| is_polynomial(factor, var)))?;
    let u = &factors[index];
    let dv = SymExpr::Mul(
        factors.iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, factor)| factor.clone())
            .collect(),
    ).downgrade();

    let v = simplify(&antiderivative(&dv, var, depth + 1)?);
    let du = derivative(u, var).ok()?;
    let v_du = antiderivative(&simplify(&(v.clone() * du)), var, depth + 1)?;
    Some(u.clone() * v - v_du)
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use super::*;

    #[test]
    fn polynomials() {
        assert!(is_polynomial(&parse("x^2 + 3*x").unwrap(), "x"));
        assert!(is_polynomial(&parse("(x + 1)^3").unwrap(), "x"));
        assert!(!is_polynomial(&parse("x^(1/2)").unwrap(), "x"));
        assert!(!is_polynomial(&parse("sin(x)").unwrap(), "x"));
        assert!(!is_polynomial(&parse("y^2").unwrap(), "x"));
    }
}
