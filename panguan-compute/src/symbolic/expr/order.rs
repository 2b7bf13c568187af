//! Canonical ordering of terms and factors.
//!
//! Terms of a sum are ordered by descending degree, with numbers last, so that polynomials print
//! as `x^2 - 5*x + 6`. Factors of a product are ordered with numbers first, then constants, then
//! symbols and their powers, then everything else, so that products print as `2*pi*x*sin(x)`.

use std::cmp::Ordering;
use super::{Primary, SymExpr};

/// The total degree of a monomial, counting only symbols raised to numeric powers.
fn degree(expr: &SymExpr) -> f64 {
    match expr {
        SymExpr::Primary(Primary::Symbol(_)) => 1.0,
        SymExpr::Exp(base, exp) if base.as_symbol().is_some() => {
            exp.to_float().map(|f| f.to_f64()).unwrap_or(0.0)
        },
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        _ => 0.0,
    }
}

fn compare_terms(a: &SymExpr, b: &SymExpr) -> Ordering {
    match (a.is_number(), b.is_number()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (true, true) => return Ordering::Equal,
        (false, false) => {},
    }

    degree(b).partial_cmp(&degree(a))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.split_coefficient().1.to_string().cmp(&b.split_coefficient().1.to_string()))
}

fn factor_class(expr: &SymExpr) -> u8 {
    match expr {
        SymExpr::Primary(Primary::Rational(_) | Primary::Float(_)) => 0,
        SymExpr::Primary(Primary::Constant(_)) => 1,
        SymExpr::Primary(Primary::Symbol(_)) => 2,
        SymExpr::Exp(base, exp) if base.as_symbol().is_some() && exp.is_number() => 2,
        _ => 3,
    }
}

fn compare_factors(a: &SymExpr, b: &SymExpr) -> Ordering {
    factor_class(a).cmp(&factor_class(b))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

impl SymExpr {
    /// Recursively sorts the terms and factors of the expression into canonical order. The
    /// result is strictly equal to the input.
    pub fn sorted(self) -> SymExpr {
        match self {
            Self::Primary(Primary::Call(name, args)) => {
                Self::call(name, args.into_iter().map(Self::sorted).collect())
            },
            Self::Primary(_) => self,
            Self::Add(terms) => {
                let mut terms = terms.into_iter().map(Self::sorted).collect::<Vec<_>>();
                terms.sort_by(compare_terms);
                Self::Add(terms)
            },
            Self::Mul(factors) => {
                let mut factors = factors.into_iter().map(Self::sorted).collect::<Vec<_>>();
                factors.sort_by(compare_factors);
                Self::Mul(factors)
            },
            Self::Exp(base, exp) => base.sorted().pow(exp.sorted()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;

    #[test]
    fn polynomial_order() {
        let expr = parse("6 + x^2 - 5*x").unwrap().sorted();
        assert_eq!(expr.to_string(), "x^2 - 5*x + 6");
    }

    #[test]
    fn product_order() {
        let expr = parse("sin(x)*x*2").unwrap().sorted();
        assert_eq!(expr.to_string(), "2*x*sin(x)");
    }
}
