//! Expansion of products and integer powers of sums.

use super::expr::{Primary, SymExpr};

/// The largest integer power of a sum that is expanded.
const MAX_EXPANDED_POWER: u32 = 12;

/// The largest number of terms an expansion may produce before it is abandoned.
const MAX_TERMS: usize = 512;

/// Returns the terms of the expression, treating non-sums as a single term.
fn terms_of(expr: SymExpr) -> Vec<SymExpr> {
    match expr {
        SymExpr::Add(terms) => terms,
        other => vec![other],
    }
}

/// Multiplies out two lists of terms. Returns [`None`] if the result would be too large.
fn multiply_terms(lhs: &[SymExpr], rhs: &[SymExpr]) -> Option<Vec<SymExpr>> {
    if lhs.len() * rhs.len() > MAX_TERMS {
        return None;
    }

    Some(lhs.iter()
        .flat_map(|a| rhs.iter().map(move |b| a.clone() * b.clone()))
        .collect())
}

/// Expands the expression by distributing multiplication over addition, and expanding positive
/// integer powers of sums.
///
/// No other simplification is done; the result should be passed through
/// [`simplify`](super::simplify()) to combine like terms. Expansions that would produce too many
/// terms are left unexpanded.
///
/// ```
/// use panguan_compute::symbolic::{expand, parse, simplify};
///
/// let expr = parse("(x + 1)*(x - 1)").unwrap();
/// assert_eq!(simplify(&expand(&expr)).to_string(), "x^2 - 1");
/// ```
pub fn expand(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            SymExpr::call(name.clone(), args.iter().map(expand).collect())
        },
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => terms.iter()
            .map(expand)
            .fold(SymExpr::Add(Vec::new()), |acc, term| acc + term)
            .downgrade(),
        SymExpr::Mul(factors) => {
            let factors = factors.iter().map(expand).collect::<Vec<_>>();
            let mut terms = vec![SymExpr::int(1)];
            for factor in &factors {
                match multiply_terms(&terms, &terms_of(factor.clone())) {
                    Some(product) => terms = product,
                    None => return SymExpr::Mul(factors),
                }
            }
            SymExpr::Add(terms).downgrade()
        },
        SymExpr::Exp(base, exp) => {
            let base = expand(base);
            let exp = expand(exp);
            let power = exp.as_integer()
                .and_then(|n| n.to_u32())
                .filter(|n| (2..=MAX_EXPANDED_POWER).contains(n));

            match (&base, power) {
                (SymExpr::Add(base_terms), Some(power)) => {
                    let mut terms = base_terms.clone();
                    for _ in 1..power {
                        match multiply_terms(&terms, base_terms) {
                            Some(product) => terms = product,
                            None => return base.pow(exp),
                        }
                    }
                    SymExpr::Add(terms)
                },
                _ => base.pow(exp),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse, simplify};
    use super::*;

    fn expanded(input: &str) -> String {
        simplify(&expand(&parse(input).unwrap())).to_string()
    }

    #[test]
    fn square_of_sum() {
        assert_eq!(expanded("(x + 1)^2 - (x^2 + 2*x + 1)"), "0");
    }

    #[test]
    fn nested_products() {
        assert_eq!(expanded("2*(x + 1)*(x - 3)"), "2*x^2 - 4*x - 6");
    }

    #[test]
    fn negative_powers_untouched() {
        let expr = parse("(x + 1)^(-1)").unwrap();
        assert_eq!(expand(&expr), expr);
    }
}
