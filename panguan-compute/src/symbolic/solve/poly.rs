//! Roots of polynomials.

use crate::primitive::int;
use crate::symbolic::{
    expand::expand,
    expr::{Primary, SymExpr},
    simplify::simplify,
};
use rug::{Integer, Rational};
use std::cmp::Ordering;
use super::{is_var, numeric_sign, real_roots_of_power};

/// The largest degree that is treated as a polynomial.
const MAX_DEGREE: usize = 64;

/// The largest constant or leading coefficient whose divisors are searched for rational roots.
const MAX_ROOT_SEARCH: u64 = 1_000_000;

/// Returns the degree of `factor` in `var` if it is `var` or `var^n` for a non-negative integer
/// `n`, `0` if it does not depend on `var` at all, or [`None`] otherwise.
fn factor_degree(factor: &SymExpr, var: &str) -> Option<usize> {
    if is_var(factor, var) {
        return Some(1);
    }
    if !factor.contains_symbol(var) {
        return Some(0);
    }

    match factor {
        SymExpr::Exp(base, exp) if is_var(base, var) => exp.as_integer()
            .and_then(Integer::to_usize)
            .filter(|n| *n <= MAX_DEGREE),
        _ => None,
    }
}

/// Returns the coefficients of `expr` as a polynomial in `var`, indexed by degree, or [`None`] if
/// it is not a polynomial. Trailing zero coefficients are removed.
pub(super) fn coefficients(expr: &SymExpr, var: &str) -> Option<Vec<SymExpr>> {
    fn terms_of(expr: SymExpr) -> Vec<SymExpr> {
        match expr {
            SymExpr::Add(terms) => terms,
            other => vec![other],
        }
    }

    // each term is simplified on its own, since simplifying the whole sum could fold it back
    // into a product
    let terms = terms_of(expand(expr))
        .iter()
        .flat_map(|term| terms_of(simplify(term)))
        .collect::<Vec<_>>();

    let mut coefficients: Vec<SymExpr> = Vec::new();
    for term in terms {
        let factors = match term {
            SymExpr::Mul(factors) => factors,
            other => vec![other],
        };

        let mut degree = 0;
        let mut coefficient = Vec::new();
        for factor in factors {
            match factor_degree(&factor, var)? {
                0 => coefficient.push(factor),
                n => degree += n,
            }
        }

        if coefficients.len() <= degree {
            coefficients.resize(degree + 1, SymExpr::int(0));
        }
        coefficients[degree] = coefficients[degree].clone() + SymExpr::Mul(coefficient).downgrade();
    }

    let mut coefficients = coefficients.iter().map(simplify).collect::<Vec<_>>();
    while coefficients.last().is_some_and(SymExpr::is_zero) {
        coefficients.pop();
    }
    Some(coefficients)
}

/// `-b / a`
fn linear_root(coefficients: &[SymExpr]) -> SymExpr {
    simplify(&(-coefficients[0].clone() / coefficients[1].clone()))
}

/// The quadratic formula. The root with the negative square root comes first.
fn quadratic_roots(coefficients: &[SymExpr]) -> Vec<SymExpr> {
    let (c, b, a) = (&coefficients[0], &coefficients[1], &coefficients[2]);
    let discriminant = simplify(&(
        b.clone().pow(SymExpr::int(2)) - SymExpr::int(4) * a.clone() * c.clone()
    ));

    let two_a = SymExpr::int(2) * a.clone();
    let vertex = -b.clone() / two_a.clone();
    match numeric_sign(&discriminant) {
        Some(Ordering::Less) => Vec::new(),
        Some(Ordering::Equal) => vec![simplify(&vertex)],
        _ => {
            let offset = discriminant.sqrt() / two_a;
            vec![
                simplify(&(vertex.clone() - offset.clone())),
                simplify(&(vertex + offset)),
            ]
        },
    }
}

/// Returns the positive divisors of `n`, or [`None`] if `n` is too large to search.
fn divisors(n: &Integer) -> Option<Vec<u64>> {
    let n = n.to_u64().filter(|n| *n <= MAX_ROOT_SEARCH)?;
    let mut divisors = Vec::new();
    let mut i = 1;
    while i * i <= n {
        if n % i == 0 {
            divisors.push(i);
            if i != n / i {
                divisors.push(n / i);
            }
        }
        i += 1;
    }
    Some(divisors)
}

/// Evaluates the polynomial at `x` with Horner's method.
fn horner(coefficients: &[Rational], x: &Rational) -> Rational {
    coefficients.iter()
        .rev()
        .fold(Rational::new(), |acc, c| acc * x + c)
}

/// Divides the polynomial by `x - root`, discarding the remainder.
fn deflate(coefficients: &[Rational], root: &Rational) -> Vec<Rational> {
    let degree = coefficients.len() - 1;
    let mut quotient = vec![Rational::new(); degree];
    let mut carry = Rational::new();
    for k in (1..=degree).rev() {
        carry = coefficients[k].clone() + root.clone() * carry;
        quotient[k - 1] = carry.clone();
    }
    quotient
}

/// Finds the rational roots of a polynomial with rational coefficients and a nonzero constant
/// term, using the rational root theorem. Returns the roots found and the polynomial left after
/// dividing them out.
fn rational_roots(mut coefficients: Vec<Rational>) -> Option<(Vec<Rational>, Vec<Rational>)> {
    let lcm = coefficients.iter().fold(int(1), |acc, c| acc.lcm(c.denom()));
    let scaled = coefficients.iter()
        .map(|c| (c.clone() * Rational::from(lcm.clone())).numer().clone().abs())
        .collect::<Vec<_>>();
    let constant_divisors = divisors(scaled.first()?)?;
    let leading_divisors = divisors(scaled.last()?)?;

    let mut candidates = Vec::new();
    for p in &constant_divisors {
        for q in &leading_divisors {
            let candidate = Rational::from((int(*p), int(*q)));
            if !candidates.contains(&candidate) {
                candidates.push(Rational::from(-&candidate));
                candidates.push(candidate);
            }
        }
    }

    let mut roots = Vec::new();
    for candidate in candidates {
        while coefficients.len() > 1 && horner(&coefficients, &candidate).cmp0() == Ordering::Equal {
            coefficients = deflate(&coefficients, &candidate);
            if !roots.contains(&candidate) {
                roots.push(candidate.clone());
            }
        }
    }

    Some((roots, coefficients))
}

/// Solves a polynomial of degree at most 2, or a binomial `a*x^n + b`.
fn solve_small(coefficients: &[SymExpr]) -> Option<Vec<SymExpr>> {
    match coefficients.len() {
        0 | 1 => Some(Vec::new()),
        2 => Some(vec![linear_root(coefficients)]),
        3 => Some(quadratic_roots(coefficients)),
        n => {
            let is_binomial = coefficients[1..n - 1].iter().all(SymExpr::is_zero);
            if !is_binomial {
                return None;
            }

            let degree = SymExpr::from(int(n - 1));
            let rhs = simplify(&(-coefficients[0].clone() / coefficients[n - 1].clone()));
            Some(real_roots_of_power(&rhs, &degree).iter().map(simplify).collect())
        },
    }
}

/// Finds the roots of the polynomial with the given coefficients, indexed by degree.
pub(super) fn roots(coefficients: &[SymExpr]) -> Option<Vec<SymExpr>> {
    let mut roots = Vec::new();

    // factor out powers of the variable
    let zeros = coefficients.iter().take_while(|c| c.is_zero()).count();
    if zeros > 0 {
        roots.push(SymExpr::int(0));
    }
    let coefficients = &coefficients[zeros..];

    if let Some(small) = solve_small(coefficients) {
        roots.extend(small);
        return Some(roots);
    }

    let rational = coefficients.iter()
        .map(|c| match c {
            SymExpr::Primary(Primary::Rational(r)) => Some(r.clone()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    let (rational_roots, remaining) = rational_roots(rational)?;
    roots.extend(rational_roots.into_iter().map(SymExpr::from));

    let remaining = remaining.into_iter().map(SymExpr::from).collect::<Vec<_>>();
    roots.extend(solve_small(&remaining)?);
    Some(roots)
}

#[cfg(test)]
mod tests {
    use crate::primitive::rational;
    use crate::symbolic::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn extract_coefficients() {
        let coefficients = coefficients(&parse("3*x^2 - 2*x*(x + 1) + 5").unwrap(), "x").unwrap();
        let printed = coefficients.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(printed, ["5", "-2", "1"]);
    }

    #[test]
    fn symbolic_coefficients() {
        let coefficients = coefficients(&parse("a*x^2 + b*x + a*x").unwrap(), "x").unwrap();
        let printed = coefficients.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(printed, ["0", "a + b", "a"]);
    }

    #[test]
    fn not_polynomials() {
        assert!(coefficients(&parse("sin(x) + 1").unwrap(), "x").is_none());
        assert!(coefficients(&parse("x^(1/2)").unwrap(), "x").is_none());
        assert!(coefficients(&parse("2^x").unwrap(), "x").is_none());
    }

    #[test]
    fn deflation() {
        // x^2 - 3x + 2 = (x - 1)(x - 2)
        let coefficients = [rational(2, 1), rational(-3, 1), rational(1, 1)];
        assert_eq!(horner(&coefficients, &rational(1, 1)), 0);
        assert_eq!(deflate(&coefficients, &rational(1, 1)), vec![rational(-2, 1), rational(1, 1)]);
    }
}
