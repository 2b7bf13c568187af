use rug::{Float, Integer, Rational};
use std::cmp::Ordering;
use super::primitive::float;

/// Computes the [`Rational`] from the continued fraction form of a float.
fn rational_from_continued_fraction(continued_fraction_form: &[Integer]) -> Rational {
    let mut rational = Rational::new();
    for (i, integer) in continued_fraction_form.iter().rev().enumerate() {
        if i == 0 {
            if integer.cmp0() == Ordering::Equal {
                continue;
            }
            rational += Rational::from((Integer::from(1), integer.clone()));
        } else {
            rational = (rational + integer).recip();
        }
    }

    if rational.cmp0() == Ordering::Equal {
        rational
    } else {
        rational.recip()
    }
}

/// Approximates the given float as a rational fraction whose denominator is at most
/// `max_denom`, accepting the approximation only if it is within `tolerance` of the float.
///
/// This applies the continued fraction algorithm, stopping as soon as a convergent is close
/// enough or the next convergent would exceed the denominator limit.
///
/// See
/// [Wikipedia](https://en.wikipedia.org/wiki/Continued_fraction#Calculating_continued_fraction_representations)
/// for more information.
pub fn approximate_rational(n: &Float, max_denom: u32, tolerance: f64) -> Option<Rational> {
    if !n.is_finite() {
        return None;
    }

    let orig = n;
    let mut continued_fraction_form = Vec::new();
    let mut n = n.clone();

    // a float has finitely many terms, but cap the loop in case of rounding noise
    for _ in 0..64 {
        let (integer, fractional) = n.trunc_fract(float(0));
        continued_fraction_form.push(integer.to_integer()?);

        let rational = rational_from_continued_fraction(&continued_fraction_form);
        if *rational.denom() > max_denom {
            return None;
        }

        let error = float(orig - rational.clone()).abs();
        if fractional.is_zero() || error < tolerance {
            return Some(rational);
        }

        n = fractional.recip();
    }

    None
}

#[cfg(test)]
mod tests {
    use crate::primitive::rational;
    use super::*;

    #[test]
    fn one_third() {
        let third = float(1) / float(3);
        assert_eq!(approximate_rational(&third, 1000, 1e-30), Some(rational(1, 3)));
    }

    #[test]
    fn negative_fraction() {
        let value = float(-7) / float(4);
        assert_eq!(approximate_rational(&value, 1000, 1e-30), Some(rational(-7, 4)));
    }

    #[test]
    fn irrational_is_rejected() {
        let root = float(2).sqrt();
        assert_eq!(approximate_rational(&root, 1000, 1e-30), None);
    }
}
