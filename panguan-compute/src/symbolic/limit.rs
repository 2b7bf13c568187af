//! Limits of expressions.
//!
//! [`limit`] first tries direct substitution. When other symbols remain after substituting and
//! the result is undefined, as in `sin(a*x)/x` at `0`, L'Hôpital's rule is applied to the `0/0`
//! form instead. If the expression cannot be evaluated at the point (a `0/0` form, a logarithm
//! of zero, or an infinite point), the variable is moved towards the point in a sequence of
//! high-precision numeric samples. If the samples converge, the limit is
//! recognized as a small rational, a rational multiple of `E` or `pi`, or left as a float. If
//! they grow without bound, the limit is `oo` or `-oo`.
//!
//! Finite points are approached from the right.

use crate::{
    approx::approximate_rational,
    consts::{E, PI},
    error::{kind, Error},
    numerical::{eval, Ctxt},
    primitive::float,
};
use rug::{ops::Pow, Float};
use super::{
    derivative::derivative,
    expr::{Constant, SymExpr},
    simplify::simplify,
};
use tracing::debug;

/// The exponents `k` used to build the sample offsets `10^k` (towards infinity) and `10^-k`
/// (towards a finite point).
const SAMPLE_EXPONENTS: [u32; 4] = [10, 20, 30, 40];

/// Consecutive samples closer than this are considered converged.
const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Samples larger than this, and still growing, are considered divergent.
const DIVERGENCE_THRESHOLD: f64 = 1e12;

/// How many times L'Hôpital's rule may be applied to one limit.
const MAX_LHOPITAL_STEPS: usize = 3;

/// Where the variable is heading.
enum Approach {
    PositiveInfinity,
    NegativeInfinity,
    Finite(Float),
}

impl Approach {
    /// The `k`th sample point.
    fn sample(&self, k: u32) -> Float {
        let offset = float(10).pow(k);
        match self {
            Self::PositiveInfinity => offset,
            Self::NegativeInfinity => -offset,
            Self::Finite(point) => float(point + offset.recip()),
        }
    }
}

/// Recognizes a converged numeric value as an exact expression where possible.
fn identify(value: &Float) -> SymExpr {
    if value.clone().abs() < 1e-20 {
        return SymExpr::int(0);
    }

    if let Some(r) = approximate_rational(value, 1000, CONVERGENCE_TOLERANCE) {
        return SymExpr::from(r);
    }

    for constant in [Constant::E, Constant::Pi] {
        let constant_value = match constant {
            Constant::E => float(&*E),
            _ => float(&*PI),
        };
        if let Some(r) = approximate_rational(&float(value / &constant_value), 1000, CONVERGENCE_TOLERANCE) {
            let multiple = SymExpr::from(r) * SymExpr::constant(constant);
            return simplify(&multiple);
        }
    }

    SymExpr::from(value.clone())
}

/// Splits a product into a numerator and a denominator. The denominator collects the factors
/// raised to negative numeric powers.
fn as_fraction(expr: &SymExpr) -> (SymExpr, SymExpr) {
    let factors = match expr {
        SymExpr::Mul(factors) => factors.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                denom.push((**base).clone().pow(-(**exp).clone()));
            },
            other => numer.push(other.clone()),
        }
    }
    (SymExpr::Mul(numer).downgrade(), SymExpr::Mul(denom).downgrade())
}

/// `lim f/g = lim f'/g'` when `f` and `g` both vanish at the point.
///
/// Returns [`None`] if the form is not `0/0`, if it diverges (`c/0` for nonzero `c`), or if it
/// is still indeterminate after [`MAX_LHOPITAL_STEPS`] applications.
fn by_lhopital(expr: &SymExpr, var: &str, point: &SymExpr) -> Option<SymExpr> {
    let (mut numer, mut denom) = as_fraction(expr);
    for _ in 0..MAX_LHOPITAL_STEPS {
        let numer_at = simplify(&numer.substitute(var, point));
        let denom_at = simplify(&denom.substitute(var, point));
        if numer_at.divides_by_zero() || denom_at.divides_by_zero() {
            return None;
        }

        if !denom_at.is_zero() {
            let value = simplify(&(numer_at / denom_at));
            return (!value.divides_by_zero()).then_some(value);
        }
        if !numer_at.is_zero() {
            return None;
        }

        numer = simplify(&derivative(&numer, var).ok()?);
        denom = simplify(&derivative(&denom, var).ok()?);
        debug!(numer = %numer, denom = %denom, "applied L'Hôpital's rule");
    }
    None
}

/// Computes the limit of `expr` as `var` approaches `point`. The point may be `oo` or `-oo`.
///
/// ```
/// use panguan_compute::symbolic::{limit, parse};
///
/// let expr = parse("sin(x)/x").unwrap();
/// let point = parse("0").unwrap();
/// assert_eq!(limit(&expr, "x", &point).unwrap().to_string(), "1");
/// ```
pub fn limit(expr: &SymExpr, var: &str, point: &SymExpr) -> Result<SymExpr, Error> {
    let not_found = || Error::spanless(kind::LimitNotFound {
        expr: expr.to_string(),
        var: var.to_owned(),
        point: point.to_string(),
    });

    let expr = simplify(expr);
    let point = simplify(point);
    if !expr.contains_symbol(var) {
        return Ok(expr);
    }

    let infinity = SymExpr::constant(Constant::Infinity);
    let approach = if point == infinity {
        Approach::PositiveInfinity
    } else if point.negated_if_negative().as_ref() == Some(&infinity) {
        Approach::NegativeInfinity
    } else {
        // direct substitution, checked numerically before simplifying so that forms like `0/0`
        // are not cancelled away
        let substituted = expr.substitute(var, &point);
        if !substituted.free_symbols().is_empty() {
            let value = simplify(&substituted);
            if !value.divides_by_zero() && !value.contains(&infinity) {
                return Ok(value);
            }
            return by_lhopital(&expr, var, &point).ok_or_else(not_found);
        }
        if eval(&substituted, &Ctxt::default()).is_ok() {
            return Ok(simplify(&substituted));
        }

        let point_value = eval(&point, &Ctxt::default()).map_err(|_| not_found())?;
        Approach::Finite(point_value)
    };

    if expr.free_symbols().len() > 1 {
        return Err(not_found());
    }

    let mut samples = Vec::with_capacity(SAMPLE_EXPONENTS.len());
    for k in SAMPLE_EXPONENTS {
        let ctxt = Ctxt::new().with_var(var, approach.sample(k));
        let value = eval(&expr, &ctxt).map_err(|err| {
            debug!(expr = %expr, var, k, "sample failed: {}", err.message());
            not_found()
        })?;
        samples.push(value);
    }

    let [.., second_last, last] = samples.as_slice() else {
        return Err(not_found());
    };

    let difference = float(last - second_last).abs();
    let scale = last.to_f64().abs().clamp(1.0, DIVERGENCE_THRESHOLD);
    if difference < CONVERGENCE_TOLERANCE * scale {
        return Ok(identify(last));
    }

    let growing = samples.windows(2)
        .all(|pair| pair[1].clone().abs() > pair[0].clone().abs()
            && pair[1].is_sign_negative() == pair[0].is_sign_negative());
    if growing && last.clone().abs() > DIVERGENCE_THRESHOLD {
        return Ok(if last.is_sign_negative() { -infinity } else { infinity });
    }

    debug!(expr = %expr, var, point = %point, "samples did not converge");
    Err(not_found())
}
