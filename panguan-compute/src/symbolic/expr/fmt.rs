//! Plain-text formatting of expressions.
//!
//! The output is valid input for the parser, and parsing it produces a strictly equal expression
//! (up to the order of terms and factors). Sums print negative terms with ` - `, and products
//! print factors with negative exponents as a denominator, such as `2*x/3` or `1/(x + 1)`.

use rug::{Float, Rational};
use std::{cmp::Ordering, fmt::{self, Display, Formatter}};
use super::{Constant, Primary, SymExpr};

/// Formats a float so that it is read back as a float: integral values keep a `.0` suffix.
pub(crate) fn format_float(f: &Float) -> String {
    let value = f.to_f64();
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rational(r) => write!(f, "{}", r),
            Self::Float(num) => write!(f, "{}", format_float(num)),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Constant(c) => write!(f, "{}", c.name()),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// If the term has a negative numeric coefficient, returns the term with the coefficient negated,
/// so that it can be printed after a minus sign.
pub(crate) fn negated_term(term: &SymExpr) -> Option<SymExpr> {
    match term {
        SymExpr::Primary(Primary::Rational(_) | Primary::Float(_)) if term.is_negative_number() => {
            Some(-term.clone())
        },
        SymExpr::Mul(factors) => {
            let idx = factors.iter().position(SymExpr::is_number)?;
            if !factors[idx].is_negative_number() {
                return None;
            }

            let mut factors = factors.clone();
            let positive = -factors.remove(idx);
            if !positive.is_one() {
                factors.insert(idx, positive);
            }
            Some(SymExpr::Mul(factors).downgrade())
        },
        _ => None,
    }
}

/// Returns true if the expression needs parentheses when it is the base of a power.
fn needs_parens_as_base(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Rational(r)) => {
            r.cmp0() == Ordering::Less || *r.denom() != 1
        },
        SymExpr::Primary(Primary::Float(_)) => expr.is_negative_number(),
        SymExpr::Primary(_) => false,
        SymExpr::Add(_) | SymExpr::Mul(_) => true,
        SymExpr::Exp(base, exp) => {
            !(base.is_constant(Constant::E) || is_half(exp))
        },
    }
}

/// Returns true if the expression needs parentheses when it is an exponent.
fn needs_parens_as_exponent(expr: &SymExpr) -> bool {
    match expr {
        SymExpr::Primary(Primary::Rational(r)) => {
            r.cmp0() == Ordering::Less || *r.denom() != 1
        },
        SymExpr::Primary(Primary::Float(_)) => expr.is_negative_number(),
        SymExpr::Primary(_) => false,
        _ => true,
    }
}

fn is_half(expr: &SymExpr) -> bool {
    expr.as_rational().map(|r| *r == Rational::from((1, 2))).unwrap_or(false)
}

/// Writes a term of a sum that follows a sign, wrapping sums in parentheses.
fn term_string(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Add(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Writes a factor of a product, wrapping sums and products in parentheses.
fn factor_string(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Add(_) | SymExpr::Mul(_) => format!("({})", expr),
        _ => expr.to_string(),
    }
}

/// Writes the base and exponent of a power with a non-negative exponent.
fn power_string(base: &SymExpr, exp: &SymExpr) -> String {
    if exp.is_one() {
        return factor_string(base);
    }

    if is_half(exp) {
        return format!("sqrt({})", base);
    }

    if base.is_constant(Constant::E) {
        return format!("exp({})", exp);
    }

    let base = if needs_parens_as_base(base) {
        format!("({})", base)
    } else {
        base.to_string()
    };
    let exp = if needs_parens_as_exponent(exp) {
        format!("({})", exp)
    } else {
        exp.to_string()
    };
    format!("{}^{}", base, exp)
}

/// Writes a product of factors as a numerator and denominator.
fn product_string(factors: &[SymExpr]) -> String {
    let mut coefficient = Rational::from(1);
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Rational(r)) => coefficient *= r,
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                denom.push(power_string(base, &-(**exp).clone()));
            },
            other => numer.push(factor_string(other)),
        }
    }

    let negative = coefficient.cmp0() == Ordering::Less;
    let numer_coeff = coefficient.numer().clone().abs();
    if numer_coeff != 1 || numer.is_empty() {
        numer.insert(0, numer_coeff.to_string());
    }
    if *coefficient.denom() != 1 {
        denom.insert(0, coefficient.denom().to_string());
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&numer.join("*"));
    match denom.len() {
        0 => {},
        1 => {
            out.push('/');
            out.push_str(&denom[0]);
        },
        _ => {
            out.push_str("/(");
            out.push_str(&denom.join("*"));
            out.push(')');
        },
    }
    out
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    match (i, negated_term(term)) {
                        (0, None) => write!(f, "{}", term)?,
                        (0, Some(positive)) => write!(f, "-{}", term_string(&positive))?,
                        (_, None) => write!(f, " + {}", term)?,
                        (_, Some(positive)) => write!(f, " - {}", term_string(&positive))?,
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => write!(f, "{}", product_string(factors)),
            Self::Exp(base, exp) => {
                if exp.is_negative_number() {
                    write!(f, "{}", product_string(std::slice::from_ref(self)))
                } else {
                    write!(f, "{}", power_string(base, exp))
                }
            },
        }
    }
}
