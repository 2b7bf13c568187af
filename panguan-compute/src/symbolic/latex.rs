//! Rendering expressions as LaTeX.
//!
//! The output follows the conventions of common computer algebra systems: fractions are written
//! with `\frac`, function arguments are wrapped in `\left( \right)`, and factors of a product are
//! separated by spaces.

use crate::symbolic::expr::{fmt::format_float, Constant, Primary, SymExpr};
use rug::Rational;
use std::cmp::Ordering;

/// Functions that have their own LaTeX command.
const NAMED_FUNCTIONS: [&str; 9] = ["sin", "cos", "tan", "cot", "sec", "csc", "sinh", "cosh", "tanh"];

fn constant_latex(constant: Constant) -> &'static str {
    match constant {
        Constant::Pi => r"\pi",
        Constant::E => "e",
        Constant::I => "i",
        Constant::Infinity => r"\infty",
    }
}

fn call_latex(name: &str, args: &[SymExpr]) -> String {
    let args = args.iter().map(to_latex).collect::<Vec<_>>().join(", ");
    match name {
        "abs" => format!(r"\left|{}\right|", args),
        "ln" => format!(r"\log{{\left({} \right)}}", args),
        name if NAMED_FUNCTIONS.contains(&name) => format!(r"\{}{{\left({} \right)}}", name, args),
        name => format!(r"\operatorname{{{}}}{{\left({} \right)}}", name, args),
    }
}

fn rational_latex(r: &Rational) -> String {
    let sign = if r.cmp0() == Ordering::Less { "- " } else { "" };
    if *r.denom() == 1 {
        r.to_string()
    } else {
        format!(r"{}\frac{{{}}}{{{}}}", sign, r.numer().clone().abs(), r.denom())
    }
}

fn primary_latex(primary: &Primary) -> String {
    match primary {
        Primary::Rational(r) => rational_latex(r),
        Primary::Float(f) => format_float(f),
        Primary::Symbol(name) => name.clone(),
        Primary::Constant(c) => constant_latex(*c).to_owned(),
        Primary::Call(name, args) => call_latex(name, args),
    }
}

/// Wraps the rendered expression in `\left( \right)`.
fn paren(inner: String) -> String {
    format!(r"\left({}\right)", inner)
}

/// Renders a power whose exponent is not a negative number.
fn power_latex(base: &SymExpr, exp: &SymExpr) -> String {
    if exp.is_one() {
        return factor_latex(base);
    }

    if let Some(r) = exp.as_rational() {
        if *r.numer() == 1 {
            return match r.denom().to_u32() {
                Some(2) => format!(r"\sqrt{{{}}}", to_latex(base)),
                Some(_) => format!(r"\sqrt[{}]{{{}}}", r.denom(), to_latex(base)),
                None => format!("{}^{{{}}}", base_latex(base), to_latex(exp)),
            };
        }
    }

    if base.is_constant(Constant::E) {
        return format!("e^{{{}}}", to_latex(exp));
    }

    format!("{}^{{{}}}", base_latex(base), to_latex(exp))
}

fn base_latex(base: &SymExpr) -> String {
    match base {
        SymExpr::Primary(Primary::Rational(r)) if r.cmp0() == Ordering::Less || *r.denom() != 1 => {
            paren(to_latex(base))
        },
        SymExpr::Primary(_) => to_latex(base),
        _ => paren(to_latex(base)),
    }
}

/// Renders a factor of a product, wrapping sums in parentheses.
fn factor_latex(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Add(_) => paren(to_latex(expr)),
        _ => to_latex(expr),
    }
}

/// Renders the factors on one side of a fraction bar. A lone factor needs no parentheses, since
/// the fraction bar already groups it.
fn side_latex(parts: &[SymExpr], alone: bool) -> Vec<String> {
    match parts {
        [single] if alone => vec![to_latex(single)],
        parts => parts.iter().map(factor_latex).collect(),
    }
}

fn product_latex(factors: &[SymExpr]) -> String {
    let mut coefficient = Rational::from(1);
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Rational(r)) => coefficient *= r,
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                let positive = -(**exp).clone();
                if positive.is_one() {
                    denom.push((**base).clone());
                } else {
                    denom.push((**base).clone().pow(positive));
                }
            },
            other => numer.push(other.clone()),
        }
    }

    let negative = coefficient.cmp0() == Ordering::Less;
    let numer_coeff = coefficient.numer().clone().abs();
    let in_fraction = !denom.is_empty() || *coefficient.denom() != 1;

    let mut numer = side_latex(&numer, in_fraction && numer_coeff == 1);
    let mut denom = side_latex(&denom, *coefficient.denom() == 1);
    if numer_coeff != 1 || numer.is_empty() {
        numer.insert(0, numer_coeff.to_string());
    }
    if *coefficient.denom() != 1 {
        denom.insert(0, coefficient.denom().to_string());
    }

    let body = if denom.is_empty() {
        numer.join(" ")
    } else {
        format!(r"\frac{{{}}}{{{}}}", numer.join(" "), denom.join(" "))
    };
    if negative {
        format!("- {}", body)
    } else {
        body
    }
}

/// Renders the expression as LaTeX.
///
/// ```
/// use panguan_compute::symbolic::{latex::to_latex, parse, simplify};
///
/// let expr = simplify(&parse("x^3/3 + sqrt(x)").unwrap());
/// assert_eq!(to_latex(&expr), r"\frac{x^{3}}{3} + \sqrt{x}");
/// ```
pub fn to_latex(expr: &SymExpr) -> String {
    match expr {
        SymExpr::Primary(primary) => primary_latex(primary),
        SymExpr::Add(terms) => {
            let mut out = String::new();
            for (i, term) in terms.iter().enumerate() {
                match (i, term.negated_if_negative()) {
                    (0, None) => out.push_str(&to_latex(term)),
                    (0, Some(positive)) => {
                        out.push_str("- ");
                        out.push_str(&factor_latex(&positive));
                    },
                    (_, None) => {
                        out.push_str(" + ");
                        out.push_str(&to_latex(term));
                    },
                    (_, Some(positive)) => {
                        out.push_str(" - ");
                        out.push_str(&factor_latex(&positive));
                    },
                }
            }
            out
        },
        SymExpr::Mul(factors) => product_latex(factors),
        SymExpr::Exp(_, exp) if exp.is_negative_number() => {
            product_latex(std::slice::from_ref(expr))
        },
        SymExpr::Exp(base, exp) => power_latex(base, exp),
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn latex(input: &str) -> String {
        to_latex(&simplify(&parse(input).unwrap()))
    }

    #[test]
    fn numbers() {
        assert_eq!(latex("1/3"), r"\frac{1}{3}");
        assert_eq!(latex("-2/4"), r"- \frac{1}{2}");
        assert_eq!(latex("7"), "7");
    }

    #[test]
    fn polynomials() {
        assert_eq!(latex("x^2 - 5*x + 6"), "x^{2} - 5 x + 6");
        assert_eq!(latex("x^3/3"), r"\frac{x^{3}}{3}");
    }

    #[test]
    fn functions() {
        assert_eq!(latex("sin(x)"), r"\sin{\left(x \right)}");
        assert_eq!(latex("ln(x)"), r"\log{\left(x \right)}");
        assert_eq!(latex("exp(2*x)"), "e^{2 x}");
        assert_eq!(latex("abs(x)"), r"\left|x\right|");
        assert_eq!(latex("atan(x)"), r"\operatorname{atan}{\left(x \right)}");
    }

    #[test]
    fn roots_and_powers() {
        assert_eq!(latex("sqrt(2)"), r"\sqrt{2}");
        assert_eq!(latex("x^(1/3)"), r"\sqrt[3]{x}");
        assert_eq!(latex("(x + 1)^2"), r"\left(x + 1\right)^{2}");
        assert_eq!(latex("1/(x + 1)"), r"\frac{1}{x + 1}");
    }

    #[test]
    fn constants() {
        assert_eq!(latex("pi"), r"\pi");
        assert_eq!(latex("oo"), r"\infty");
        assert_eq!(latex("-oo"), r"- \infty");
        assert_eq!(latex("E"), "e");
    }
}
