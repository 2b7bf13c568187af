//! A representation of mathematical expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](panguan_parser::parser::ast::Expr) type from `panguan_parser` is a recursive
//! `enum` that represents the AST of a mathematical expression. It's convenient for parsing, but
//! not so much for algebraic manipulation.
//!
//! This module defines [`SymExpr`], which flattens the AST into lists of terms and factors. The
//! expression `x + (y + z)` is a single [`SymExpr::Add`] node with _three_ children. Subtraction
//! is stored as addition of a term multiplied by `-1`, and division as multiplication by a power
//! with exponent `-1`.
//!
//! # Strict equality
//!
//! The [`PartialEq`] implementation for [`SymExpr`] implements **strict equality**: two
//! expressions are strictly equal if they are the same kind of node, with strictly equal children.
//! The terms of an [`SymExpr::Add`] and the factors of a [`SymExpr::Mul`] may appear in any
//! order.
//!
//! Strict equality is a subset of semantic equality. `x^2 + 2x + 1` and `(x + 1)^2` are equal
//! mathematically, but not strictly. Strict equality never reports false positives, and is cheap
//! to compute, which makes it suitable for deciding whether like terms can be combined.

pub(crate) mod fmt;
mod iter;
pub mod order;

use crate::{
    error::{kind, Error},
    primitive::{float_from_str, int, int_from_str},
};
use panguan_parser::parser::{
    ast::{Expr as AstExpr, Literal, LitNum},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{Float, Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, Div, Mul, Neg, Sub}};

pub use iter::ExprIter;

/// A mathematical constant with a dedicated symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// Archimedes' constant, written `pi` or `π`.
    Pi,

    /// Euler's number, written `E`.
    E,

    /// The imaginary unit, written `I`.
    I,

    /// Positive infinity, written `oo` or `∞`.
    Infinity,
}

impl Constant {
    /// Returns the constant named by the given symbol, if there is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "E" => Some(Self::E),
            "I" => Some(Self::I),
            "oo" => Some(Self::Infinity),
            _ => None,
        }
    }

    /// The name used to print the constant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "E",
            Self::I => "I",
            Self::Infinity => "oo",
        }
    }
}

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An exact rational number, such as `2`, `144` or `1/3`.
    Rational(Rational),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(Float),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A named constant, such as `pi`.
    Constant(Constant),

    /// A function call, such as `sin(x)`.
    Call(String, Vec<SymExpr>),
}

/// This module **must never** produce `NaN` [`Float`]s, which would break reflexivity.
impl Eq for Primary {}

/// A mathematical expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// Returns true if both slices contain strictly equal elements, in any order.
fn same_elements(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .find(|(idx, other)| !used[*idx] && item == *other)
            .map(|(idx, _)| idx);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                same_elements(lhs, rhs)
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl SymExpr {
    /// Creates an integer expression.
    pub fn int(n: i64) -> Self {
        Self::Primary(Primary::Rational(Rational::from(int(n))))
    }

    /// Creates an exact fraction. The denominator must not be zero.
    pub fn frac(numer: i64, denom: i64) -> Self {
        Self::Primary(Primary::Rational(Rational::from((int(numer), int(denom)))))
    }

    /// Creates a symbol with the given name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates one of the named constants.
    pub fn constant(constant: Constant) -> Self {
        Self::Primary(Primary::Constant(constant))
    }

    /// Creates a call to the named function.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// Raises this expression to the given power. No simplification is done.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns the square root of this expression. No simplification is done.
    pub fn sqrt(self) -> Self {
        self.pow(Self::frac(1, 2))
    }

    /// Returns the reciprocal of this expression. Nonzero rationals are inverted directly.
    pub fn recip(self) -> Self {
        match self {
            Self::Primary(Primary::Rational(r)) if r.cmp0() != std::cmp::Ordering::Equal => {
                Self::Primary(Primary::Rational(r.recip()))
            },
            other => other.pow(Self::int(-1)),
        }
    }

    /// If the expression is a [`Primary::Rational`], returns a reference to the contained number.
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Rational(r)) => Some(r),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Rational`] with a denominator of 1, returns the numerator.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_rational()
            .filter(|r| *r.denom() == 1)
            .map(|r| r.numer())
    }

    /// If the expression is a [`Primary::Float`], returns a reference to the contained float.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(f)) => Some(f),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Symbol`], returns the name of the symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Constant`], returns the constant.
    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Self::Primary(Primary::Constant(c)) => Some(*c),
            _ => None,
        }
    }

    /// If the expression is a call to the named function with one argument, returns the argument.
    pub fn as_call1(&self, name: &str) -> Option<&SymExpr> {
        match self {
            Self::Primary(Primary::Call(target, args)) if target == name && args.len() == 1 => {
                Some(&args[0])
            },
            _ => None,
        }
    }

    /// Returns true if the expression is a number, either rational or floating-point.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Primary(Primary::Rational(_) | Primary::Float(_)))
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// Returns true if the expression is the exact number 0.
    pub fn is_zero(&self) -> bool {
        self.as_rational().map(|r| r.cmp0() == std::cmp::Ordering::Equal).unwrap_or(false)
    }

    /// Returns true if the expression is the exact number 1.
    pub fn is_one(&self) -> bool {
        self.as_rational().map(|r| *r == 1).unwrap_or(false)
    }

    /// Returns true if the expression is the given constant.
    pub fn is_constant(&self, constant: Constant) -> bool {
        self.as_constant() == Some(constant)
    }

    /// Returns true if the expression is a negative number.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Primary(Primary::Rational(r)) => r.cmp0() == std::cmp::Ordering::Less,
            Self::Primary(Primary::Float(f)) => f.is_sign_negative() && !f.is_zero(),
            _ => false,
        }
    }

    /// If the expression is a negative number or a product with a negative numeric coefficient,
    /// returns its negation, such as `-2*x` -> `2*x`.
    pub fn negated_if_negative(&self) -> Option<SymExpr> {
        fmt::negated_term(self)
    }

    /// Returns true if the given symbol appears anywhere in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if the expression contains the given subexpression.
    pub fn contains(&self, target: &SymExpr) -> bool {
        self.post_order_iter().any(|expr| expr == target)
    }

    /// Returns true if the expression contains the imaginary unit.
    pub fn contains_imaginary(&self) -> bool {
        self.post_order_iter().any(|expr| expr.is_constant(Constant::I))
    }

    /// Returns true if a zero is raised to a negative power anywhere in the expression, such as
    /// the `0^-1` that `1/0` parses to.
    pub fn divides_by_zero(&self) -> bool {
        self.post_order_iter().any(|expr| matches!(
            expr,
            Self::Exp(base, exp) if base.is_zero() && exp.is_negative_number()
        ))
    }

    /// Returns the names of the symbols that appear in the expression, in lexicographic order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(|expr| expr.as_symbol().map(str::to_owned))
            .collect()
    }

    /// Replaces every occurrence of `target` with `replacement`. Replacement happens top-down, so
    /// a match of the whole expression takes priority over matches of its children.
    pub fn replace(&self, target: &SymExpr, replacement: &SymExpr) -> SymExpr {
        if self == target {
            return replacement.clone();
        }

        match self {
            Self::Primary(Primary::Call(name, args)) => Self::call(
                name.clone(),
                args.iter().map(|arg| arg.replace(target, replacement)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => terms.iter()
                .map(|term| term.replace(target, replacement))
                .fold(Self::Add(Vec::new()), |acc, term| acc + term)
                .downgrade(),
            Self::Mul(factors) => factors.iter()
                .map(|factor| factor.replace(target, replacement))
                .fold(Self::Mul(Vec::new()), |acc, factor| acc * factor)
                .downgrade(),
            Self::Exp(base, exp) => base.replace(target, replacement)
                .pow(exp.replace(target, replacement)),
        }
    }

    /// Substitutes the given value for every occurrence of the symbol.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        self.replace(&Self::symbol(name), value)
    }

    /// Splits a product into its numeric coefficient and the remaining factors.
    ///
    /// - `5` -> `(5, 1)`
    /// - `3*a` -> `(3, a)`
    /// - `1/4*a*b` -> `(1/4, a*b)`
    /// - `a` -> `(1, a)`
    pub fn split_coefficient(&self) -> (SymExpr, SymExpr) {
        match self {
            expr if expr.is_number() => (expr.clone(), Self::int(1)),
            Self::Mul(factors) => {
                let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
                    .cloned()
                    .partition(SymExpr::is_number);
                let coefficient = numbers.into_iter()
                    .fold(Self::int(1), |acc, n| acc.mul_number(&n));
                (coefficient, Self::Mul(rest).downgrade())
            },
            _ => (Self::int(1), self.clone()),
        }
    }

    /// Splits a power into its base and exponent. Other expressions have an exponent of `1`.
    pub fn split_power(&self) -> (SymExpr, SymExpr) {
        match self {
            Self::Exp(base, exp) => ((**base).clone(), (**exp).clone()),
            _ => (self.clone(), Self::int(1)),
        }
    }

    /// Adds two numbers. Mixing a rational and a float produces a float.
    ///
    /// Both expressions must be numbers.
    pub(crate) fn add_number(&self, other: &SymExpr) -> SymExpr {
        match (self, other) {
            (Self::Primary(Primary::Rational(a)), Self::Primary(Primary::Rational(b))) => {
                Self::Primary(Primary::Rational(Rational::from(a + b)))
            },
            _ => Self::Primary(Primary::Float(
                self.to_float().unwrap_or_else(|| crate::primitive::float(0))
                    + other.to_float().unwrap_or_else(|| crate::primitive::float(0)),
            )),
        }
    }

    /// Multiplies two numbers. Mixing a rational and a float produces a float.
    ///
    /// Both expressions must be numbers.
    pub(crate) fn mul_number(&self, other: &SymExpr) -> SymExpr {
        match (self, other) {
            (Self::Primary(Primary::Rational(a)), Self::Primary(Primary::Rational(b))) => {
                Self::Primary(Primary::Rational(Rational::from(a * b)))
            },
            _ => Self::Primary(Primary::Float(
                self.to_float().unwrap_or_else(|| crate::primitive::float(1))
                    * other.to_float().unwrap_or_else(|| crate::primitive::float(1)),
            )),
        }
    }

    /// Converts a number to a [`Float`].
    pub(crate) fn to_float(&self) -> Option<Float> {
        match self {
            Self::Primary(Primary::Rational(r)) => Some(crate::primitive::float(r)),
            Self::Primary(Primary::Float(f)) => Some(f.clone()),
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in an [`SymExpr::Add`] with zero / one term, or an
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::int(0)
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::int(1)
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }
}

impl From<Rational> for SymExpr {
    fn from(r: Rational) -> Self {
        Self::Primary(Primary::Rational(r))
    }
}

impl From<Integer> for SymExpr {
    fn from(n: Integer) -> Self {
        Self::Primary(Primary::Rational(Rational::from(n)))
    }
}

impl From<Float> for SymExpr {
    fn from(f: Float) -> Self {
        Self::Primary(Primary::Float(f))
    }
}

/// Converts a parsed expression into a [`SymExpr`].
///
/// Besides flattening, this step resolves the names of constants, and rewrites a few functions
/// into the forms the symbolic engine works with: `sqrt(x)` becomes `x^(1/2)`, `exp(x)` becomes
/// `E^x`, and `log` is treated as the natural logarithm `ln`.
impl TryFrom<&AstExpr> for SymExpr {
    type Error = Error;

    fn try_from(expr: &AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(LitNum::Integer { value, span })) => int_from_str(value)
                .map(Self::from)
                .ok_or_else(|| Error::new(vec![span.clone()], kind::NonFinite { expr: value.clone() })),
            AstExpr::Literal(Literal::Number(LitNum::Float { value, span })) => float_from_str(value)
                .map(Self::from)
                .ok_or_else(|| Error::new(vec![span.clone()], kind::NonFinite { expr: value.clone() })),
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(match Constant::from_name(&sym.name) {
                Some(constant) => Self::constant(constant),
                None => Self::symbol(sym.name.clone()),
            }),
            AstExpr::Paren(paren) => Self::try_from(paren.expr.innermost()),
            AstExpr::Call(call) => {
                let args = call.args.iter()
                    .map(Self::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                from_call(&call.name.name, args)
                    .map_err(|mut err| {
                        err.spans = vec![call.span.clone()];
                        err
                    })
            },
            AstExpr::Unary(unary) => {
                let operand = Self::try_from(&*unary.operand)?;
                Ok(match unary.op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Pos => operand,
                })
            },
            AstExpr::Binary(bin) => {
                let lhs = Self::try_from(&*bin.lhs)?;
                let rhs = Self::try_from(&*bin.rhs)?;
                Ok(match bin.op.kind {
                    BinOpKind::Exp => lhs.pow(rhs),
                    BinOpKind::Mul => lhs * rhs,
                    BinOpKind::Div => lhs / rhs,
                    BinOpKind::Add => lhs + rhs,
                    BinOpKind::Sub => lhs - rhs,
                })
            },
        }
    }
}

/// Converts a call to a known function.
fn from_call(name: &str, mut args: Vec<SymExpr>) -> Result<SymExpr, Error> {
    let expect_args = |expected: usize, given: usize| {
        if expected == given {
            Ok(())
        } else {
            Err(Error::spanless(kind::WrongArgumentCount { name: name.to_owned(), expected, given }))
        }
    };

    match name {
        "integrate" | "limit" => Err(Error::spanless(kind::UnsupportedFunction { name: name.to_owned() })),
        "sqrt" => {
            expect_args(1, args.len())?;
            Ok(args.remove(0).sqrt())
        },
        "exp" => {
            expect_args(1, args.len())?;
            Ok(SymExpr::constant(Constant::E).pow(args.remove(0)))
        },
        "ln" | "log" if args.len() == 2 => {
            // log(x, b) = ln(x) / ln(b)
            let base = args.remove(1);
            let value = args.remove(0);
            Ok(SymExpr::call("ln", vec![value]) / SymExpr::call("ln", vec![base]))
        },
        "ln" | "log" => {
            expect_args(1, args.len())?;
            Ok(SymExpr::call("ln", args))
        },
        _ => {
            expect_args(1, args.len())?;
            Ok(SymExpr::call(name, args))
        },
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except that the terms of
/// [`SymExpr::Add`] operands are combined into one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except that the factors of
/// [`SymExpr::Mul`] operands are combined into one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Negates the expression. Numbers are negated directly; anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Rational(r)) => Self::Primary(Primary::Rational(-r)),
            Self::Primary(Primary::Float(f)) => Self::Primary(Primary::Float(-f)),
            other => Self::int(-1) * other,
        }
    }
}

impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Div for SymExpr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.recip()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::symbolic::parse;

    #[test]
    fn flatten_sum() {
        let expr = parse("x + (y + z)").unwrap();
        assert_eq!(expr, SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
            SymExpr::symbol("z"),
        ]));
    }

    #[test]
    fn strict_equality_ignores_order() {
        let a = parse("x*y*z").unwrap();
        let b = parse("z*x*y").unwrap();
        assert_eq!(a, b);
        assert_ne!(parse("x*x*y").unwrap(), parse("x*y*y").unwrap());
    }

    #[test]
    fn constants_and_rewrites() {
        assert_eq!(parse("pi").unwrap(), SymExpr::constant(Constant::Pi));
        assert_eq!(parse("E").unwrap(), SymExpr::constant(Constant::E));
        assert_eq!(parse("e").unwrap(), SymExpr::symbol("e"));
        assert_eq!(parse("sqrt(x)").unwrap(), SymExpr::symbol("x").pow(SymExpr::frac(1, 2)));
        assert_eq!(
            parse("exp(x)").unwrap(),
            SymExpr::constant(Constant::E).pow(SymExpr::symbol("x")),
        );
        assert_eq!(parse("log(x)").unwrap(), SymExpr::call("ln", vec![SymExpr::symbol("x")]));
    }

    #[test]
    fn negative_literal_is_a_number() {
        assert_eq!(parse("-3").unwrap(), SymExpr::int(-3));
    }

    #[test]
    fn free_symbols_sorted() {
        let expr = parse("y*x + sin(z) + pi").unwrap();
        let symbols = expr.free_symbols().into_iter().collect::<Vec<_>>();
        assert_eq!(symbols, vec!["x", "y", "z"]);
    }

    #[test]
    fn wrong_argument_count() {
        assert!(parse("sin(x, y)").is_err());
        assert!(parse("integrate(x, x)").is_err());
    }

    #[test]
    fn substitute_symbol() {
        let expr = parse("x^2 + x").unwrap();
        let substituted = expr.substitute("x", &SymExpr::int(3));
        assert_eq!(substituted, SymExpr::Add(vec![
            SymExpr::int(3).pow(SymExpr::int(2)),
            SymExpr::int(3),
        ]));
    }
}
