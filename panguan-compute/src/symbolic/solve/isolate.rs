//! Solving by isolating the variable.
//!
//! When the variable appears in only one term of a sum, `f(g(x)) + c = 0` is rewritten as
//! `g(x) = f^-1(-c)`, and the solver continues with `g(x) - f^-1(-c) = 0`.

use crate::symbolic::expr::{Constant, Primary, SymExpr};
use std::cmp::Ordering;
use super::{is_var, numeric_sign, real_roots_of_power, roots_of};

fn call(name: &str, arg: SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg])
}

/// Returns true if the expression is known to lie outside `[-1, 1]`.
fn outside_unit_interval(expr: &SymExpr) -> bool {
    let above = numeric_sign(&(expr.clone() - SymExpr::int(1))) == Some(Ordering::Greater);
    let below = numeric_sign(&(expr.clone() + SymExpr::int(1))) == Some(Ordering::Less);
    above || below
}

/// Returns the values `g` may take so that `f(g) = rhs`, where `f` is the named function.
fn inverse_values(name: &str, rhs: &SymExpr) -> Option<Vec<SymExpr>> {
    let pi = SymExpr::constant(Constant::Pi);
    let values = match name {
        "ln" => vec![SymExpr::constant(Constant::E).pow(rhs.clone())],
        "sin" if outside_unit_interval(rhs) => Vec::new(),
        "sin" => {
            let principal = call("asin", rhs.clone());
            vec![principal.clone(), pi - principal]
        },
        "cos" if outside_unit_interval(rhs) => Vec::new(),
        "cos" => {
            let principal = call("acos", rhs.clone());
            vec![principal.clone(), SymExpr::int(2) * pi - principal]
        },
        "tan" => vec![call("atan", rhs.clone())],
        "asin" => vec![call("sin", rhs.clone())],
        "acos" => vec![call("cos", rhs.clone())],
        "atan" => vec![call("tan", rhs.clone())],
        _ => return None,
    };
    Some(values)
}

/// Finds the values of `var` for which `lhs = rhs`.
fn invert(lhs: &SymExpr, rhs: &SymExpr, var: &str, depth: usize) -> Option<Vec<SymExpr>> {
    if is_var(lhs, var) {
        return Some(vec![rhs.clone()]);
    }

    // every value found for the inner expression becomes a new equation to solve
    let solve_each = |inner: &SymExpr, values: Vec<SymExpr>| -> Option<Vec<SymExpr>> {
        let mut roots = Vec::new();
        for value in values {
            roots.extend(roots_of(&(inner.clone() - value), var, depth + 1)?);
        }
        Some(roots)
    };

    match lhs {
        SymExpr::Mul(factors) => {
            let (constant, varying): (Vec<_>, Vec<_>) = factors.iter()
                .cloned()
                .partition(|factor| !factor.contains_symbol(var));
            if constant.is_empty() {
                return None;
            }
            let rhs = rhs.clone() / SymExpr::Mul(constant).downgrade();
            invert(&SymExpr::Mul(varying).downgrade(), &rhs, var, depth)
        },
        SymExpr::Exp(base, exp) if !exp.contains_symbol(var) => {
            solve_each(base, real_roots_of_power(rhs, exp))
        },
        SymExpr::Exp(base, exp) if !base.contains_symbol(var) => {
            // c^g is always positive
            if numeric_sign(rhs) != Some(Ordering::Greater) && rhs.free_symbols().is_empty() {
                return Some(Vec::new());
            }
            let value = if base.is_constant(Constant::E) {
                call("ln", rhs.clone())
            } else {
                call("ln", rhs.clone()) / call("ln", (**base).clone())
            };
            solve_each(exp, vec![value])
        },
        SymExpr::Primary(Primary::Call(name, args)) => match args.as_slice() {
            [inner] => solve_each(inner, inverse_values(name, rhs)?),
            _ => None,
        },
        _ => None,
    }
}

/// Solves `expr = 0` when the variable appears in exactly one term of `expr`.
pub(super) fn isolate(expr: &SymExpr, var: &str, depth: usize) -> Option<Vec<SymExpr>> {
    let terms = match expr {
        SymExpr::Add(terms) => terms.clone(),
        other => vec![other.clone()],
    };
    let (varying, constant): (Vec<_>, Vec<_>) = terms.into_iter()
        .partition(|term| term.contains_symbol(var));

    match varying.as_slice() {
        [lhs] => invert(lhs, &-SymExpr::Add(constant).downgrade(), var, depth),
        _ => None,
    }
}
