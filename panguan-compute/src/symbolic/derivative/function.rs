//! Symbolic derivatives of the functions known to the symbolic engine.

use crate::error::{kind, Error};
use crate::symbolic::expr::SymExpr;
use super::{derivative, MultBuilder};

fn call(name: &str, arg: &SymExpr) -> SymExpr {
    SymExpr::call(name, vec![arg.clone()])
}

/// `1 / sqrt(1 - u^2)`
fn arcsine_derivative(u: &SymExpr) -> SymExpr {
    (SymExpr::int(1) - u.clone().pow(SymExpr::int(2)))
        .pow(SymExpr::frac(-1, 2))
}

/// Computes the derivative of a supported function and performs the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], with: &str) -> Result<SymExpr, Error> {
    let [u] = args else {
        return Err(Error::spanless(kind::WrongArgumentCount {
            name: func.to_owned(),
            expected: 1,
            given: args.len(),
        }));
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(derivative(u, with)?);

    match func {
        "sin" => mult_group.mult(call("cos", u)),
        "cos" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(call("sin", u));
        },
        "tan" => mult_group.mult(call("cos", u).pow(SymExpr::int(-2))),
        "cot" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(call("sin", u).pow(SymExpr::int(-2)));
        },
        "sec" => {
            mult_group.mult(call("sec", u));
            mult_group.mult(call("tan", u));
        },
        "csc" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(call("csc", u));
            mult_group.mult(call("cot", u));
        },
        "asin" => mult_group.mult(arcsine_derivative(u)),
        "acos" => {
            mult_group.mult(SymExpr::int(-1));
            mult_group.mult(arcsine_derivative(u));
        },
        "atan" => mult_group.mult(
            (SymExpr::int(1) + u.clone().pow(SymExpr::int(2))).recip(),
        ),
        "sinh" => mult_group.mult(call("cosh", u)),
        "cosh" => mult_group.mult(call("sinh", u)),
        "tanh" => mult_group.mult(call("cosh", u).pow(SymExpr::int(-2))),
        "ln" => mult_group.mult(u.clone().recip()),
        "exp" => mult_group.mult(call("exp", u)),
        "abs" => {
            mult_group.mult(u.clone());
            mult_group.mult(call("abs", u).recip());
        },
        _ => return Err(Error::spanless(kind::UnknownDerivative { name: func.to_owned() })),
    }

    Ok(mult_group.into())
}
