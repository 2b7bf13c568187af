use std::ops::Range;
use crate::{
    parser::{
        ast::{expr::Expr, unary::Unary},
        error::Error,
        token::op::{BinOp, BinOpKind},
        Associativity,
        Parser,
        Precedence,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the precedence of the operator at the front of the stream without consuming it.
    /// A token that can begin a primary expression means implicit multiplication.
    fn peek_precedence(input: &Parser) -> Option<(Precedence, Associativity)> {
        let mut ahead = input.clone();
        if let Ok(op) = ahead.try_parse::<BinOp>() {
            return Some((op.precedence(), op.associativity()));
        }

        input.peek_kind()
            .filter(|kind| kind.starts_primary())
            .map(|_| (Precedence::Factor, Associativity::Left))
    }

    /// Consumes the next binary operator if it binds at least as tightly as `precedence`. If no
    /// operator is present but a primary expression follows, an implicit multiplication operator
    /// is produced instead.
    fn next_op(input: &mut Parser, lhs: &Expr, precedence: Precedence) -> Option<BinOp> {
        let mut ahead = input.clone();
        if let Ok(op) = ahead.try_parse::<BinOp>() {
            if op.precedence() >= precedence {
                input.set_cursor(&ahead);
                return Some(op);
            }
            return None;
        }

        if Precedence::Factor < precedence {
            return None;
        }

        let next = input.current_token()?;
        if next.kind.starts_primary() {
            Some(BinOp {
                kind: BinOpKind::Mul,
                implicit: true,
                span: lhs.span().end..next.span.start,
            })
        } else {
            None
        }
    }

    /// Parses as many binary operations as possible, starting with the already parsed `lhs`, using
    /// precedence climbing. Operators that bind looser than `precedence` are left in the stream.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(op) = Self::next_op(input, &lhs, precedence) {
            let mut rhs = Unary::parse_or_lower(input)?;

            // before creating the `lhs op rhs` node, check the precedence of the following
            // operator, if any; `3 + 4 * 5` must not become `(3 + 4) * 5`
            while let Some((next_precedence, next_associativity)) = Self::peek_precedence(input) {
                let binds_tighter = next_precedence > op.precedence()
                    || (next_precedence == op.precedence() && next_associativity == Associativity::Right);
                if !binds_tighter {
                    break;
                }
                rhs = Self::parse_expr(input, rhs, next_precedence)?;
            }

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}
