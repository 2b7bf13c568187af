use std::ops::Range;
use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression. Braces group an expression the same way parentheses do, so that
/// LaTeX-style input such as `e^{-x}` can be read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.next_token()?;
        let close_kind = match open.kind {
            TokenKind::OpenParen => TokenKind::CloseParen,
            TokenKind::OpenCurly => TokenKind::CloseCurly,
            found => return Err(Error::new(vec![open.span], kind::UnexpectedToken {
                expected: &[TokenKind::OpenParen, TokenKind::OpenCurly],
                found,
            })),
        };

        if let Some(token) = input.current_token() {
            if token.kind == close_kind {
                return Err(Error::new(vec![open.span.start..token.span.end], kind::EmptyParenthesis));
            }
        }

        let expr = input.try_parse::<Expr>()?;
        match input.next_token() {
            Ok(close) if close.kind == close_kind => Ok(Self {
                expr: Box::new(expr),
                span: open.span.start..close.span.end,
            }),
            _ => Err(Error::new(vec![open.span], kind::UnclosedParenthesis { opening: true })),
        }
    }
}
