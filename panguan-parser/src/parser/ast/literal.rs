use std::ops::Range;
use crate::{
    parser::{
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal. The digits are kept as written, so that they can be converted into an exact
/// integer or an arbitrary precision float later.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LitNum {
    /// An integer, such as `144`.
    Integer {
        value: String,
        span: Range<usize>,
    },

    /// A decimal number, such as `3.14`.
    Float {
        value: String,
        span: Range<usize>,
    },
}

impl LitNum {
    /// Returns the span of the number literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Integer { span, .. } | Self::Float { span, .. } => span.clone(),
        }
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables, constants and
/// functions.
///
/// The `π` and `∞` characters (and their LaTeX spellings) are read as the symbols `pi` and `oo`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// Represents a literal value written directly into the source code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let span = token.span.clone();
        match token.kind {
            TokenKind::Int => Ok(Literal::Number(LitNum::Integer { value: token.lexeme.to_owned(), span })),
            TokenKind::Float => Ok(Literal::Number(LitNum::Float { value: token.lexeme.to_owned(), span })),
            TokenKind::Name => Ok(Literal::Symbol(LitSym { name: token.lexeme.to_owned(), span })),
            TokenKind::Pi => Ok(Literal::Symbol(LitSym { name: "pi".to_owned(), span })),
            TokenKind::Infinity => Ok(Literal::Symbol(LitSym { name: "oo".to_owned(), span })),
            found => Err(Error::new(vec![span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::Pi,
                    TokenKind::Infinity,
                ],
                found,
            })),
        }
    }
}
