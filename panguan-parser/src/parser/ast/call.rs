use std::ops::Range;
use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{CloseParen, Comma, Name, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names that are parsed as function calls when followed by an opening parenthesis. Any other
/// name followed by a parenthesis is implicit multiplication, so `x(x + 1)` is `x * (x + 1)`.
pub const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc",
    "asin", "acos", "atan",
    "sinh", "cosh", "tanh",
    "exp", "ln", "log", "sqrt", "abs",
    "integrate", "limit",
];

/// Returns true if the given name is parsed as a function call.
pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

/// A function call, such as `sin(x)` or `limit(f, x, 0)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        if !is_function(&name.lexeme) {
            return Err(Error::new(vec![name.span], kind::UnexpectedToken {
                expected: &[TokenKind::Name],
                found: TokenKind::Name,
            }));
        }

        let open_paren = input.try_parse::<OpenParen>()?;
        if let Some(token) = input.current_token() {
            if token.kind == TokenKind::CloseParen {
                return Err(Error::new(vec![open_paren.span.start..token.span.end], kind::EmptyParenthesis));
            }
        }

        let mut args = vec![input.try_parse::<Expr>()?];
        while input.try_parse::<Comma>().is_ok() {
            args.push(input.try_parse::<Expr>()?);
        }

        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(vec![open_paren.span.clone()], kind::UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            name: LitSym {
                name: name.lexeme,
                span: name.span.clone(),
            },
            args,
            span: name.span.start..close_paren.span.end,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}
