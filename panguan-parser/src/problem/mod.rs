//! The problem-statement grammar.
//!
//! The solver recognizes a few kinds of problem statements inside free text. Each statement type
//! in this module is parsed from the token stream (never by slicing strings), and every piece it
//! extracts has been checked to parse as an expression. The pieces are handed back as the exact
//! source text they were parsed from, so that downstream tools can re-read them.

pub mod call;
pub mod equation;
pub mod integral;

pub use call::{IntegrateCall, Limits, LimitCall};
pub use equation::Equation;
pub use integral::IntegralPhrase;

use crate::{
    parser::{
        ast::Expr,
        error::{kind, Error},
        token::{CloseParen, Comma, OpenParen, Quote},
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

/// An argument of a call-style problem statement, such as `integrate("x**2", x, (x, 0, 1))`.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A quoted string or an inline expression, stored as the text it contains.
    Text(String, Range<usize>),

    /// A parenthesized, comma-separated group of arguments.
    Tuple(Vec<Arg>, Range<usize>),
}

impl Arg {
    /// Returns the span of the argument.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Text(_, span) | Self::Tuple(_, span) => span.clone(),
        }
    }

    /// Returns the text of the argument, or an error if the argument is a tuple.
    pub fn into_text(self) -> Result<String, Error> {
        match self {
            Self::Text(text, _) => Ok(text),
            Self::Tuple(_, span) => Err(Error::new(vec![span], kind::ExpectedProblem {
                expected: "a single expression",
            })),
        }
    }

    /// Parses a single argument.
    fn parse(input: &mut Parser, source: &str) -> Result<Self, Error> {
        if input.peek_kind() == Some(TokenKind::Quote) {
            let quote = input.try_parse::<Quote>()?;
            // both ends of the lexeme are single-byte quote characters
            let text = quote.lexeme[1..quote.lexeme.len() - 1].trim();
            if text.is_empty() {
                return Err(Error::new(vec![quote.span], kind::EmptyArgument));
            }
            return Ok(Self::Text(text.to_owned(), quote.span));
        }

        if let Ok(tuple) = input.try_parse_with_fn(|input| Self::parse_tuple(input, source)) {
            return Ok(tuple);
        }

        let expr = input.try_parse::<Expr>()?;
        Ok(Self::Text(slice(source, expr.span()), expr.span()))
    }

    /// Parses a tuple of at least two arguments.
    fn parse_tuple(input: &mut Parser, source: &str) -> Result<Self, Error> {
        let open = input.try_parse::<OpenParen>()?;
        let mut values = vec![Self::parse(input, source)?];
        input.try_parse::<Comma>()?;
        values.extend(parse_delimited(input, source)?);
        let close = input.try_parse::<CloseParen>()?;
        Ok(Self::Tuple(values, open.span.start..close.span.end))
    }
}

/// Parses one or more comma-separated arguments.
fn parse_delimited(input: &mut Parser, source: &str) -> Result<Vec<Arg>, Error> {
    let mut args = vec![Arg::parse(input, source)?];
    while input.try_parse::<Comma>().is_ok() {
        args.push(Arg::parse(input, source)?);
    }
    Ok(args)
}

/// Parses the parenthesized argument list of a call-style problem statement.
fn parse_args(input: &mut Parser, source: &str) -> Result<(Vec<Arg>, Range<usize>), Error> {
    let open = input.try_parse::<OpenParen>()?;
    let args = parse_delimited(input, source)?;
    let close = input.try_parse::<CloseParen>()
        .map_err(|_| Error::new(vec![open.span.clone()], kind::UnclosedParenthesis { opening: true }))?;
    Ok((args, open.span.start..close.span.end))
}

/// Returns the trimmed source text covered by the given span.
fn slice(source: &str, span: Range<usize>) -> String {
    source[span].trim().to_owned()
}

/// Returns the span of the whole source, used for errors that concern the entire text.
fn whole(source: &str) -> Range<usize> {
    0..source.len()
}
