use crate::{
    parser::{
        ast::Expr,
        error::{kind, Error},
        token::{CloseCurly, Exp},
        Parser,
    },
    problem::{slice, whole},
    tokenizer::{tokenize_complete, Token, TokenKind},
};
use std::ops::Range;

/// An integral written with an integral sign somewhere in the text, such as
/// `Compute ∫_0^1 x^2 dx` or `\int_{-1}^{1} x^3 \, dx`.
///
/// Bounds are optional; without them the phrase describes an indefinite integral. Each bound is
/// either a single number or symbol (optionally negated), or any expression grouped with braces.
/// The integrand runs up to the differential (`dx`, `dt`, ...), and anything after the
/// differential is ignored. The differential may be glued to a name at the end of the integrand,
/// as in `∫_0^1 xdx`, but only when no separate differential appears in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegralPhrase {
    /// The integrand.
    pub integrand: String,

    /// The variable of integration, taken from the differential.
    pub var: String,

    /// The lower and upper bounds, if any.
    pub bounds: Option<(String, String)>,
}

impl IntegralPhrase {
    /// Finds and parses the first integral phrase in the given text.
    pub fn find(source: &str) -> Result<Self, Error> {
        let tokens = tokenize_complete(source);
        let sign = tokens.iter()
            .position(|token| token.kind == TokenKind::Integral)
            .ok_or_else(|| Error::new(vec![whole(source)], kind::ExpectedProblem {
                expected: "an integral sign",
            }))?;
        let sign_span = tokens[sign].span.clone();

        let mut input = Parser::from_tokens(tokens[sign + 1..].to_vec());
        let bounds = if input.peek_kind() == Some(TokenKind::Underscore) {
            input.next_token()?;
            let lower = parse_bound(&mut input, source, false)?;
            input.try_parse::<Exp>()
                .map_err(|err| Error::new(err.spans, kind::InvalidBound { upper: true }))?;
            let upper = parse_bound(&mut input, source, true)?;
            Some((lower, upper))
        } else {
            None
        };

        let rest = input.remaining();
        let (differential, glued) = rest.iter()
            .position(is_differential)
            .map(|idx| (idx, false))
            .or_else(|| rest.iter().position(is_glued_differential).map(|idx| (idx, true)))
            .ok_or_else(|| Error::new(vec![sign_span.clone()], kind::MissingDifferential))?;
        let (lexeme, start) = (rest[differential].lexeme, rest[differential].span.start);
        let split = lexeme.len() - 2;
        let var = lexeme[split + 1..].to_owned();

        let mut integrand_tokens = rest[..differential].to_vec();
        if glued {
            integrand_tokens.push(Token {
                span: start..start + split,
                kind: TokenKind::Name,
                lexeme: &lexeme[..split],
            });
        }
        let integrand_span = span_of(&integrand_tokens)
            .ok_or_else(|| Error::new(vec![sign_span.start..rest[differential].span.end], kind::ExpectedProblem {
                expected: "an integrand",
            }))?;
        Parser::from_tokens(integrand_tokens).try_parse_full::<Expr>()?;

        Ok(Self {
            integrand: slice(source, integrand_span),
            var,
            bounds,
        })
    }
}

/// Returns true if the token is a differential, a `d` directly followed by a single letter.
fn is_differential(token: &Token) -> bool {
    let mut chars = token.lexeme.chars();
    token.kind == TokenKind::Name
        && chars.next() == Some('d')
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.next().is_none()
}

/// Returns true if the token is a name ending in a differential, such as `xdx`.
fn is_glued_differential(token: &Token) -> bool {
    let lexeme = token.lexeme;
    let mut tail = lexeme.chars().rev();
    token.kind == TokenKind::Name
        && lexeme.len() > 2
        && tail.next().is_some_and(|c| c.is_ascii_alphabetic())
        && tail.next() == Some('d')
}

/// Returns the span covering the meaningful tokens in the slice.
fn span_of(tokens: &[Token]) -> Option<Range<usize>> {
    let mut meaningful = tokens.iter().filter(|token| !token.is_whitespace());
    let first = meaningful.next()?;
    let last = meaningful.last().unwrap_or(first);
    Some(first.span.start..last.span.end)
}

/// Parses an integration bound, returning its source text.
fn parse_bound(input: &mut Parser, source: &str, upper: bool) -> Result<String, Error> {
    let invalid = |span| Error::new(vec![span], kind::InvalidBound { upper });
    let token = input.next_token().map_err(|err| invalid(err.spans.into_iter().next().unwrap_or_default()))?;

    match token.kind {
        TokenKind::OpenCurly => {
            let expr = input.try_parse::<Expr>()?;
            input.try_parse::<CloseCurly>()
                .map_err(|_| Error::new(vec![token.span.clone()], kind::UnclosedParenthesis { opening: true }))?;
            Ok(slice(source, expr.span()))
        },
        TokenKind::Sub => {
            let value = input.next_token().map_err(|_| invalid(token.span.clone()))?;
            if is_bound_atom(value.kind) {
                Ok(slice(source, token.span.start..value.span.end))
            } else {
                Err(invalid(value.span))
            }
        },
        kind if is_bound_atom(kind) => Ok(slice(source, token.span)),
        _ => Err(invalid(token.span)),
    }
}

/// Returns true if the token kind can be used as a bound on its own.
fn is_bound_atom(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Int | TokenKind::Float | TokenKind::Name | TokenKind::Pi | TokenKind::Infinity)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn unicode_definite_integral() {
        let phrase = IntegralPhrase::find("Compute ∫_0^1 x^2 dx").unwrap();
        assert_eq!(phrase, IntegralPhrase {
            integrand: "x^2".to_owned(),
            var: "x".to_owned(),
            bounds: Some(("0".to_owned(), "1".to_owned())),
        });
    }

    #[test]
    fn latex_braced_bounds() {
        let phrase = IntegralPhrase::find(r"\int_{-1}^{\pi} t \sin(t) dt").unwrap_err();
        // `\sin` is not an expression
        assert!(!phrase.message().is_empty());

        let phrase = IntegralPhrase::find(r"\int_{-1}^{\pi} t sin(t) dt").unwrap();
        assert_eq!(phrase, IntegralPhrase {
            integrand: "t sin(t)".to_owned(),
            var: "t".to_owned(),
            bounds: Some(("-1".to_owned(), r"\pi".to_owned())),
        });
    }

    #[test]
    fn negative_and_infinite_bounds() {
        let phrase = IntegralPhrase::find("∫_-∞^∞ exp(-x^2) dx").unwrap();
        assert_eq!(phrase.bounds, Some(("-∞".to_owned(), "∞".to_owned())));
        assert_eq!(phrase.integrand, "exp(-x^2)");
    }

    #[test]
    fn indefinite_integral() {
        let phrase = IntegralPhrase::find("find ∫ cos(x) dx please").unwrap();
        assert_eq!(phrase, IntegralPhrase {
            integrand: "cos(x)".to_owned(),
            var: "x".to_owned(),
            bounds: None,
        });
    }

    #[test]
    fn differential_glued_to_integrand() {
        let phrase = IntegralPhrase::find("∫_0^1 xdx").unwrap();
        assert_eq!(phrase, IntegralPhrase {
            integrand: "x".to_owned(),
            var: "x".to_owned(),
            bounds: Some(("0".to_owned(), "1".to_owned())),
        });

        let phrase = IntegralPhrase::find("∫ 3*tdt").unwrap();
        assert_eq!(phrase.integrand, "3*t");
        assert_eq!(phrase.var, "t");
    }

    #[test]
    fn separate_differential_wins_over_glued() {
        let phrase = IntegralPhrase::find("∫_0^1 x dx, then add").unwrap();
        assert_eq!(phrase.integrand, "x");
    }

    #[test]
    fn missing_differential() {
        let err = IntegralPhrase::find("∫_0^1 x^2").unwrap_err();
        assert_eq!(err.message(), "missing differential in integral");
    }

    #[test]
    fn missing_integrand() {
        assert!(IntegralPhrase::find("∫_0^1 dx").is_err());
    }

    #[test]
    fn no_integral_sign() {
        let err = IntegralPhrase::find("x^2 dx").unwrap_err();
        assert_eq!(err.message(), "expected an integral sign");
    }
}
