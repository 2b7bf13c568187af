use crate::{
    parser::{ast::Expr, error::{kind, Error}, Parser},
    problem::{slice, whole},
    tokenizer::{tokenize_complete, Token, TokenKind},
};

/// An equation to solve, such as `Solve x^2 - 5x + 6 = 0` or `2x + 1 = 7 for x`.
///
/// The text is an equation if it contains `=` or begins with the word `solve` (in any case). The
/// leading `solve` and a trailing `for <var>` clause are removed, and the remaining text is split
/// on the first `=`. Without an `=`, the right-hand side is `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The left-hand side of the equation.
    pub lhs: String,

    /// The right-hand side of the equation.
    pub rhs: String,

    /// The variable named in a `for <var>` clause, if present.
    pub stated_var: Option<String>,
}

impl Equation {
    /// Parses an equation from the given text.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let tokens = tokenize_complete(source);
        let meaningful = tokens.iter()
            .filter(|token| !token.is_whitespace())
            .cloned()
            .collect::<Vec<_>>();

        let starts_with_solve = meaningful.first()
            .is_some_and(|token| is_word(token, "solve"));
        let has_eq = meaningful.iter().any(|token| token.kind == TokenKind::Eq);
        if !starts_with_solve && !has_eq {
            return Err(Error::new(vec![whole(source)], kind::ExpectedProblem {
                expected: "an equation",
            }));
        }

        let mut body = &meaningful[usize::from(starts_with_solve)..];
        let mut stated_var = None;
        if let Some(idx) = body.windows(2).position(|pair| is_word(&pair[0], "for") && pair[1].kind == TokenKind::Name) {
            stated_var = Some(body[idx + 1].lexeme.to_owned());
            body = &body[..idx];
        }

        let (lhs, rhs) = match body.iter().position(|token| token.kind == TokenKind::Eq) {
            Some(eq) => (&body[..eq], Some(&body[eq + 1..])),
            None => (body, None),
        };

        let lhs = side(source, lhs, "a left-hand side")?;
        let rhs = match rhs {
            Some(rhs) => side(source, rhs, "a right-hand side")?,
            None => "0".to_owned(),
        };

        Ok(Self { lhs, rhs, stated_var })
    }
}

/// Returns true if the token is the given word, ignoring case.
fn is_word(token: &Token, word: &str) -> bool {
    token.kind == TokenKind::Name && token.lexeme.eq_ignore_ascii_case(word)
}

/// Checks that one side of the equation is a complete expression and returns its text.
fn side(source: &str, tokens: &[Token], expected: &'static str) -> Result<String, Error> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(Error::new(vec![whole(source)], kind::ExpectedProblem { expected }));
    };
    Parser::from_tokens(tokens.to_vec()).try_parse_full::<Expr>()?;
    Ok(slice(source, first.span.start..last.span.end))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn solve_prefix() {
        let eq = Equation::parse("Solve x^2 - 5x + 6 = 0").unwrap();
        assert_eq!(eq, Equation {
            lhs: "x^2 - 5x + 6".to_owned(),
            rhs: "0".to_owned(),
            stated_var: None,
        });
    }

    #[test]
    fn for_clause_is_stripped() {
        let eq = Equation::parse("solve 2*y + 1 = 7 for y, please").unwrap();
        assert_eq!(eq, Equation {
            lhs: "2*y + 1".to_owned(),
            rhs: "7".to_owned(),
            stated_var: Some("y".to_owned()),
        });
    }

    #[test]
    fn solve_without_equals() {
        let eq = Equation::parse("SOLVE x^2 - 4").unwrap();
        assert_eq!(eq.lhs, "x^2 - 4");
        assert_eq!(eq.rhs, "0");
    }

    #[test]
    fn equals_without_solve() {
        let eq = Equation::parse("x = 2x - 3").unwrap();
        assert_eq!(eq.lhs, "x");
        assert_eq!(eq.rhs, "2x - 3");
    }

    #[test]
    fn not_an_equation() {
        let err = Equation::parse("x^2 + 1").unwrap_err();
        assert_eq!(err.message(), "expected an equation");
    }

    #[test]
    fn second_equals_is_an_error() {
        assert!(Equation::parse("x = 1 = 2").is_err());
    }

    #[test]
    fn prose_is_an_error() {
        assert!(Equation::parse("Find the general solution to y'' - y = 0").is_err());
    }
}
