pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot recognize is kept as [`TokenKind::Symbol`] tokens, so that the parser
/// can point at it when reporting errors.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn both_power_spellings() {
        compare_tokens(
            "x**2^3",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "2"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_tokens() {
        compare_tokens(
            "5x - 0.5",
            [
                (TokenKind::Int, "5"),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "0.5"),
            ],
        );
    }

    #[test]
    fn integral_phrase() {
        compare_tokens(
            "∫_0^1 x^2 dx",
            [
                (TokenKind::Integral, "∫"),
                (TokenKind::Underscore, "_"),
                (TokenKind::Int, "0"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "dx"),
            ],
        );
    }

    #[test]
    fn latex_commands_and_quotes() {
        compare_tokens(
            r#"\int_{0}^{\pi} "x" \infty"#,
            [
                (TokenKind::Integral, "\\int"),
                (TokenKind::Underscore, "_"),
                (TokenKind::OpenCurly, "{"),
                (TokenKind::Int, "0"),
                (TokenKind::CloseCurly, "}"),
                (TokenKind::Exp, "^"),
                (TokenKind::OpenCurly, "{"),
                (TokenKind::Pi, "\\pi"),
                (TokenKind::CloseCurly, "}"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Quote, "\"x\""),
                (TokenKind::Whitespace, " "),
                (TokenKind::Infinity, "\\infty"),
            ],
        );
    }

    #[test]
    fn unknown_characters_become_symbols() {
        let tokens = tokenize_complete("x $ y");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![
            TokenKind::Name,
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Name,
        ]);
    }
}
