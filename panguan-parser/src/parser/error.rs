//! Errors that can occur while parsing expressions and problem statements.

pub use panguan_error::Error;

pub mod kind {
    use ariadne::Fmt;
    use panguan_attrs::ErrorKind;
    use panguan_error::{ErrorKind, EXPR};
    use crate::tokenizer::TokenKind;

    /// The end of the source code was reached unexpectedly.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unexpected end of file",
        labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
    )]
    pub struct UnexpectedEof;

    /// The end of the source code was expected, but something else was found.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "expected end of file",
        labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    )]
    pub struct ExpectedEof;

    /// An unexpected token was encountered.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unexpected token",
        labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
        help = format!("found {:?}", found),
    )]
    pub struct UnexpectedToken {
        /// The token(s) that were expected.
        pub expected: &'static [TokenKind],

        /// The token that was found.
        pub found: TokenKind,
    }

    /// A parenthesis was not closed.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unclosed parenthesis",
        labels = ["this parenthesis is not closed"],
        help = if *opening {
            "add a closing parenthesis `)` somewhere after this"
        } else {
            "add an opening parenthesis `(` somewhere before this"
        },
    )]
    pub struct UnclosedParenthesis {
        /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
        /// closing parenthesis `)`.
        pub opening: bool,
    }

    /// There was no expression inside a pair of parentheses.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "missing expression inside parenthesis",
        labels = ["add an expression here"],
    )]
    pub struct EmptyParenthesis;

    /// A function call received the wrong number of arguments.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
        labels = ["this call"],
    )]
    pub struct WrongArgumentCount {
        /// The name of the function.
        pub name: String,

        /// A description of the accepted argument counts, such as `2 or 3`.
        pub expected: &'static str,

        /// The number of arguments that were given.
        pub given: usize,
    }

    /// The text is not the kind of problem statement that was expected.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("expected {}", expected),
        labels = [format!("I expected to see {} here", expected)],
    )]
    pub struct ExpectedProblem {
        /// The kind of problem statement that was expected, with an article.
        pub expected: &'static str,
    }

    /// An integral sign was found without a differential such as `dx` after the integrand.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "missing differential in integral",
        labels = ["this integral"],
        help = format!("end the integrand with a differential, such as {}", "dx".fg(EXPR)),
    )]
    pub struct MissingDifferential;

    /// An integration bound could not be read.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("invalid {} bound in integral", if *upper { "upper" } else { "lower" }),
        labels = ["here"],
        help = "write a bound as a single number or symbol, or group it with braces, such as `_{-1}`",
    )]
    pub struct InvalidBound {
        /// Whether the upper bound was invalid. (Otherwise, the lower bound was invalid.)
        pub upper: bool,
    }

    /// A quoted argument contained no text.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "empty argument",
        labels = ["this argument is empty"],
    )]
    pub struct EmptyArgument;
}
