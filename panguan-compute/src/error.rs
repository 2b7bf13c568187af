//! Errors that can occur while computing with expressions.

pub use panguan_error::Error;

pub mod kind {
    use ariadne::Fmt;
    use panguan_attrs::ErrorKind;
    use panguan_error::{ErrorKind, EXPR};

    /// A symbol had no value during numerical evaluation.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` has no numeric value", name),
        labels = ["this symbol"],
        help = format!("substitute a value for {} before evaluating", name.fg(EXPR)),
    )]
    pub struct UndefinedSymbol {
        /// The name of the symbol.
        pub name: String,
    }

    /// The result of an evaluation is not a real number.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` does not evaluate to a real number", expr),
        help = "only real-valued expressions can be evaluated numerically",
    )]
    pub struct NonReal {
        /// The offending (sub)expression.
        pub expr: String,
    }

    /// The result of an evaluation is infinite or undefined.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` does not evaluate to a finite number", expr),
        help = "check for a division by zero or a logarithm of zero",
    )]
    pub struct NonFinite {
        /// The offending (sub)expression.
        pub expr: String,
    }

    /// The expression divides by zero.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` divides by zero", expr),
        help = "the expression is undefined",
    )]
    pub struct DivisionByZero {
        /// The offending expression.
        pub expr: String,
    }

    /// The function is not known to the symbolic engine.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("the `{}` function is not supported here", name),
        labels = ["this function"],
    )]
    pub struct UnsupportedFunction {
        /// The name of the function.
        pub name: String,
    }

    /// A function was called with the wrong number of arguments.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` takes {} argument(s), but {} were given", name, expected, given),
        labels = ["this call"],
    )]
    pub struct WrongArgumentCount {
        /// The name of the function.
        pub name: String,

        /// The number of arguments the function accepts.
        pub expected: usize,

        /// The number of arguments that were given.
        pub given: usize,
    }

    /// A variable of differentiation, integration or solving was not a plain symbol.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is not a valid variable", name),
        help = "variables must be a letter, optionally followed by letters, digits or underscores",
    )]
    pub struct InvalidVariable {
        /// The text given as the variable.
        pub name: String,
    }

    /// No antiderivative could be found.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("could not find an antiderivative of `{}` with respect to `{}`", integrand, var),
        help = "the integrand may not have an elementary antiderivative",
    )]
    pub struct NoClosedForm {
        /// The integrand.
        pub integrand: String,

        /// The variable of integration.
        pub var: String,
    }

    /// The derivative of a function is not known.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = format!("cannot differentiate the `{}` function", name))]
    pub struct UnknownDerivative {
        /// The name of the function.
        pub name: String,
    }

    /// An equation could not be solved.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("could not solve `{} = 0` for `{}`", expr, var),
        help = "only polynomial equations and equations that can be isolated are supported",
    )]
    pub struct CannotSolve {
        /// The expression that was set equal to zero.
        pub expr: String,

        /// The variable to solve for.
        pub var: String,
    }

    /// A definite integral has a singularity strictly inside its interval.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("`{}` is singular at `{} = {}`, inside the interval of integration", integrand, var, point),
        help = "split the integral at the singularity and check each part for convergence",
    )]
    pub struct SingularIntegrand {
        /// The integrand.
        pub integrand: String,

        /// The variable of integration.
        pub var: String,

        /// Where the integrand is singular.
        pub point: String,
    }

    /// A limit could not be determined.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("could not determine the limit of `{}` as `{}` approaches `{}`", expr, var, point),
        help = "the limit may not exist, or the expression may oscillate near the point",
    )]
    pub struct LimitNotFound {
        /// The expression whose limit was taken.
        pub expr: String,

        /// The variable of the limit.
        pub var: String,

        /// The point the variable approaches.
        pub point: String,
    }
}
