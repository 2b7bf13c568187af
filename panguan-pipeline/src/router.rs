//! Routes a free-text question to the symbolic tool that can answer it.
//!
//! The router tries each entry of [`DETECTORS`] in order. A detector first extracts a
//! [`Problem`] from the text using the problem-statement grammar, then the problem is dispatched
//! to its tool adapter. The first detector whose extraction and dispatch both succeed wins. A
//! detector that fails at either point only logs the reason and hands over to the next one, so a
//! malformed match never ends the cascade early.
//!
//! If no detector succeeds, the whole text is simplified as one expression. If even that fails,
//! the output holds the [`UNABLE_TO_PARSE`] marker and an empty answer.

use crate::state::{Route, SolverOutput};
use panguan_compute::symbolic;
use panguan_error::Error;
use panguan_parser::problem::{Equation, IntegralPhrase, IntegrateCall, LimitCall, Limits};
use panguan_tools::{self as tools, ToolError};
use tracing::debug;

/// The trace step recorded when nothing could be made of the question.
pub const UNABLE_TO_PARSE: &str = r"\text{Unable to parse problem}";

/// The variable to solve for when an equation has no free symbols.
const DEFAULT_VARIABLE: &str = "x";

/// A sub-problem extracted from the question text.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Integrate `integrand` with respect to `var`, over the limits if present.
    Integral {
        integrand: String,
        var: String,
        limits: Option<Limits>,
    },

    /// Solve `expr = 0` for `var`.
    Equation {
        expr: String,
        var: String,
    },

    /// Take the limit of `expr` as `var` approaches `point`.
    Limit {
        expr: String,
        var: String,
        point: String,
    },
}

/// A trace step and final answer produced by solving a [`Problem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// The step, as LaTeX.
    pub step: String,

    /// The answer, in the syntax accepted by the parser.
    pub answer: String,
}

impl Problem {
    /// Solves the problem with the matching tool adapter.
    pub fn dispatch(&self) -> Result<Derivation, ToolError> {
        match self {
            Self::Integral { integrand, var, limits } => {
                let bounds = limits.as_ref()
                    .map(|limits| (limits.var.as_str(), limits.lower.as_str(), limits.upper.as_str()));
                let integral = tools::integrate(integrand, var, bounds)?;
                let step = match limits {
                    Some(limits) => format!(
                        r"\int_{{{}}}^{{{}}} {} \, d{} = {}",
                        tools::pretty(&limits.lower),
                        tools::pretty(&limits.upper),
                        tools::pretty(integrand),
                        limits.var,
                        integral.latex,
                    ),
                    None => format!(
                        r"\int {} \, d{} = {} + C",
                        tools::pretty(integrand),
                        var,
                        integral.latex,
                    ),
                };
                Ok(Derivation { step, answer: integral.result_str })
            },
            Self::Equation { expr, var } => {
                let solutions = tools::solve_equation(expr, var)?;
                let lhs = tools::simplify(expr)?;
                Ok(Derivation {
                    step: format!(r"\text{{Solve}}\; {} = 0 \;\text{{for}}\; {}", lhs.latex, var),
                    answer: format!("{{{}}}", solutions.solutions.join(", ")),
                })
            },
            Self::Limit { expr, var, point } => {
                let limit = tools::limit(expr, var, point)?;
                Ok(Derivation {
                    step: format!(
                        r"\lim_{{{} \to {}}} {} = {}",
                        var,
                        tools::pretty(point),
                        tools::pretty(expr),
                        limit.latex,
                    ),
                    answer: limit.result_str,
                })
            },
        }
    }
}

/// An entry of the detector table: the route it records and how it extracts its problem.
pub struct Detector {
    pub route: Route,
    pub extract: fn(&str) -> Result<Problem, Error>,
}

/// The detectors, in priority order. More distinctive forms come first, so that an integral with
/// bounds is never mistaken for a bare equation.
pub static DETECTORS: [Detector; 4] = [
    Detector { route: Route::IntegralPhrase, extract: extract_integral_phrase },
    Detector { route: Route::IntegrateCall, extract: extract_integrate_call },
    Detector { route: Route::Equation, extract: extract_equation },
    Detector { route: Route::LimitCall, extract: extract_limit_call },
];

fn extract_integral_phrase(text: &str) -> Result<Problem, Error> {
    let phrase = IntegralPhrase::find(text)?;
    let limits = phrase.bounds.map(|(lower, upper)| Limits {
        var: phrase.var.clone(),
        lower,
        upper,
    });
    Ok(Problem::Integral {
        integrand: phrase.integrand,
        var: phrase.var,
        limits,
    })
}

fn extract_integrate_call(text: &str) -> Result<Problem, Error> {
    let call = IntegrateCall::parse(text)?;
    Ok(Problem::Integral {
        integrand: call.expr,
        var: call.var,
        limits: call.limits,
    })
}

/// Forms `lhs - rhs` and picks the solve variable: the lexicographically first free symbol.
///
/// A `for <var>` clause is recognized and stripped by the grammar, but does not pick the
/// variable.
fn extract_equation(text: &str) -> Result<Problem, Error> {
    let equation = Equation::parse(text)?;
    let expr = format!("({}) - ({})", equation.lhs, equation.rhs);
    let var = symbolic::parse(&expr)?
        .free_symbols()
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_VARIABLE.to_owned());
    if let Some(stated) = &equation.stated_var {
        debug!(stated, chosen = %var, "ignoring stated variable");
    }
    Ok(Problem::Equation { expr, var })
}

fn extract_limit_call(text: &str) -> Result<Problem, Error> {
    let call = LimitCall::parse(text)?;
    Ok(Problem::Limit {
        expr: call.expr,
        var: call.var,
        point: call.point,
    })
}

/// Tries each detector in order, returning the route and derivation of the first that succeeds.
fn detect(text: &str) -> Option<(Route, Derivation)> {
    DETECTORS.iter().find_map(|detector| {
        let problem = match (detector.extract)(text) {
            Ok(problem) => problem,
            Err(err) => {
                debug!(route = %detector.route, error = %err, "detector declined");
                return None;
            },
        };

        match problem.dispatch() {
            Ok(derivation) => Some((detector.route, derivation)),
            Err(err) => {
                debug!(route = %detector.route, ?problem, error = %err, "tool failed");
                None
            },
        }
    })
}

/// Routes the question to a tool and returns the solver output.
///
/// ```
/// use panguan_pipeline::{router::route, state::Route};
///
/// let output = route("Solve x^2 - 5x + 6 = 0");
/// assert_eq!(output.routed_by, Route::Equation);
/// assert_eq!(output.final_answer, "{2, 3}");
/// ```
pub fn route(text: &str) -> SolverOutput {
    let text = text.trim();

    if let Some((route, derivation)) = detect(text) {
        debug!(%route, answer = %derivation.answer, "routed");
        return SolverOutput {
            derivation_steps: vec![derivation.step],
            final_answer: derivation.answer,
            routed_by: route,
        };
    }

    match tools::simplify(text) {
        Ok(simplified) => SolverOutput {
            derivation_steps: vec![simplified.latex],
            final_answer: simplified.simplified_str,
            routed_by: Route::Fallback,
        },
        Err(err) => {
            debug!(error = %err, "routing exhausted");
            SolverOutput {
                derivation_steps: vec![UNABLE_TO_PARSE.to_owned()],
                final_answer: String::new(),
                routed_by: Route::Exhausted,
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn definite_integral_phrase() {
        let output = route("Compute ∫_0^1 x^2 dx");
        assert_eq!(output, SolverOutput {
            derivation_steps: vec![r"\int_{0}^{1} x^{2} \, dx = \frac{1}{3}".to_owned()],
            final_answer: "1/3".to_owned(),
            routed_by: Route::IntegralPhrase,
        });
    }

    #[test]
    fn integral_phrase_wins_over_equation() {
        let output = route("A = ∫_0^2 3*t^2 dt");
        assert_eq!(output.routed_by, Route::IntegralPhrase);
        assert_eq!(output.final_answer, "8");
    }

    #[test]
    fn indefinite_integral_phrase() {
        let output = route("∫ cos(x) dx");
        assert_eq!(output.derivation_steps, [r"\int \cos{\left(x \right)} \, dx = \sin{\left(x \right)} + C"]);
        assert_eq!(output.final_answer, "sin(x)");
    }

    #[test]
    fn integral_phrase_before_equals_sign_is_an_integral() {
        let output = route("∫ x dx = 5");
        assert_eq!(output.routed_by, Route::IntegralPhrase);
        assert_eq!(output.final_answer, "x^2/2");
    }

    #[test]
    fn integrate_call() {
        let output = route(r#"integrate("x**2", "x", ("x", 0, 1))"#);
        assert_eq!(output.routed_by, Route::IntegrateCall);
        assert_eq!(output.final_answer, "1/3");

        let output = route("integrate(x^2, x)");
        assert_eq!(output.routed_by, Route::IntegrateCall);
        assert_eq!(output.final_answer, "x^3/3");
        assert!(output.derivation_steps[0].ends_with("+ C"));
    }

    #[test]
    fn malformed_integrate_call_falls_through() {
        let output = route("integrate(x^2, x");
        assert_eq!(output.routed_by, Route::Exhausted);
        assert_eq!(output.derivation_steps, [UNABLE_TO_PARSE]);
        assert_eq!(output.final_answer, "");
    }

    #[test]
    fn quadratic_equation() {
        let output = route("Solve x^2 - 5x + 6 = 0");
        assert_eq!(output, SolverOutput {
            derivation_steps: vec![r"\text{Solve}\; x^{2} - 5 x + 6 = 0 \;\text{for}\; x".to_owned()],
            final_answer: "{2, 3}".to_owned(),
            routed_by: Route::Equation,
        });
    }

    #[test]
    fn equation_variable_is_first_free_symbol() {
        let output = route("solve 2*y + 1 = 7 for y");
        assert_eq!(output.final_answer, "{3}");

        // `b` sorts before `x`, so the equation is solved for `b`
        let output = route("b*x = 6");
        assert_eq!(output.final_answer, "{6/x}");
    }

    #[test]
    fn equation_without_symbols() {
        let output = route("2 + 2 = 5");
        assert_eq!(output.routed_by, Route::Equation);
        assert_eq!(output.final_answer, "{}");
    }

    #[test]
    fn limit_call() {
        let output = route("limit((1+1/n)**n, n, oo)");
        assert_eq!(output, SolverOutput {
            derivation_steps: vec![
                r"\lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^{n} = e".to_owned(),
            ],
            final_answer: "E".to_owned(),
            routed_by: Route::LimitCall,
        });
    }

    #[test]
    fn fallback_simplifies() {
        let output = route("sin(x)^2 + cos(x)^2");
        assert_eq!(output.routed_by, Route::Fallback);
        assert_eq!(output.final_answer, "1");
        assert_eq!(output.derivation_steps, ["1"]);
    }

    #[test]
    fn division_by_zero_is_exhausted() {
        for input in ["0/0", "1/0", "x/(x - x)"] {
            let output = route(input);
            assert_eq!(output.routed_by, Route::Exhausted, "{input}");
            assert_eq!(output.final_answer, "");
        }
    }

    #[test]
    fn limit_call_with_parameter() {
        let output = route("limit(sin(a*x)/x, x, 0)");
        assert_eq!(output.routed_by, Route::LimitCall);
        assert_eq!(output.final_answer, "a");
    }

    #[test]
    fn prose_is_exhausted() {
        let output = route("Find the general solution to y'' - y = 0");
        assert_eq!(output.routed_by, Route::Exhausted);
        assert!(!output.routed());
    }

    #[test]
    fn routing_is_deterministic() {
        for input in ["Compute ∫_0^1 x^2 dx", "x = 2x - 3", "limit(sin(x)/x, x, 0)", "what"] {
            assert_eq!(route(input), route(input));
        }
    }
}
