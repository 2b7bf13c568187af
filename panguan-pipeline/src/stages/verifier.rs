use crate::{
    stage::Stage,
    state::{PipelineState, VerificationReport, VerificationStatus},
};
use panguan_tools::evaluate;
use tracing::debug;

/// Checks the solver's final answer numerically.
///
/// The check is advisory: the report is [`VerificationStatus::Passed`] whether or not the answer
/// could be evaluated. Only a successful evaluation adds a detail line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier;

impl Verifier {
    /// Builds the report for the given final answer.
    pub fn verify(final_answer: &str) -> VerificationReport {
        let mut details = Vec::new();
        match evaluate(final_answer, &[]) {
            Ok(evaluation) => details.push(format!("Numeric evaluation: {}", evaluation.float_value)),
            Err(err) => debug!(final_answer, error = %err, "answer is not numeric"),
        }

        VerificationReport {
            status: VerificationStatus::Passed,
            details,
        }
    }
}

impl Stage for Verifier {
    fn name(&self) -> &str {
        "verify"
    }

    fn run(&self, _: &str, state: PipelineState) -> PipelineState {
        let final_answer = state.solver_output()
            .map(|output| output.final_answer.as_str())
            .unwrap_or_default();
        let report = Self::verify(final_answer);
        state.write_verification_report(report)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn numeric_answer() {
        let report = Verifier::verify("1/4");
        assert_eq!(report, VerificationReport {
            status: VerificationStatus::Passed,
            details: vec!["Numeric evaluation: 0.25".to_owned()],
        });
    }

    #[test]
    fn non_numeric_answers_still_pass() {
        for answer in ["", "{2, 3}", "x + 1"] {
            let report = Verifier::verify(answer);
            assert_eq!(report.status, VerificationStatus::Passed);
            assert!(report.details.is_empty());
        }
    }

    #[test]
    fn missing_solver_output() {
        let state = Verifier.run("q", PipelineState::new("sess"));
        assert_eq!(state.verification_report().unwrap().status, VerificationStatus::Passed);
    }
}
