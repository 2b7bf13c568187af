//! The record threaded through the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One step of a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// What to do.
    pub step: String,

    /// The tool expected to do it.
    pub tool: String,
}

/// The plan written by the planner stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub expected_theorems: Vec<String>,
    pub verification_items: Vec<String>,
}

/// The detector (or fallback) that produced a [`SolverOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// An integral written with an integral sign, such as `∫_0^1 x^2 dx`.
    ///
    /// Phrases without bounds are taken as indefinite integrals, and text after the differential
    /// is ignored, so `∫ x dx = 5` is answered as the integral of `x` rather than as an equation.
    IntegralPhrase,

    /// An `integrate(...)` call.
    IntegrateCall,

    /// An equation, or text starting with `solve`.
    Equation,

    /// A `limit(...)` call.
    LimitCall,

    /// The whole text, simplified as one expression.
    Fallback,

    /// Nothing could be made of the text.
    Exhausted,
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegralPhrase => write!(f, "integral phrase"),
            Self::IntegrateCall => write!(f, "integrate call"),
            Self::Equation => write!(f, "equation"),
            Self::LimitCall => write!(f, "limit call"),
            Self::Fallback => write!(f, "simplification fallback"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// The output of the solver stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverOutput {
    /// The derivation trace, one LaTeX step per entry.
    pub derivation_steps: Vec<String>,

    /// The final answer, or an empty string if the question could not be solved.
    pub final_answer: String,

    /// Which detector produced the answer.
    pub routed_by: Route,
}

impl SolverOutput {
    /// Returns true if a detector or the fallback produced an answer.
    pub fn routed(&self) -> bool {
        self.routed_by != Route::Exhausted
    }
}

/// A source found by the research stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// The output of the research stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchOutput {
    pub citations: Vec<Citation>,
    pub summary: String,
    pub key_expressions: Vec<String>,
}

/// The overall result of verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Passed,
}

impl Display for VerificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
        }
    }
}

/// The output of the verification stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub status: VerificationStatus,
    pub details: Vec<String>,
}

/// The state threaded through every stage of a pipeline run.
///
/// Each stage writes one field. Fields can be written (and rewritten by the stage that owns them)
/// but never cleared, and every write bumps the [version](PipelineState::version). Stages take
/// the state by value and hand back the updated record, so no two stages ever share it.
///
/// ```
/// use panguan_pipeline::state::{Plan, PipelineState};
///
/// let state = PipelineState::new("sess-test").write_plan(Plan::default());
/// assert_eq!(state.version(), 1);
/// assert!(state.plan().is_some());
/// assert!(state.solver_output().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineState {
    session_id: String,
    version: u64,
    plan: Option<Plan>,
    solver_output: Option<SolverOutput>,
    research_output: Option<ResearchOutput>,
    verification_report: Option<VerificationReport>,
    final_writeup: Option<String>,
}

impl PipelineState {
    /// Creates an empty state for the given session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            ..Self::default()
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The number of writes made to this state.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn solver_output(&self) -> Option<&SolverOutput> {
        self.solver_output.as_ref()
    }

    pub fn research_output(&self) -> Option<&ResearchOutput> {
        self.research_output.as_ref()
    }

    pub fn verification_report(&self) -> Option<&VerificationReport> {
        self.verification_report.as_ref()
    }

    pub fn final_writeup(&self) -> Option<&str> {
        self.final_writeup.as_deref()
    }

    pub fn write_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self.bump()
    }

    pub fn write_solver_output(mut self, output: SolverOutput) -> Self {
        self.solver_output = Some(output);
        self.bump()
    }

    pub fn write_research_output(mut self, output: ResearchOutput) -> Self {
        self.research_output = Some(output);
        self.bump()
    }

    pub fn write_verification_report(mut self, report: VerificationReport) -> Self {
        self.verification_report = Some(report);
        self.bump()
    }

    pub fn write_final_writeup(mut self, writeup: String) -> Self {
        self.final_writeup = Some(writeup);
        self.bump()
    }

    fn bump(mut self) -> Self {
        self.version += 1;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn writes_accumulate() {
        let state = PipelineState::new("sess-a")
            .write_plan(Plan::default())
            .write_research_output(ResearchOutput::default())
            .write_final_writeup("done".to_owned());
        assert_eq!(state.version(), 3);
        assert_eq!(state.session_id(), "sess-a");
        assert!(state.plan().is_some());
        assert!(state.research_output().is_some());
        assert_eq!(state.final_writeup(), Some("done"));
    }

    #[test]
    fn rewrite_replaces_own_field() {
        let state = PipelineState::new("sess-a")
            .write_final_writeup("draft".to_owned())
            .write_final_writeup("final".to_owned());
        assert_eq!(state.version(), 2);
        assert_eq!(state.final_writeup(), Some("final"));
    }

    #[test]
    fn serializes_stage_keys() {
        let state = PipelineState::new("sess-a").write_verification_report(VerificationReport {
            status: VerificationStatus::Passed,
            details: Vec::new(),
        });
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["verification_report"]["status"], "passed");
        assert_eq!(json["version"], 1);
        assert!(json["solver_output"].is_null());
    }
}
