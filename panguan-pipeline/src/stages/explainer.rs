use crate::{
    stage::Stage,
    state::{PipelineState, Plan, ResearchOutput, SolverOutput, VerificationReport},
};
use std::fmt::Write;

/// Renders everything in the state into the final Markdown write-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Explainer;

fn plan_section(out: &mut String, plan: Option<&Plan>) {
    out.push_str("### Plan\n");
    match plan {
        Some(plan) if !plan.steps.is_empty() => {
            for (i, step) in plan.steps.iter().enumerate() {
                let _ = writeln!(out, "{}. {} (`{}`)", i + 1, step.step, step.tool);
            }
            let _ = writeln!(out, "\nExpected theorems: {}", plan.expected_theorems.join(", "));
            let _ = writeln!(out, "Verification items: {}", plan.verification_items.join(", "));
        },
        _ => out.push_str("No plan.\n"),
    }
}

fn derivation_section(out: &mut String, solver: Option<&SolverOutput>) {
    out.push_str("\n### Derivation Steps\n");
    for step in solver.into_iter().flat_map(|solver| &solver.derivation_steps) {
        let _ = writeln!(out, "- ${}$", step);
    }
}

fn research_section(out: &mut String, research: Option<&ResearchOutput>) {
    out.push_str("\n### Research Notes\n");
    let Some(research) = research.filter(|research| !research.citations.is_empty()) else {
        out.push_str("No research notes.\n");
        return;
    };

    let _ = writeln!(out, "{}", research.summary);
    for citation in &research.citations {
        let _ = writeln!(out, "- [{}]({}): {}", citation.title, citation.url, citation.snippet);
    }
    if !research.key_expressions.is_empty() {
        let _ = writeln!(out, "\nKey expressions: {}", research.key_expressions.join(", "));
    }
}

fn verification_section(out: &mut String, report: Option<&VerificationReport>) {
    out.push_str("\n### Verification\n");
    let Some(report) = report else {
        out.push_str("Not verified.\n");
        return;
    };

    let _ = writeln!(out, "Status: {}", report.status);
    for detail in &report.details {
        let _ = writeln!(out, "- {}", detail);
    }
}

impl Explainer {
    /// Renders the write-up for the state.
    pub fn explain(state: &PipelineState) -> String {
        let mut out = String::new();
        plan_section(&mut out, state.plan());
        derivation_section(&mut out, state.solver_output());
        research_section(&mut out, state.research_output());
        verification_section(&mut out, state.verification_report());

        let answer = state.solver_output()
            .map(|solver| solver.final_answer.as_str())
            .unwrap_or_default();
        let _ = write!(out, "\n### Final Answer\n\\boxed{{{}}}", answer);
        out
    }
}

impl Stage for Explainer {
    fn name(&self) -> &str {
        "explain"
    }

    fn run(&self, _: &str, state: PipelineState) -> PipelineState {
        let writeup = Self::explain(&state);
        state.write_final_writeup(writeup)
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{Route, VerificationStatus};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn full_writeup() {
        let state = PipelineState::new("sess")
            .write_plan(Plan::default())
            .write_solver_output(SolverOutput {
                derivation_steps: vec!["1 + 1 = 2".to_owned()],
                final_answer: "2".to_owned(),
                routed_by: Route::Fallback,
            })
            .write_research_output(ResearchOutput::default())
            .write_verification_report(VerificationReport {
                status: VerificationStatus::Passed,
                details: vec!["Numeric evaluation: 2".to_owned()],
            });

        assert_eq!(Explainer::explain(&state), "### Plan\n\
            No plan.\n\
            \n### Derivation Steps\n\
            - $1 + 1 = 2$\n\
            \n### Research Notes\n\
            No research notes.\n\
            \n### Verification\n\
            Status: passed\n\
            - Numeric evaluation: 2\n\
            \n### Final Answer\n\
            \\boxed{2}");
    }

    #[test]
    fn empty_state_still_has_every_section() {
        let writeup = Explainer::explain(&PipelineState::new("sess"));
        for header in ["### Plan", "### Derivation Steps", "### Research Notes", "### Verification", "### Final Answer"] {
            assert!(writeup.contains(header), "missing {}", header);
        }
        assert!(writeup.ends_with(r"\boxed{}"));
    }
}
