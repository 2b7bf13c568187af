use crate::{
    stage::Stage,
    state::{Plan, PipelineState, PlanStep},
};
use tracing::debug;

/// Writes a plan based on keywords in the question.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner;

impl Planner {
    /// Builds the plan for the question.
    pub fn plan(text: &str) -> Plan {
        let text = text.to_lowercase();
        let mut plan = Plan::default();
        let mut add = |step: &str, tool: &str, theorem: &str, check: &str| {
            plan.steps.push(PlanStep { step: step.to_owned(), tool: tool.to_owned() });
            plan.expected_theorems.push(theorem.to_owned());
            plan.verification_items.push(check.to_owned());
        };

        if text.contains("integral") || text.contains('∫') || text.contains(r"\int") || text.starts_with("integrate(") {
            add(
                "Compute integral",
                "integrate",
                "Fundamental Theorem of Calculus",
                "Differentiate result to recover integrand",
            );
        }
        if text.contains("solve") || text.contains('=') {
            add(
                "Solve equation",
                "solve_equation",
                "Quadratic formula (if polynomial)",
                "Plug solutions back into equation",
            );
        }
        if text.contains("limit(") {
            add(
                "Compute limit",
                "limit",
                "Definition of e via (1+1/n)^n",
                "Numeric approach check",
            );
        }

        plan
    }
}

impl Stage for Planner {
    fn name(&self) -> &str {
        "plan"
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        let plan = Self::plan(input);
        debug!(steps = plan.steps.len(), "planned");
        state.write_plan(plan)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn integral_keywords() {
        let plan = Planner::plan("Compute ∫_0^1 x^2 dx");
        assert_eq!(plan.steps, [PlanStep {
            step: "Compute integral".to_owned(),
            tool: "integrate".to_owned(),
        }]);
        assert_eq!(plan.expected_theorems, ["Fundamental Theorem of Calculus"]);
    }

    #[test]
    fn several_keywords() {
        let plan = Planner::plan("Solve integral(x) = limit(x, x, 0)");
        let steps = plan.steps.iter().map(|step| step.step.as_str()).collect::<Vec<_>>();
        assert_eq!(steps, ["Compute integral", "Solve equation", "Compute limit"]);
    }

    #[test]
    fn nothing_recognized() {
        assert_eq!(Planner::plan("hello"), Plan::default());
    }
}
