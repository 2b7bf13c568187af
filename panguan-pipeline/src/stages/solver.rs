use crate::{router::route, stage::Stage, state::PipelineState};
use tracing::info;

/// Routes the question to a symbolic tool and writes the derivation and final answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver;

impl Stage for Solver {
    fn name(&self) -> &str {
        "solve"
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        let output = route(input);
        info!(route = %output.routed_by, answer = %output.final_answer, "solved");
        state.write_solver_output(output)
    }
}
