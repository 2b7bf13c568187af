//! The contract every pipeline stage implements.

use crate::state::PipelineState;

/// A stage of the pipeline.
///
/// A stage reads the question text and whatever earlier stages have written to the state, then
/// returns the state with its own output written. Stages must not fail: errors are recorded in
/// the stage's output instead.
pub trait Stage {
    /// The name of the stage, used in logs.
    fn name(&self) -> &str;

    /// Runs the stage.
    fn run(&self, input: &str, state: PipelineState) -> PipelineState;
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        (**self).run(input, state)
    }
}
