//! Composite stages that run other stages.

use crate::{stage::Stage, state::PipelineState};
use tracing::{debug, info_span};

/// Runs each stage with the given input, threading the state from one to the next.
fn run_in_order(stages: &[Box<dyn Stage>], input: &str, mut state: PipelineState) -> PipelineState {
    for stage in stages {
        let _span = info_span!("stage", name = stage.name()).entered();
        let before = state.version();
        state = stage.run(input, state);
        debug!(writes = state.version() - before, "stage finished");
    }
    state
}

/// Runs its stages one after another, passing each the state returned by the previous one.
pub struct Sequential {
    name: String,
    stages: Vec<Box<dyn Stage>>,
}

impl Sequential {
    pub fn new(name: impl Into<String>, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { name: name.into(), stages }
    }
}

impl Stage for Sequential {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        run_in_order(&self.stages, input, state)
    }
}

/// A group of independent stages that all consume the same input text.
///
/// Members are run one at a time, in the order they are listed, and each sees the writes of the
/// members before it. Members should write disjoint fields and must not read each other's output:
/// the order is deterministic, but only as an implementation detail.
pub struct Group {
    name: String,
    members: Vec<Box<dyn Stage>>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<Box<dyn Stage>>) -> Self {
        Self { name: name.into(), members }
    }
}

impl Stage for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        run_in_order(&self.members, input, state)
    }
}

#[cfg(test)]
mod tests {
    use crate::state::{Plan, PlanStep};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Appends its name to the plan steps.
    struct Mark(&'static str);

    impl Stage for Mark {
        fn name(&self) -> &str {
            self.0
        }

        fn run(&self, input: &str, state: PipelineState) -> PipelineState {
            let mut plan = state.plan().cloned().unwrap_or_default();
            plan.steps.push(PlanStep { step: self.0.to_owned(), tool: input.to_owned() });
            state.write_plan(plan)
        }
    }

    fn marks(state: &PipelineState) -> Vec<String> {
        state.plan()
            .map(|plan: &Plan| plan.steps.iter().map(|step| step.step.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn sequential_threads_state() {
        let pipeline = Sequential::new("root", vec![Box::new(Mark("a")), Box::new(Mark("b"))]);
        let state = pipeline.run("q", PipelineState::new("sess"));
        assert_eq!(marks(&state), ["a", "b"]);
        assert_eq!(state.version(), 2);
    }

    #[test]
    fn group_members_share_input_and_run_in_listed_order() {
        let pipeline = Sequential::new("root", vec![
            Box::new(Mark("plan")),
            Box::new(Group::new("group", vec![Box::new(Mark("left")), Box::new(Mark("right"))])),
            Box::new(Mark("end")),
        ]);
        let state = pipeline.run("question", PipelineState::new("sess"));
        assert_eq!(marks(&state), ["plan", "left", "right", "end"]);
        assert!(state.plan().unwrap().steps.iter().all(|step| step.tool == "question"));
    }

    #[test]
    fn empty_group_is_identity() {
        let state = Group::new("empty", Vec::new()).run("q", PipelineState::new("sess"));
        assert_eq!(state, PipelineState::new("sess"));
    }
}
