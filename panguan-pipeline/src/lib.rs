//! The staged pipeline that turns a math question into a written-up, verified answer.
//!
//! A pipeline is a tree of [`Stage`]s threading one [`PipelineState`] through. The root pipeline
//! built by [`build_root_pipeline`] is:
//!
//! ```text
//! Plan -> Group(Solve, Research) -> Verify -> Explain
//! ```
//!
//! Each stage writes one field of the state: `plan`, `solver_output`, `research_output`,
//! `verification_report` and `final_writeup`. The solver delegates to the [`router`], which picks
//! the symbolic tool to use from the text of the question.
//!
//! ```
//! use panguan_pipeline::{build_root_pipeline, stages::OfflineSearch, PipelineState, Stage};
//!
//! let pipeline = build_root_pipeline(Box::new(OfflineSearch));
//! let state = pipeline.run("Compute ∫_0^1 x^2 dx", PipelineState::new("sess-doc"));
//! assert_eq!(state.solver_output().unwrap().final_answer, "1/3");
//! assert!(state.final_writeup().unwrap().ends_with(r"\boxed{1/3}"));
//! ```

pub mod router;
pub mod runner;
pub mod stage;
pub mod stages;
pub mod state;

pub use runner::{Group, Sequential};
pub use stage::Stage;
pub use state::PipelineState;

use stages::{Explainer, Planner, Research, SearchBackend, Solver, Verifier};

/// Builds the root pipeline, giving the research stage the provided search backend.
pub fn build_root_pipeline(backend: Box<dyn SearchBackend>) -> Sequential {
    Sequential::new("root", vec![
        Box::new(Planner),
        Box::new(Group::new("solve-and-research", vec![
            Box::new(Solver),
            Box::new(Research::new(backend)),
        ])),
        Box::new(Verifier),
        Box::new(Explainer),
    ])
}
