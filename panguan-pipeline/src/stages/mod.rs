//! The stages of the root pipeline.

pub mod explainer;
pub mod planner;
pub mod research;
pub mod solver;
pub mod verifier;

pub use explainer::Explainer;
pub use planner::Planner;
pub use research::{OfflineSearch, Research, SearchBackend, SearchError, SearchResults};
pub use solver::Solver;
pub use verifier::Verifier;
