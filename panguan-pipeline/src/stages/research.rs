//! The research stage and the search backends it can be given.

use crate::{
    stage::Stage,
    state::{Citation, PipelineState, ResearchOutput},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// What a [`SearchBackend`] found for a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub citations: Vec<Citation>,
    pub key_expressions: Vec<String>,
}

/// An error from a [`SearchBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search backend `{backend}` is unavailable: {reason}")]
    Unavailable {
        backend: String,
        reason: String,
    },

    #[error("search backend `{backend}` returned a malformed response")]
    MalformedResponse {
        backend: String,
    },
}

/// A source of citations for the research stage.
pub trait SearchBackend {
    /// The name of the backend, used in logs and errors.
    fn name(&self) -> &str;

    /// Searches for sources relevant to the query.
    fn search(&self, query: &str) -> Result<SearchResults, SearchError>;
}

/// A backend that never finds anything. This is the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSearch;

impl SearchBackend for OfflineSearch {
    fn name(&self) -> &str {
        "offline"
    }

    fn search(&self, _: &str) -> Result<SearchResults, SearchError> {
        Ok(SearchResults::default())
    }
}

/// The backends that can be selected in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Offline,
}

/// The `[research]` section of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub backend: BackendKind,
}

impl ResearchConfig {
    /// Constructs the configured backend.
    pub fn build_backend(&self) -> Box<dyn SearchBackend> {
        match self.backend {
            BackendKind::Offline => Box::new(OfflineSearch),
        }
    }
}

/// Looks up sources for the question with the backend it owns.
///
/// The output always has the same shape. If the backend fails, the failure is logged and the
/// output is empty.
pub struct Research {
    backend: Box<dyn SearchBackend>,
}

impl Research {
    pub fn new(backend: Box<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Summarizes the citations found, or returns an empty summary if there are none.
    fn summarize(citations: &[Citation]) -> String {
        if citations.is_empty() {
            return String::new();
        }

        let titles = citations.iter()
            .map(|citation| citation.title.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        format!("{} source(s) consulted: {}", citations.len(), titles)
    }
}

impl Stage for Research {
    fn name(&self) -> &str {
        "research"
    }

    fn run(&self, input: &str, state: PipelineState) -> PipelineState {
        let results = match self.backend.search(input) {
            Ok(results) => results,
            Err(err) => {
                warn!(backend = self.backend.name(), error = %err, "search failed");
                SearchResults::default()
            },
        };
        debug!(backend = self.backend.name(), citations = results.citations.len(), "searched");

        state.write_research_output(ResearchOutput {
            summary: Self::summarize(&results.citations),
            citations: results.citations,
            key_expressions: results.key_expressions,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    struct Fixed;

    impl SearchBackend for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn search(&self, query: &str) -> Result<SearchResults, SearchError> {
            Ok(SearchResults {
                citations: vec![Citation {
                    title: "Power rule".to_owned(),
                    url: "https://example.org/power-rule".to_owned(),
                    snippet: query.to_owned(),
                }],
                key_expressions: vec!["x^(n+1)/(n+1)".to_owned()],
            })
        }
    }

    struct Down;

    impl SearchBackend for Down {
        fn name(&self) -> &str {
            "down"
        }

        fn search(&self, _: &str) -> Result<SearchResults, SearchError> {
            Err(SearchError::Unavailable {
                backend: "down".to_owned(),
                reason: "no network".to_owned(),
            })
        }
    }

    fn research(backend: impl SearchBackend + 'static, input: &str) -> ResearchOutput {
        Research::new(Box::new(backend))
            .run(input, PipelineState::new("sess"))
            .research_output()
            .cloned()
            .unwrap()
    }

    #[test]
    fn offline_is_empty() {
        assert_eq!(research(OfflineSearch, "∫ x dx"), ResearchOutput::default());
    }

    #[test]
    fn injected_backend() {
        let output = research(Fixed, "∫ x dx");
        assert_eq!(output.summary, "1 source(s) consulted: Power rule");
        assert_eq!(output.citations[0].snippet, "∫ x dx");
        assert_eq!(output.key_expressions, ["x^(n+1)/(n+1)"]);
    }

    #[test]
    fn failing_backend_keeps_shape() {
        assert_eq!(research(Down, "q"), ResearchOutput::default());
    }

    #[test]
    fn error_message() {
        let err = SearchError::MalformedResponse { backend: "web".to_owned() };
        assert_eq!(err.to_string(), "search backend `web` returned a malformed response");
    }
}
