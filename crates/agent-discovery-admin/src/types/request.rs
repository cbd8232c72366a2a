//! Query-string parameters accepted by the admin endpoints.

use serde::{Deserialize, Serialize};

use agent_discovery::MATCH_ALL;

/// Query string for `GET /features`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureQuery {
    /// Glob-style protocol filter, e.g. `did:sov:*`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FeatureQuery {
    /// The pattern to match, `*` when none was given.
    pub fn pattern(&self) -> &str {
        self.query.as_deref().unwrap_or(MATCH_ALL)
    }
}
