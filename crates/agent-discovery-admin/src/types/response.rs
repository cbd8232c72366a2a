//! Response bodies returned by the admin endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use agent_discovery::ProtocolDescriptor;

/// Body of `GET /features`: matched protocols keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub results: BTreeMap<String, ProtocolDescriptor>,
}

impl QueryResult {
    /// Map each protocol to an empty descriptor.
    pub fn from_protocols<I>(protocols: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            results: protocols
                .into_iter()
                .map(|p| (p, ProtocolDescriptor::default()))
                .collect(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub protocols: usize,
}
