//! Protocol registry: message type registration and pattern queries.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{protocol_of, RegistryResult, DIDCOMM_PREFIX, MATCH_ALL};

/// Capability consumed by feature discovery: list protocols matching a query.
pub trait ProtocolRegistry: Send + Sync {
    /// Return the protocol identifiers matching `query`.
    fn protocols_matching_query(&self, query: &str) -> RegistryResult<Vec<String>>;
}

/// Message types the discover-features protocol itself defines.
pub fn builtin_message_types() -> Vec<(String, String)> {
    ["query", "disclose"]
        .iter()
        .map(|name| {
            (
                format!("{DIDCOMM_PREFIX}/discover-features/1.0/{name}"),
                format!("discover_features::{name}"),
            )
        })
        .collect()
}

/// In-memory registry mapping message type URIs to handler names.
#[derive(Debug, Clone, Default)]
pub struct MessageTypeRegistry {
    typeset: BTreeMap<String, String>,
}

impl MessageTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in discover-features messages.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.register_message_types(builtin_message_types());
        registry
    }

    /// Merge a typeset into the registry. Later entries win.
    pub fn register_message_types<I, K, V>(&mut self, typeset: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let before = self.typeset.len();
        for (message_type, handler) in typeset {
            self.typeset.insert(message_type.into(), handler.into());
        }
        tracing::debug!(
            "Registered message types: {} total ({} new)",
            self.typeset.len(),
            self.typeset.len() - before
        );
    }

    /// All registered message type URIs, sorted.
    pub fn message_types(&self) -> Vec<&str> {
        self.typeset.keys().map(String::as_str).collect()
    }

    /// Protocol identifiers derived from the registered message types.
    pub fn protocols(&self) -> BTreeSet<&str> {
        self.typeset.keys().filter_map(|t| protocol_of(t)).collect()
    }

    /// Look up the handler registered for a message type.
    pub fn resolve_message_type(&self, message_type: &str) -> Option<&str> {
        self.typeset.get(message_type).map(String::as_str)
    }

    fn matching(&self, query: &str) -> Vec<String> {
        let protocols = self.protocols();

        if query == MATCH_ALL {
            return protocols.into_iter().map(str::to_string).collect();
        }

        if let Some(prefix) = query.strip_suffix('*') {
            return protocols
                .into_iter()
                .filter(|p| p.starts_with(prefix))
                .map(str::to_string)
                .collect();
        }

        if !query.is_empty() && protocols.contains(query) {
            return vec![query.to_string()];
        }

        Vec::new()
    }
}

impl ProtocolRegistry for MessageTypeRegistry {
    fn protocols_matching_query(&self, query: &str) -> RegistryResult<Vec<String>> {
        Ok(self.matching(query))
    }
}
