//! Core data types for message types, protocols, and query results.

use serde::{Deserialize, Serialize};

/// Query pattern that matches every registered protocol.
pub const MATCH_ALL: &str = "*";

/// Message family prefix used by the built-in discover-features messages.
pub const DIDCOMM_PREFIX: &str = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec";

/// Descriptor attached to each protocol in a query result.
///
/// Carries no fields yet and serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDescriptor {}

/// Return the protocol identifier of a message type URI.
///
/// The protocol is everything before the final `/`. Message types without a
/// `/`, or whose only `/` is the leading character, have no protocol.
pub fn protocol_of(message_type: &str) -> Option<&str> {
    match message_type.rfind('/') {
        Some(pos) if pos > 0 => Some(&message_type[..pos]),
        _ => None,
    }
}

/// Errors that can occur while answering registry queries.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    #[error("Lookup failed: {0}")]
    Lookup(String),
}

/// Convenience result type.
pub type RegistryResult<T> = Result<T, RegistryError>;
