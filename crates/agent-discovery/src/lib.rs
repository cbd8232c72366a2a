//! AgentDiscovery — protocol registry for agent feature discovery.

pub mod registry;
pub mod types;

pub use registry::{builtin_message_types, MessageTypeRegistry, ProtocolRegistry};
pub use types::*;
