//! AgentDiscovery admin server — HTTP access to the protocols an agent supports.

pub mod config;
pub mod routes;
pub mod transport;
pub mod types;

pub use config::{load_config, resolve_config_path, ServerConfig};
pub use transport::{router, AdminServer, AppState};
pub use types::{AdminError, AdminResult};
