//! Configuration loading and resolution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use agent_discovery::MessageTypeRegistry;

use crate::types::{AdminError, AdminResult};

/// Listen address used when neither the CLI nor the config file sets one.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8031";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AGENT_DISCOVERY_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "agent-discovery.toml";

/// Top-level admin server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub registry: RegistrySection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub addr: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
        }
    }
}

/// Extra message types registered on top of the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    pub message_types: BTreeMap<String, String>,
}

impl ServerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(content: &str) -> AdminResult<Self> {
        toml::from_str(content).map_err(|e| AdminError::Config(e.to_string()))
    }

    /// Listen address: CLI flag > config file > default.
    pub fn listen_addr(&self, cli_addr: Option<&str>) -> String {
        cli_addr.unwrap_or(&self.server.addr).to_string()
    }

    /// Build the protocol registry described by this config.
    pub fn build_registry(&self) -> MessageTypeRegistry {
        let mut registry = MessageTypeRegistry::with_builtin_types();
        registry.register_message_types(
            self.registry
                .message_types
                .iter()
                .map(|(t, h)| (t.clone(), h.clone())),
        );
        registry
    }
}

/// Resolve the config file path.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    resolve_config_path_in(explicit, std::env::var(CONFIG_ENV).ok(), Path::new("."))
}

fn resolve_config_path_in(
    explicit: Option<&str>,
    env_path: Option<String>,
    dir: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let local = dir.join(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }

    None
}

/// Load the config at `path`, or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> AdminResult<ServerConfig> {
    let Some(path) = path else {
        tracing::debug!("No config file, using defaults");
        return Ok(ServerConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        AdminError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    let config = ServerConfig::from_toml(&content)?;

    tracing::info!(
        "Loaded config from {} ({} extra message types)",
        path.display(),
        config.registry.message_types.len()
    );
    Ok(config)
}
