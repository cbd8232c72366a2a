//! AgentDiscovery admin server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use agent_discovery::MessageTypeRegistry;
use agent_discovery_admin::config::{load_config, resolve_config_path, ServerConfig};
use agent_discovery_admin::routes::query_registry;
use agent_discovery_admin::transport::AdminServer;
use agent_discovery_admin::types::FeatureQuery;

#[derive(Parser)]
#[command(
    name = "agent-discovery-admin",
    about = "Admin server for AgentDiscovery — query the protocols an agent supports",
    version
)]
struct Cli {
    /// Configuration file path.
    /// Also reads from AGENT_DISCOVERY_CONFIG env var.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the admin HTTP server (default).
    Serve {
        /// Listen address (host:port). Overrides the config file.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Print the protocols matching a query as JSON.
    Features {
        /// Protocol filter, e.g. "did:sov:*". Matches everything when omitted.
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   agent-discovery-admin completions bash > ~/.local/share/bash-completion/completions/agent-discovery-admin
    ///   agent-discovery-admin completions zsh > ~/.zfunc/_agent-discovery-admin
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

/// Resolve and load the config, then build the registry it describes.
fn load_registry(config: Option<&str>) -> anyhow::Result<(ServerConfig, MessageTypeRegistry)> {
    let config_path = resolve_config_path(config);
    let config = load_config(config_path.as_deref())?;
    let registry = config.build_registry();
    Ok((config, registry))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve { addr: None }) {
        Commands::Serve { addr } => {
            let (config, registry) = load_registry(cli.config.as_deref())?;
            let addr = config.listen_addr(addr.as_deref());

            tracing::info!("AgentDiscovery admin server");
            tracing::info!("Protocols: {}", registry.protocols().len());

            let server = AdminServer::new(Arc::new(registry));
            server.run(&addr).await?;
        }

        Commands::Features { query } => {
            let (_, registry) = load_registry(cli.config.as_deref())?;
            let result = query_registry(&registry, &FeatureQuery { query })?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                shell,
                &mut cmd,
                "agent-discovery-admin",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
