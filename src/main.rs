use slircb::config::Config;
use slircb::handlers::Dispatcher;
use slircb::network;
use slircb::state::AdminRegistry;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        addr = %config.server.addr,
        nick = %config.server.nick,
        channels = config.channels.len(),
        "Starting slircb"
    );

    // The bot must not start without a valid admin set: a corrupt state
    // file aborts here rather than defaulting to no restriction.
    let admins = AdminRegistry::load(&config.admin.state_path, config.admin.hosts.clone())
        .map_err(|e| {
            error!(path = %config.admin.state_path, error = %e, "Failed to load admin set");
            e
        })?;
    let admins = Arc::new(admins);

    // Feature handlers (factoids, analyzer) register here when compiled in;
    // the core runs with the admin executor alone.
    let dispatcher = Dispatcher::new(config.channels.clone(), Arc::clone(&admins));

    network::run(&config, dispatcher).await
}
