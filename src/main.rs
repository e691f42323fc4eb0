use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsrelay::config::{loader::load_config, RelayConfig};
use wsrelay::lifecycle::Shutdown;
use wsrelay::net::listener::Listener;
use wsrelay::tunnel::TunnelServer;

#[derive(Parser)]
#[command(name = "wsrelay")]
#[command(about = "TCP relay behind an HTTP/WebSocket-upgrade handshake", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Listening port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wsrelay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load configuration");
                std::process::exit(1);
            }
        },
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        port = config.listener.port,
        default_target = %format!("{}:{}", config.target.default_host, config.target.default_port),
        idle_timeout_secs = config.session.idle_timeout_secs,
        "Configuration loaded"
    );

    // Bind/listen failures are the only fatal errors in the system.
    let listener = match Listener::bind(&config.listener) {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received, stopping accept loop");
            shutdown.trigger();
        }
    });

    let server = TunnelServer::new(config);
    server.run(listener, shutdown_rx).await;

    tracing::info!("Shutdown complete");
}
