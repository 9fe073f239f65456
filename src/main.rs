//! KXN order service entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use kxn_orders::api::{create_router, AppState};
use kxn_orders::config::Config;
use kxn_orders::logging::init_logging;
use kxn_orders::metrics;
use kxn_orders::orders::OrderStore;
use kxn_orders::utils::shutdown_signal;
use kxn_orders::ServiceError;

/// KXN order service.
#[derive(Parser, Debug)]
#[command(name = "kxn-orders")]
#[command(about = "In-memory order service with a JSON HTTP API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port, host }) => cmd_serve(args.verbose, port, host).await,
        None => cmd_serve(args.verbose, args.port, args.host).await,
    }
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("KXN ORDER SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.host, config.port);
    println!("  Log File: {}/{}", config.log_dir, config.log_file);
    println!("  Log Level: {}", config.rust_log);
    println!("  Id Strategy: {}", config.id_strategy);
    println!(
        "  Payload Errors: {}",
        if config.strict_payloads { "400 Bad Request" } else { "500 Internal Server Error" }
    );
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    verbose: bool,
    port_override: Option<u16>,
    host_override: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load().map_err(ServiceError::from)?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(host) = host_override {
        config.host = host;
    }

    config.validate().map_err(ServiceError::InvalidConfig)?;

    // Keep the guard alive so buffered log lines reach the file on exit.
    let _log_guard = init_logging(&config, verbose)?;

    info!("Configuration loaded successfully");

    let store = Arc::new(OrderStore::new(config.id_strategy));
    info!("Id strategy: {}", store.id_strategy());
    info!("Strict payloads: {}", config.strict_payloads);
    let mut app_state = AppState::new(store).with_strict_payloads(config.strict_payloads);

    if config.metrics_enabled {
        let handle = metrics::install_recorder().map_err(|e| {
            error!("Failed to install metrics recorder: {}", e);
            ServiceError::from(e)
        })?;
        app_state = app_state.with_metrics(handle);
    }

    let addr = config.bind_addr().map_err(ServiceError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("HTTP server stopped");
    Ok(())
}
