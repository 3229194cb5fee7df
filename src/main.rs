use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagewise_api::config::{self, AppConfig};
use pagewise_api::services::{AppServices, Clock};

#[derive(Parser, Debug)]
#[command(name = "pagewise-api")]
#[command(about = "Pagewise reading progress API server")]
#[command(version)]
struct ServerArgs {
    /// Interface to bind; overrides PAGEWISE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on; overrides PAGEWISE_PORT / PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECURITY_JWT_SECRET, PAGEWISE_PORT, etc.
    let _ = dotenvy::dotenv();
    let args = ServerArgs::parse();

    let config = resolve_config(config::config().clone(), &args);
    init_tracing(&config);

    config.validate().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        utc_offset_minutes = config.tracker.utc_offset_minutes,
        "starting Pagewise API"
    );

    let services = AppServices::in_memory(&config, Clock::System);
    let app = pagewise_api::app(services, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn resolve_config(mut config: AppConfig, args: &ServerArgs) -> AppConfig {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
}

fn init_tracing(config: &AppConfig) {
    // Respect RUST_LOG if set; otherwise info for this crate and request logs per config.
    let http_level = if config.api.enable_request_logging { "debug" } else { "warn" };
    let default_filter = format!("pagewise_api=info,tower_http={}", http_level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(false).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
