//! gigboard-web - venue, artist, and show listing service
//!
//! Resolves configuration, opens (and optionally seeds) the SQLite database,
//! and serves the HTML pages until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gigboard_common::config::{Config, ConfigOverrides};
use gigboard_common::db::init_database;
use gigboard_common::seed::seed_if_empty;
use gigboard_web::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for gigboard-web
#[derive(Parser, Debug)]
#[command(name = "gigboard-web")]
#[command(about = "Venue, artist, and show listing service")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, env = "GIGBOARD_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "GIGBOARD_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "GIGBOARD_PORT")]
    port: Option<u16>,

    /// TOML config file
    #[arg(short, long, env = "GIGBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Skip loading sample data into empty tables
    #[arg(long)]
    no_seed: bool,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        ConfigOverrides {
            database: args.database,
            host: args.host,
            port: args.port,
            seed: args.no_seed.then_some(false),
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gigboard_web=info,gigboard_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting gigboard-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = Config::resolve(args.into()).context("Failed to load configuration")?;

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to open database")?;

    if config.seed {
        let report = seed_if_empty(&pool)
            .await
            .context("Failed to load sample data")?;
        info!(
            "Sample data: {} venues, {} artists, {} shows inserted",
            report.venues, report.artists, report.shows
        );
    }

    let app = build_router(AppState::new(pool));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("gigboard-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
