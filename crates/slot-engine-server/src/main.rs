//! slot-server: HTTP meeting scheduler.
//!
//! # Usage
//!
//! ```bash
//! # Defaults, empty calendar
//! slot-server
//!
//! # Config file plus the demo calendar, overriding the bind address
//! slot-server --config scheduler.toml --demo --bind 127.0.0.1:3000
//! ```
//!
//! `RUST_LOG` controls log verbosity (default: info).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slot_engine_server::{create_router, AppState, ServerConfig};

/// Book meetings for a group of participants over HTTP.
#[derive(Debug, Parser)]
#[command(name = "slot-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Seed the calendar with demo events for users u1, u2 and u3
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if cli.demo {
        config.seed_events.extend(ServerConfig::demo_events()?);
    }
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(
        bind = %config.bind,
        timezone = %config.display_timezone,
        seeded = config.seed_events.len(),
        "slot-server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
