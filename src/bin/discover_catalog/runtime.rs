use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use clap::Parser;

use discover::catalog::MemoryCatalog;
use discover::logging::{self, LogSink, Verbosity};

use super::AppState;
use super::handlers::healthz;
use super::routes::authed_router;

#[derive(Parser)]
#[command(name = "discover-catalog")]
#[command(about = "Gateway application catalog (development)", long_about = None)]
struct Args {
    /// JSON fixture: {"environments": [...], "applications": {"<env>": [...]}}
    #[arg(long)]
    fixture: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Bearer token accepted for every route
    #[arg(long, default_value = "dev")]
    token: String,

    /// Bearer token that may browse but not import
    #[arg(long)]
    read_only_token: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, false), LogSink::Stderr)?;

    let catalog = MemoryCatalog::from_json_file(&args.fixture)
        .with_context(|| format!("load fixture {}", args.fixture.display()))?;
    let state = Arc::new(AppState {
        catalog,
        token: args.token.clone(),
        read_only_token: args.read_only_token.clone(),
    });

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(authed_router(state.clone()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("discover-catalog listening on {}", local_addr);
    tracing::info!(addr = %local_addr, fixture = %args.fixture.display(), "catalog started");

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
