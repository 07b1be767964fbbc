//! `tem serve` — run the HTTP API over the snapshot state.
//!
//! The server mutates the in-memory store for as long as it runs; the
//! snapshot is written back on graceful shutdown (ctrl-c). The quota
//! ledger is not part of the snapshot and starts empty each session.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Args;

use tem_api::AppState;
use tem_engine::ComplianceEngine;
use tem_quota::QuotaLedger;
use tem_store::StoreSnapshot;

use crate::context::stores_over;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

pub fn run_serve(args: &ServeArgs, state_path: &Path) -> anyhow::Result<()> {
    let store = StoreSnapshot::load_or_default(state_path)
        .with_context(|| format!("loading state from {}", state_path.display()))?;
    let engine = ComplianceEngine::with_defaults(stores_over(&store));
    let state = AppState::new(Arc::new(engine), Arc::new(QuotaLedger::new()));
    let app = tem_api::router(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(async {
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {addr}"))?;
        tracing::info!("TEM API listening on {addr}");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("serving")
    })?;

    StoreSnapshot::save(&store, state_path)
        .with_context(|| format!("saving state to {}", state_path.display()))?;
    println!("state saved to {}", state_path.display());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
}
