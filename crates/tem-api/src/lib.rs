//! # tem-api — Axum API Services
//!
//! The HTTP surface for the TEM Stack, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `/v1/tem/vessels` — vessel registration and listing
//! - `/v1/tem/landings` — landing ingest and history
//! - `/v1/tem/vessels/{id}/recompute` — explicit recompute
//! - `/v1/tem/vessels/{id}/compliance` — compliance report
//! - `/v1/quota/*` — quota balances, allocations, and transfers
//! - `/health` — liveness probe (unauthenticated)
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — they delegate to `tem-engine`
//!   and `tem-quota` and translate errors through [`AppError`].
//! - Request/response types are compile-time contracts via serde derive.

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::tem::router())
        .merge(routes::quota::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
