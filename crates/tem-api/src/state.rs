//! # Application State
//!
//! Shared state for the Axum application: the compliance engine bundle
//! and the quota ledger, behind `Arc` so the state clones cheaply into
//! every handler.

use std::sync::Arc;

use tem_engine::ComplianceEngine;
use tem_quota::QuotaLedger;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ComplianceEngine>,
    pub quota: Arc<QuotaLedger>,
}

impl AppState {
    /// Assemble the state from service handles.
    pub fn new(engine: Arc<ComplianceEngine>, quota: Arc<QuotaLedger>) -> Self {
        Self { engine, quota }
    }
}
