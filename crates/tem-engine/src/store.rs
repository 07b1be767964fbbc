//! # Store Ports
//!
//! The engine's view of persistence: four narrow traits, one per record
//! family. Backends implement these; the engine holds them as explicit
//! `Arc<dyn ...>` handles passed in at construction. This replaces the
//! module-level database client the original system reached for — a
//! capability you hand to a service, not an ambient singleton.
//!
//! Ownership rules enforced by this split:
//! - `Landing` rows are written only through [`LandingStore::insert_landing`]
//!   (the ingest service); nothing ever updates or deletes one.
//! - `TripWindowCalculation` rows are written only by the calculator.
//! - `PenaltyAssessment` rows are append-only.

use thiserror::Error;

use tem_core::{
    Landing, LandingId, PenaltyAssessment, TripWindowCalculation, Vessel, VesselId,
};

/// I/O failure against a record store.
///
/// Carries the operation name so a failed recompute can say *which* access
/// failed, not just that one did.
#[derive(Error, Debug, Clone)]
#[error("store error in {operation}: {message}")]
pub struct StoreError {
    /// The store operation that failed (e.g., `upsert_calculation`).
    pub operation: &'static str,
    /// Backend-specific failure description.
    pub message: String,
}

impl StoreError {
    /// Create a store error for `operation` with the given description.
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Read access to registered vessels, plus registration writes.
pub trait VesselStore: Send + Sync {
    /// Look up a vessel by id.
    fn get_vessel(&self, id: &VesselId) -> Result<Option<Vessel>, StoreError>;

    /// Insert or replace a vessel record.
    fn put_vessel(&self, vessel: Vessel) -> Result<(), StoreError>;

    /// All registered vessels.
    fn list_vessels(&self) -> Result<Vec<Vessel>, StoreError>;
}

/// Append-only landing history per vessel.
pub trait LandingStore: Send + Sync {
    /// Append a landing. Never updates an existing row.
    fn insert_landing(&self, landing: Landing) -> Result<(), StoreError>;

    /// Look up a single landing by id, superseded or not.
    fn get_landing(&self, id: &LandingId) -> Result<Option<Landing>, StoreError>;

    /// The vessel's *effective* history: superseded entries excluded,
    /// ascending by landing date (ties broken by recording order). This
    /// is the sequence the calculator windows over.
    fn effective_landings(&self, vessel_id: &VesselId) -> Result<Vec<Landing>, StoreError>;

    /// Every stored landing for the vessel including superseded entries,
    /// newest landing date first — the reporting view.
    fn all_landings(&self, vessel_id: &VesselId) -> Result<Vec<Landing>, StoreError>;
}

/// Derived trip-window calculations, owned exclusively by the calculator.
pub trait CalculationStore: Send + Sync {
    /// Insert or replace the window stored under `calc.key()`.
    fn upsert_calculation(&self, calc: TripWindowCalculation) -> Result<(), StoreError>;

    /// All stored windows for the vessel, ascending by sequence.
    fn calculations_for(
        &self,
        vessel_id: &VesselId,
    ) -> Result<Vec<TripWindowCalculation>, StoreError>;

    /// The stored window with the highest sequence, if any.
    fn latest_calculation(
        &self,
        vessel_id: &VesselId,
    ) -> Result<Option<TripWindowCalculation>, StoreError>;

    /// Delete stored windows with `sequence >= first_stale_sequence`.
    /// Called after a recompute whose window count shrank (a correction
    /// can remove trips from the regular sequence).
    fn prune_from(
        &self,
        vessel_id: &VesselId,
        first_stale_sequence: u32,
    ) -> Result<(), StoreError>;
}

/// Append-only ledger of assessed penalties.
pub trait PenaltyStore: Send + Sync {
    /// Append an assessment. Assessments are immutable historical facts.
    fn append_assessment(&self, assessment: PenaltyAssessment) -> Result<(), StoreError>;

    /// All assessments for the vessel, in assessment order.
    fn assessments_for(&self, vessel_id: &VesselId)
        -> Result<Vec<PenaltyAssessment>, StoreError>;
}
