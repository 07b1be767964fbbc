//! # Engine Errors
//!
//! The error taxonomy for the compliance engine. Two outcomes that look
//! like errors deliberately are not: a vessel under the hull-length cutoff
//! and a history with fewer than four regular trips are non-error terminal
//! states, reported through `RecomputeOutcome` so callers can distinguish
//! "nothing wrong" from "cannot determine".

use thiserror::Error;

use tem_core::{LandingId, ValidationError, VesselId};

use crate::store::StoreError;

/// Failures surfaced by the ingest, calculator, and deriver services.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The vessel does not exist in the vessel store.
    #[error("vessel not found: {0}")]
    VesselNotFound(VesselId),

    /// The landing named by a correction does not exist.
    #[error("landing not found: {0}")]
    LandingNotFound(LandingId),

    /// The landing named by a correction was already corrected once;
    /// corrections chain from the effective entry, not a superseded one.
    #[error("landing {0} is superseded; correct the replacement entry")]
    LandingSuperseded(LandingId),

    /// No calculation exists for the vessel. Distinct from "compliant
    /// with zero trips" — the vessel has never produced a window.
    #[error("no calculation found for vessel {0}")]
    NoCalculation(VesselId),

    /// Malformed or out-of-range input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// I/O failure against a record store.
    #[error(transparent)]
    Store(#[from] StoreError),
}
