//! # Quota Errors

use thiserror::Error;

use tem_core::{TransferId, ValidationError, VesselId};

/// Failures surfaced by the quota ledger.
#[derive(Error, Debug)]
pub enum QuotaError {
    /// No balance exists for the (vessel, species, season) triple.
    #[error("no quota balance for vessel {vessel_id}, species {species}, season {season_year}")]
    UnknownBalance {
        vessel_id: VesselId,
        species: String,
        season_year: i32,
    },

    /// The source vessel's remaining balance cannot cover the request.
    #[error("insufficient quota: requested {requested} lb, remaining {remaining} lb")]
    InsufficientQuota { requested: f64, remaining: f64 },

    /// The transfer does not exist.
    #[error("transfer not found: {0}")]
    TransferNotFound(TransferId),

    /// The transfer is not in a state that permits the attempted decision.
    #[error("invalid transfer transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A transfer must move quota between two different vessels.
    #[error("transfer source and destination vessel are the same")]
    SelfTransfer,

    /// Malformed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
