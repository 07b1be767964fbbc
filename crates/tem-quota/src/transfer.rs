//! # Transfer Request Lifecycle
//!
//! An inter-vessel quota transfer moves through `PENDING → APPROVED` or
//! `PENDING → REJECTED`; both outcomes are terminal. The request records
//! who decided and when. Balance adjustment is not done here — the
//! ledger settles an approval atomically while it holds its lock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tem_core::{Timestamp, TransferId, ValidationError, VesselId};

use crate::error::QuotaError;

/// Whether a transfer is a seasonal lease or a permanent reallocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferType {
    Lease,
    Permanent,
}

impl std::fmt::Display for TransferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Lease => "LEASE",
            Self::Permanent => "PERMANENT",
        };
        f.write_str(s)
    }
}

/// Lifecycle state of a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferState {
    /// Submitted, awaiting a manager decision.
    Pending,
    /// Approved and settled (terminal).
    Approved,
    /// Rejected (terminal).
    Rejected,
}

impl TransferState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for TransferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Input for a new transfer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSubmission {
    pub from_vessel_id: VesselId,
    pub to_vessel_id: VesselId,
    pub species_code: String,
    pub transfer_type: TransferType,
    pub pounds: f64,
    pub season_year: i32,
    pub transfer_reason: Option<String>,
    pub expiration_date: Option<NaiveDate>,
}

/// A quota transfer request with its decision trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id: TransferId,
    pub from_vessel_id: VesselId,
    pub to_vessel_id: VesselId,
    pub species_code: String,
    pub transfer_type: TransferType,
    pub pounds: f64,
    pub season_year: i32,
    pub transfer_reason: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub state: TransferState,
    pub requested_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub decided_by: Option<String>,
    pub decision_note: Option<String>,
}

impl TransferRequest {
    /// Create a pending request from a validated submission.
    pub fn new(submission: TransferSubmission) -> Result<Self, QuotaError> {
        if submission.from_vessel_id == submission.to_vessel_id {
            return Err(QuotaError::SelfTransfer);
        }
        if !submission.pounds.is_finite() || submission.pounds <= 0.0 {
            return Err(ValidationError::new(
                "pounds",
                format!("transfer weight must be positive, got {}", submission.pounds),
            )
            .into());
        }
        if submission.species_code.trim().is_empty() {
            return Err(ValidationError::new("species_code", "must not be empty").into());
        }
        Ok(Self {
            id: TransferId::new(),
            from_vessel_id: submission.from_vessel_id,
            to_vessel_id: submission.to_vessel_id,
            species_code: submission.species_code,
            transfer_type: submission.transfer_type,
            pounds: submission.pounds,
            season_year: submission.season_year,
            transfer_reason: submission.transfer_reason,
            expiration_date: submission.expiration_date,
            state: TransferState::Pending,
            requested_at: Timestamp::now(),
            decided_at: None,
            decided_by: None,
            decision_note: None,
        })
    }

    /// Mark approved (PENDING → APPROVED). The ledger settles balances.
    pub(crate) fn approve(&mut self, reviewer: &str) -> Result<(), QuotaError> {
        self.require_pending("APPROVED")?;
        self.state = TransferState::Approved;
        self.decided_at = Some(Timestamp::now());
        self.decided_by = Some(reviewer.to_string());
        Ok(())
    }

    /// Mark rejected (PENDING → REJECTED).
    pub(crate) fn reject(&mut self, reviewer: &str, note: &str) -> Result<(), QuotaError> {
        self.require_pending("REJECTED")?;
        self.state = TransferState::Rejected;
        self.decided_at = Some(Timestamp::now());
        self.decided_by = Some(reviewer.to_string());
        self.decision_note = Some(note.to_string());
        Ok(())
    }

    fn require_pending(&self, target: &str) -> Result<(), QuotaError> {
        if self.state != TransferState::Pending {
            return Err(QuotaError::InvalidTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }
        Ok(())
    }
}
