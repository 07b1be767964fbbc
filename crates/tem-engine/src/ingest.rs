//! # Landing Ingest
//!
//! Front door for new and corrected landings. Validates bounds, persists
//! the record, then synchronously runs the calculator for the owning
//! vessel — the ingest call does not report success until recomputation
//! has completed, so a caller holding an [`IngestReceipt`] knows the
//! stored calculation set already reflects the landing it submitted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tem_core::{
    ComplianceLimits, Landing, LandingCorrection, LandingId, LandingSubmission, ValidationError,
};

use crate::calculator::{Calculator, RecomputeOutcome};
use crate::error::EngineError;
use crate::store::{LandingStore, VesselStore};

/// What an accepted submission produced: the stored landing and the
/// outcome of the recompute it triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub landing: Landing,
    pub outcome: RecomputeOutcome,
}

/// The landing ingest service.
pub struct LandingIngest {
    vessels: Arc<dyn VesselStore>,
    landings: Arc<dyn LandingStore>,
    calculator: Calculator,
    limits: ComplianceLimits,
}

impl LandingIngest {
    /// Construct the ingest service over the given stores and calculator.
    pub fn new(
        vessels: Arc<dyn VesselStore>,
        landings: Arc<dyn LandingStore>,
        calculator: Calculator,
        limits: ComplianceLimits,
    ) -> Self {
        Self {
            vessels,
            landings,
            calculator,
            limits,
        }
    }

    /// Accept a new landing.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] when the weight is out of bounds.
    /// - [`EngineError::VesselNotFound`] for an unregistered vessel.
    /// - Any calculator failure from the triggered recompute.
    pub fn submit(&self, submission: LandingSubmission) -> Result<IngestReceipt, EngineError> {
        self.limits.validate_pounds(submission.pounds)?;

        let vessel = self
            .vessels
            .get_vessel(&submission.vessel_id)?
            .ok_or_else(|| EngineError::VesselNotFound(submission.vessel_id.clone()))?;

        let landing = Landing::from_submission(submission);
        self.landings.insert_landing(landing.clone())?;
        tracing::info!(vessel = %vessel.id, landing = %landing.id,
            pounds = landing.pounds, date = %landing.landing_date, "landing accepted");

        let outcome = self.calculator.recompute(&landing.vessel_id)?;
        Ok(IngestReceipt { landing, outcome })
    }

    /// Accept an approved correction to an existing landing.
    ///
    /// The original entry stays on record; a superseding entry joins the
    /// history and the vessel is fully recomputed.
    pub fn correct(
        &self,
        landing_id: &LandingId,
        correction: LandingCorrection,
    ) -> Result<IngestReceipt, EngineError> {
        if correction.reason.trim().is_empty() {
            return Err(
                ValidationError::new("reason", "a correction must state its reason").into(),
            );
        }

        let original = self
            .landings
            .get_landing(landing_id)?
            .ok_or_else(|| EngineError::LandingNotFound(landing_id.clone()))?;

        // Refuse to chain a correction off an entry that is itself
        // superseded; the caller should correct the effective entry.
        let effective = self.landings.effective_landings(&original.vessel_id)?;
        if !effective.iter().any(|l| l.id == original.id) {
            return Err(EngineError::LandingSuperseded(landing_id.clone()));
        }

        if let Some(pounds) = correction.pounds {
            self.limits.validate_pounds(pounds)?;
        }

        let corrected = original.corrected(&correction);
        self.landings.insert_landing(corrected.clone())?;
        tracing::info!(vessel = %corrected.vessel_id, original = %original.id,
            corrected = %corrected.id, reason = %correction.reason, "landing corrected");

        let outcome = self.calculator.recompute(&corrected.vessel_id)?;
        Ok(IngestReceipt {
            landing: corrected,
            outcome,
        })
    }
}
