//! # Violation & Penalty Deriver
//!
//! Read-side derivation over the stored calculation history: the latest
//! window's classification, the cumulative non-compliant window count,
//! and the penalty amount that count maps to under the escalating
//! schedule. `compliance_status` never mutates anything.
//!
//! Assessing a penalty is a separate, explicit act: `assess_penalty`
//! snapshots the current derivation into an immutable record in the
//! penalty ledger. Corrections applied later change future derivations,
//! never a past assessment.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tem_core::{
    ComplianceStatus, PenaltyAssessment, PenaltySchedule, Timestamp, VesselId,
};

use crate::error::EngineError;
use crate::store::{CalculationStore, PenaltyStore};

/// Current compliance standing for a vessel, derived on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub vessel_id: VesselId,
    /// Average pounds of the most recent window.
    pub latest_average: f64,
    /// Whether the most recent window is compliant.
    pub is_compliant: bool,
    /// Classification of the most recent window.
    pub status: ComplianceStatus,
    /// Non-compliant windows across the vessel's stored history.
    pub violation_count: usize,
    /// Penalty the violation count maps to under the schedule.
    pub penalty_amount: u32,
    /// When the most recent window was computed.
    pub calculation_date: NaiveDate,
    /// First landing date of the most recent window.
    pub window_start: NaiveDate,
    /// Last landing date of the most recent window.
    pub window_end: NaiveDate,
}

/// The violation and penalty derivation service.
pub struct ComplianceDeriver {
    calculations: Arc<dyn CalculationStore>,
    penalties: Arc<dyn PenaltyStore>,
    schedule: PenaltySchedule,
}

impl ComplianceDeriver {
    /// Construct the deriver over the calculation and penalty stores.
    pub fn new(
        calculations: Arc<dyn CalculationStore>,
        penalties: Arc<dyn PenaltyStore>,
        schedule: PenaltySchedule,
    ) -> Self {
        Self {
            calculations,
            penalties,
            schedule,
        }
    }

    /// Derive the vessel's current compliance standing.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoCalculation`] when the vessel has never produced
    /// a window — distinct from being compliant with zero trips.
    pub fn compliance_status(&self, vessel_id: &VesselId) -> Result<ComplianceReport, EngineError> {
        let latest = self
            .calculations
            .latest_calculation(vessel_id)?
            .ok_or_else(|| EngineError::NoCalculation(vessel_id.clone()))?;

        let history = self.calculations.calculations_for(vessel_id)?;
        let violation_count = history.iter().filter(|c| !c.is_compliant).count();
        let penalty_amount = self.schedule.amount_for(violation_count);

        Ok(ComplianceReport {
            vessel_id: vessel_id.clone(),
            latest_average: latest.average_pounds,
            is_compliant: latest.is_compliant,
            status: latest.status(),
            violation_count,
            penalty_amount,
            calculation_date: latest.calculation_date,
            window_start: latest.window_start,
            window_end: latest.window_end,
        })
    }

    /// Assess the vessel's current penalty and record it immutably.
    ///
    /// The returned assessment is already persisted; it will never change,
    /// even if later corrections alter the derived violation count.
    pub fn assess_penalty(
        &self,
        vessel_id: &VesselId,
        season_year: i32,
    ) -> Result<PenaltyAssessment, EngineError> {
        let report = self.compliance_status(vessel_id)?;
        let assessment = PenaltyAssessment {
            id: tem_core::AssessmentId::new(),
            vessel_id: vessel_id.clone(),
            season_year,
            violation_count: report.violation_count as u32,
            amount: report.penalty_amount,
            assessed_at: Timestamp::now(),
        };
        self.penalties.append_assessment(assessment.clone())?;
        tracing::info!(vessel = %vessel_id, season = season_year,
            violations = assessment.violation_count, amount = assessment.amount,
            "penalty assessed");
        Ok(assessment)
    }

    /// All penalty assessments on record for the vessel.
    pub fn assessments(&self, vessel_id: &VesselId) -> Result<Vec<PenaltyAssessment>, EngineError> {
        Ok(self.penalties.assessments_for(vessel_id)?)
    }
}
