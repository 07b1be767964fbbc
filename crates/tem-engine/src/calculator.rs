//! # Rolling-Window Calculator
//!
//! Recomputes a vessel's full set of sliding four-trip windows from its
//! effective landing history. Recomputation is always total: every window
//! is rebuilt from scratch and upserted under its `(vessel, sequence)`
//! key, so running it twice with no intervening landings produces an
//! identical calculation set.
//!
//! Egregious trips (above the single-trip threshold) are excluded from
//! every averaging window but counted and reported separately — they are
//! never silently dropped from history.
//!
//! ## Failure policy
//!
//! - Vessel lookup or landing-list read failure aborts the recompute with
//!   no writes.
//! - An individual window upsert failure is logged with its key, recorded
//!   in the outcome's failed-window list, and skipped; the remaining
//!   windows still persist. Callers can retry just the failed keys.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use tem_core::{
    ComplianceLimits, ComplianceStatus, Landing, TripWindowCalculation, VesselId, WindowKey,
    TRIP_WINDOW,
};

use crate::error::EngineError;
use crate::locks::VesselLocks;
use crate::store::{CalculationStore, LandingStore, VesselStore};

/// Result of a completed recompute that produced windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeSummary {
    /// The most recent window (highest sequence).
    pub latest_window: TripWindowCalculation,
    /// Number of windows produced by this recompute.
    pub total_windows: usize,
    /// Number of non-compliant windows across the full recompute.
    pub violation_count: usize,
    /// Number of egregious trips in the vessel's effective history.
    pub egregious_trips: usize,
    /// Classification of the most recent window.
    pub compliance_status: ComplianceStatus,
    /// Window keys whose upsert failed and was skipped.
    pub failed_windows: Vec<WindowKey>,
}

/// Outcome of a recompute invocation.
///
/// `NotApplicable` and `InsufficientData` are terminal non-error states:
/// nothing is wrong, the rule simply does not bind yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecomputeOutcome {
    /// The vessel is under the hull-length cutoff and exempt.
    NotApplicable {
        /// The exempt vessel's hull length, for the caller's message.
        hull_length_ft: f64,
    },
    /// Fewer than four regular trips exist; no windows can form yet.
    InsufficientData {
        /// Regular trips currently on record.
        regular_trips: usize,
        /// Egregious trips currently on record.
        egregious_trips: usize,
    },
    /// Windows were computed and persisted.
    Completed(RecomputeSummary),
}

/// The rolling-window calculator service.
///
/// Cheap to clone; clones share the same stores and lock registry.
#[derive(Clone)]
pub struct Calculator {
    vessels: Arc<dyn VesselStore>,
    landings: Arc<dyn LandingStore>,
    calculations: Arc<dyn CalculationStore>,
    limits: ComplianceLimits,
    locks: Arc<VesselLocks>,
}

impl Calculator {
    /// Construct a calculator over the given stores and rule parameters.
    pub fn new(
        vessels: Arc<dyn VesselStore>,
        landings: Arc<dyn LandingStore>,
        calculations: Arc<dyn CalculationStore>,
        limits: ComplianceLimits,
        locks: Arc<VesselLocks>,
    ) -> Self {
        Self {
            vessels,
            landings,
            calculations,
            limits,
            locks,
        }
    }

    /// Recompute every four-trip window for `vessel_id`, dated today.
    pub fn recompute(&self, vessel_id: &VesselId) -> Result<RecomputeOutcome, EngineError> {
        self.recompute_as_of(vessel_id, Utc::now().date_naive())
    }

    /// Recompute with an explicit calculation date.
    ///
    /// The whole read-compute-write section runs under the vessel's lock;
    /// overlapping recomputes for the same vessel serialize here.
    pub fn recompute_as_of(
        &self,
        vessel_id: &VesselId,
        calculation_date: NaiveDate,
    ) -> Result<RecomputeOutcome, EngineError> {
        let lock = self.locks.lock_for(vessel_id);
        let _guard = lock.lock();

        let vessel = self
            .vessels
            .get_vessel(vessel_id)?
            .ok_or_else(|| EngineError::VesselNotFound(vessel_id.clone()))?;

        if !self.limits.applies_to(&vessel) {
            tracing::debug!(vessel = %vessel.id, hull_length_ft = vessel.hull_length_ft,
                "vessel under hull-length cutoff, four-trip averaging not applicable");
            return Ok(RecomputeOutcome::NotApplicable {
                hull_length_ft: vessel.hull_length_ft,
            });
        }

        // Full effective history, ascending by landing date. A read
        // failure here aborts before anything is written.
        let history = self.landings.effective_landings(vessel_id)?;

        let (regular, egregious): (Vec<&Landing>, Vec<&Landing>) = history
            .iter()
            .partition(|t| !self.limits.is_egregious_trip(t.pounds));

        if regular.len() < TRIP_WINDOW {
            tracing::debug!(vessel = %vessel.id, regular = regular.len(),
                egregious = egregious.len(), "fewer than four regular trips, no windows formed");
            return Ok(RecomputeOutcome::InsufficientData {
                regular_trips: regular.len(),
                egregious_trips: egregious.len(),
            });
        }

        let mut windows = Vec::with_capacity(regular.len() - TRIP_WINDOW + 1);
        let mut failed_windows = Vec::new();

        for (sequence, slice) in regular.windows(TRIP_WINDOW).enumerate() {
            let trips: Vec<Landing> = slice.iter().map(|t| (*t).clone()).collect();
            let calc = TripWindowCalculation::from_window(
                sequence as u32,
                calculation_date,
                &trips,
                &self.limits,
            );
            if let Err(err) = self.calculations.upsert_calculation(calc.clone()) {
                tracing::warn!(window = %calc.key(), error = %err,
                    "window upsert failed, skipping; retry this key without a full recompute");
                failed_windows.push(calc.key());
            }
            windows.push(calc);
        }

        // A correction can shrink the regular sequence; windows beyond the
        // fresh count are stale and would inflate violation counts.
        if let Err(err) = self.calculations.prune_from(vessel_id, windows.len() as u32) {
            tracing::warn!(vessel = %vessel.id, error = %err,
                "failed to prune stale windows after recompute");
        }

        let violation_count = windows.iter().filter(|w| !w.is_compliant).count();
        // `windows` is non-empty here: regular.len() >= TRIP_WINDOW.
        let latest_window = windows[windows.len() - 1].clone();
        let compliance_status = latest_window.status();

        tracing::info!(vessel = %vessel.id, windows = windows.len(),
            violations = violation_count, egregious = egregious.len(),
            status = %compliance_status, "recompute complete");

        Ok(RecomputeOutcome::Completed(RecomputeSummary {
            latest_window,
            total_windows: windows.len(),
            violation_count,
            egregious_trips: egregious.len(),
            compliance_status,
            failed_windows,
        }))
    }
}

