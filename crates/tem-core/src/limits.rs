//! # Regulatory Thresholds
//!
//! `ComplianceLimits` carries every numeric threshold from the TEM IPA in
//! one place: the hull-length cutoff for program applicability, the
//! egregious-trip weight, the four-trip window average limit, and the
//! per-landing ingest cap. Defaults are the published program values; the
//! struct is plain data so tests and future rule years can construct
//! variants.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::vessel::Vessel;

/// TEM IPA numeric thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceLimits {
    /// Vessels at or above this hull length (feet) are subject to
    /// four-trip averaging; shorter vessels are exempt.
    pub min_hull_length_ft: f64,
    /// A single landing above this weight (pounds) is an egregious trip:
    /// excluded from every averaging window, tracked separately.
    pub egregious_trip_pounds: f64,
    /// A window whose average exceeds this weight (pounds) is a violation.
    pub window_average_limit_pounds: f64,
    /// Hard ingest cap (pounds); landings above this are rejected outright.
    pub max_landing_pounds: f64,
}

impl Default for ComplianceLimits {
    fn default() -> Self {
        Self {
            min_hull_length_ft: 60.0,
            egregious_trip_pounds: 335_000.0,
            window_average_limit_pounds: 300_000.0,
            max_landing_pounds: 500_000.0,
        }
    }
}

impl ComplianceLimits {
    /// Whether the four-trip averaging rule applies to `vessel`.
    pub fn applies_to(&self, vessel: &Vessel) -> bool {
        vessel.hull_length_ft >= self.min_hull_length_ft
    }

    /// Whether a single landing of `pounds` is an egregious trip.
    pub fn is_egregious_trip(&self, pounds: f64) -> bool {
        pounds > self.egregious_trip_pounds
    }

    /// Validate a landed weight at ingest.
    ///
    /// Enforced here and only here — the calculator assumes its inputs
    /// already passed this gate.
    pub fn validate_pounds(&self, pounds: f64) -> Result<(), ValidationError> {
        if !pounds.is_finite() {
            return Err(ValidationError::new(
                "pounds",
                format!("must be a finite number, got {pounds}"),
            ));
        }
        if pounds <= 0.0 {
            return Err(ValidationError::new(
                "pounds",
                format!("must be positive, got {pounds}"),
            ));
        }
        if pounds > self.max_landing_pounds {
            return Err(ValidationError::new(
                "pounds",
                format!(
                    "exceeds maximum landing weight of {} lb, got {pounds}",
                    self.max_landing_pounds
                ),
            ));
        }
        Ok(())
    }
}
