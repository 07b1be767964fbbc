//! # Trip-Window Calculations
//!
//! A `TripWindowCalculation` is one sliding four-trip window for one
//! vessel: four chronologically consecutive regular trips, their total and
//! average pounds, and the compliance classification of that average.
//!
//! Windows are keyed by `(vessel, sequence)`, where `sequence` is the
//! window's position in the vessel's regular-trip sequence. Recomputing a
//! vessel upserts by that key, so a full recompute is idempotent and two
//! distinct windows can never collide — even when the vessel landed twice
//! on the same day and two windows share boundary dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{LandingId, VesselId};
use crate::landing::Landing;
use crate::limits::ComplianceLimits;

/// Number of consecutive regular trips per averaging window.
pub const TRIP_WINDOW: usize = 4;

/// Round a weight to 2 decimal places — the stored precision for averages.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compliance classification of a vessel's most recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// The window average is at or below the regulatory limit.
    Compliant,
    /// The window average exceeds the regulatory limit.
    Violation,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Compliant => "COMPLIANT",
            Self::Violation => "VIOLATION",
        };
        f.write_str(s)
    }
}

/// Upsert key for a stored window: vessel plus window sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowKey {
    pub vessel_id: VesselId,
    pub sequence: u32,
}

impl std::fmt::Display for WindowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/window:{}", self.vessel_id, self.sequence)
    }
}

/// One persisted sliding four-trip window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripWindowCalculation {
    /// The vessel this window belongs to.
    pub vessel_id: VesselId,
    /// Position of this window in the regular-trip sequence (0-based).
    pub sequence: u32,
    /// The date the computation ran.
    pub calculation_date: NaiveDate,
    /// Landing date of the window's first trip.
    pub window_start: NaiveDate,
    /// Landing date of the window's last trip.
    pub window_end: NaiveDate,
    /// The four landings that compose the window, in date order.
    pub landing_ids: Vec<LandingId>,
    /// Always [`TRIP_WINDOW`]; stored for downstream reporting.
    pub trip_count: u32,
    /// Sum of the four landed weights, pounds.
    pub total_pounds: f64,
    /// `total_pounds / 4`, rounded to 2 decimals. The compliance flags
    /// are computed from this rounded value, so a stored record can never
    /// disagree with its own classification.
    pub average_pounds: f64,
    /// `average_pounds` at or below the window average limit.
    pub is_compliant: bool,
    /// `average_pounds` above the egregious threshold.
    pub is_egregious: bool,
    /// Season year, taken from the window's first trip.
    pub season_year: i32,
}

impl TripWindowCalculation {
    /// Compute the window record for four consecutive regular trips.
    ///
    /// `trips` must hold exactly [`TRIP_WINDOW`] landings in ascending
    /// date order; the calculator guarantees this.
    pub fn from_window(
        sequence: u32,
        calculation_date: NaiveDate,
        trips: &[Landing],
        limits: &ComplianceLimits,
    ) -> Self {
        debug_assert_eq!(trips.len(), TRIP_WINDOW);

        let first = &trips[0];
        let last = &trips[trips.len() - 1];
        let total_pounds: f64 = trips.iter().map(|t| t.pounds).sum();
        let average_pounds = round_to_cents(total_pounds / TRIP_WINDOW as f64);

        Self {
            vessel_id: first.vessel_id.clone(),
            sequence,
            calculation_date,
            window_start: first.landing_date,
            window_end: last.landing_date,
            landing_ids: trips.iter().map(|t| t.id.clone()).collect(),
            trip_count: TRIP_WINDOW as u32,
            total_pounds,
            average_pounds,
            is_compliant: average_pounds <= limits.window_average_limit_pounds,
            is_egregious: average_pounds > limits.egregious_trip_pounds,
            season_year: first.season_year,
        }
    }

    /// The upsert key for this window.
    pub fn key(&self) -> WindowKey {
        WindowKey {
            vessel_id: self.vessel_id.clone(),
            sequence: self.sequence,
        }
    }

    /// Status of this window alone.
    pub fn status(&self) -> ComplianceStatus {
        if self.is_compliant {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::Violation
        }
    }
}
