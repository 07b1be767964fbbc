//! # Landing Records
//!
//! One `Landing` is one recorded trip's delivery: a vessel, a date, and a
//! weight in pounds. The history is append-only — accepted landings are
//! never edited or deleted. A correction is a *new* landing that names the
//! entry it supersedes; stores exclude superseded entries from the
//! effective history but keep them forever.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::identity::{LandingId, VesselId};
use crate::temporal::Timestamp;

/// Species code recorded when the submission does not name one.
pub const DEFAULT_SPECIES_CODE: &str = "POLL";

/// One recorded delivery of catch by a vessel on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    /// Unique landing identifier.
    pub id: LandingId,
    /// The vessel that made the delivery.
    pub vessel_id: VesselId,
    /// Date the catch was landed at the dock.
    pub landing_date: NaiveDate,
    /// Landed weight in pounds.
    pub pounds: f64,
    /// Season year the landing counts against.
    pub season_year: i32,
    /// Species code (e.g., `POLL`).
    pub species_code: String,
    /// Port of landing, when recorded.
    pub landing_port: Option<String>,
    /// Fish-ticket / delivery identifier, when recorded.
    pub delivery_id: Option<String>,
    /// The landing this entry corrects, if it is a correction.
    pub supersedes: Option<LandingId>,
    /// When the system accepted this entry.
    pub recorded_at: Timestamp,
}

/// Input for a new landing, as received from the API or CLI.
///
/// Weight bounds are checked at ingest against `ComplianceLimits`, not
/// here — this type only captures the shape of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingSubmission {
    pub vessel_id: VesselId,
    pub landing_date: NaiveDate,
    pub pounds: f64,
    /// Defaults to the landing date's calendar year.
    pub season_year: Option<i32>,
    /// Defaults to [`DEFAULT_SPECIES_CODE`].
    pub species_code: Option<String>,
    pub landing_port: Option<String>,
    pub delivery_id: Option<String>,
}

/// An approved correction to an accepted landing.
///
/// Fields left `None` keep the original value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingCorrection {
    pub landing_date: Option<NaiveDate>,
    pub pounds: Option<f64>,
    /// Why the correction was made (audit trail).
    pub reason: String,
}

impl Landing {
    /// Materialize a submission into a landing record, applying defaults.
    pub fn from_submission(submission: LandingSubmission) -> Self {
        let season_year = submission
            .season_year
            .unwrap_or_else(|| submission.landing_date.year());
        Self {
            id: LandingId::new(),
            vessel_id: submission.vessel_id,
            landing_date: submission.landing_date,
            pounds: submission.pounds,
            season_year,
            species_code: submission
                .species_code
                .unwrap_or_else(|| DEFAULT_SPECIES_CODE.to_string()),
            landing_port: submission.landing_port,
            delivery_id: submission.delivery_id,
            supersedes: None,
            recorded_at: Timestamp::now(),
        }
    }

    /// Build the superseding entry for this landing under `correction`.
    ///
    /// The new entry gets a fresh identifier, carries forward every field
    /// the correction does not change, and records this landing as the
    /// one it supersedes.
    pub fn corrected(&self, correction: &LandingCorrection) -> Self {
        Self {
            id: LandingId::new(),
            vessel_id: self.vessel_id.clone(),
            landing_date: correction.landing_date.unwrap_or(self.landing_date),
            pounds: correction.pounds.unwrap_or(self.pounds),
            season_year: self.season_year,
            species_code: self.species_code.clone(),
            landing_port: self.landing_port.clone(),
            delivery_id: self.delivery_id.clone(),
            supersedes: Some(self.id.clone()),
            recorded_at: Timestamp::now(),
        }
    }
}
