//! # Penalty Schedule and Assessments
//!
//! The TEM IPA penalty schedule is a step function over the cumulative
//! violation count: 1 violation → $750, 2 → $1,500, 3 → $2,000, 4 or more
//! → $2,500. The cap does not keep escalating past the fourth violation.
//!
//! A `PenaltyAssessment` is the immutable record written when a penalty is
//! actually assessed. Deriving a penalty from current calculation state is
//! a pure read; assessing one is an append-only historical fact that later
//! corrections never rewrite.

use serde::{Deserialize, Serialize};

use crate::identity::{AssessmentId, VesselId};
use crate::temporal::Timestamp;

/// Escalating penalty schedule, in whole monetary units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltySchedule {
    /// Amount for the first violation.
    pub first: u32,
    /// Amount at two violations.
    pub second: u32,
    /// Amount at three violations.
    pub third: u32,
    /// Amount at four or more violations.
    pub cap: u32,
}

impl Default for PenaltySchedule {
    fn default() -> Self {
        Self {
            first: 750,
            second: 1_500,
            third: 2_000,
            cap: 2_500,
        }
    }
}

impl PenaltySchedule {
    /// Map a cumulative violation count to its penalty amount.
    pub fn amount_for(&self, violation_count: usize) -> u32 {
        match violation_count {
            0 => 0,
            1 => self.first,
            2 => self.second,
            3 => self.third,
            _ => self.cap,
        }
    }
}

/// An assessed penalty: an append-only historical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyAssessment {
    /// Unique assessment identifier.
    pub id: AssessmentId,
    /// The vessel assessed.
    pub vessel_id: VesselId,
    /// Season year the assessment covers.
    pub season_year: i32,
    /// Violation count at the moment of assessment.
    pub violation_count: u32,
    /// Assessed amount per the schedule.
    pub amount: u32,
    /// When the assessment was made.
    pub assessed_at: Timestamp,
}
