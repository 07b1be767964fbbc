//! # Progressive Usage Alerts
//!
//! Quota usage raises alerts as it crosses 80%, 90%, 95%, and 100% of the
//! current allocation. Each threshold fires exactly once per crossing:
//! the ledger compares the usage percentage before and after a catch and
//! emits the thresholds that lie in between.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use tem_core::VesselId;

/// The progressive alert thresholds, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertThreshold {
    /// 80% of current allocation used.
    Quota80,
    /// 90% of current allocation used.
    Quota90,
    /// 95% of current allocation used.
    Quota95,
    /// Allocation fully used.
    QuotaExhausted,
}

impl AlertThreshold {
    /// All thresholds, ascending.
    pub const ALL: [AlertThreshold; 4] = [
        AlertThreshold::Quota80,
        AlertThreshold::Quota90,
        AlertThreshold::Quota95,
        AlertThreshold::QuotaExhausted,
    ];

    /// The usage percentage at which this threshold fires.
    pub fn percent(&self) -> f64 {
        match self {
            Self::Quota80 => 80.0,
            Self::Quota90 => 90.0,
            Self::Quota95 => 95.0,
            Self::QuotaExhausted => 100.0,
        }
    }
}

impl std::fmt::Display for AlertThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Quota80 => "QUOTA_80",
            Self::Quota90 => "QUOTA_90",
            Self::Quota95 => "QUOTA_95",
            Self::QuotaExhausted => "QUOTA_EXHAUSTED",
        };
        f.write_str(s)
    }
}

/// An alert raised by a threshold crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaAlert {
    pub alert_type: AlertThreshold,
    pub vessel_id: VesselId,
    pub species_code: String,
    pub season_year: i32,
    /// The usage percentage when the alert fired.
    pub threshold_reached: f64,
    pub message: String,
    pub created_date: NaiveDate,
}

/// The thresholds crossed when usage moves from `before` to `after`
/// percent, ascending.
pub fn crossed(before: f64, after: f64) -> Vec<AlertThreshold> {
    AlertThreshold::ALL
        .into_iter()
        .filter(|t| before < t.percent() && after >= t.percent())
        .collect()
}
