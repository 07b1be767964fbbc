//! # Temporal Types — UTC-Only Audit Stamps
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision, used for every audit field in the stack (`recorded_at`,
//! `assessed_at`, `requested_at`, ...).
//!
//! Landings and calculations carry calendar dates (`chrono::NaiveDate`);
//! those say *when a thing happened at the dock*, while `Timestamp` says
//! *when the system learned about it*. Keeping audit stamps UTC-only with
//! no sub-second component means two stores never disagree about the same
//! instant because of timezone or precision drift.
//!
//! Non-UTC inputs are **rejected at parse time** — there is no silent
//! conversion on the strict path.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only timestamps with the `Z` suffix are
    /// accepted — even `+00:00`, which is semantically equivalent, is
    /// rejected so that stored stamps have exactly one spelling.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid RFC 3339 or uses a
    /// non-Z timezone offset.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::new(
                "timestamp",
                format!("must use Z suffix (UTC only), got: {s:?}"),
            ));
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            ValidationError::new("timestamp", format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;

        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
