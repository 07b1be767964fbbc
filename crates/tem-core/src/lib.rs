//! # tem-core — Foundational Types for the TEM Stack
//!
//! This crate is the bedrock of the TEM (Trawl Electronic Monitoring)
//! compliance stack. It defines the domain records and type-system
//! primitives every other crate builds on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `VesselId`, `LandingId`,
//!    `TransferId` — all distinct types over UUIDs. No bare strings or
//!    naked UUIDs for identifiers, so a landing id can never be handed to
//!    an API expecting a vessel id.
//!
//! 2. **Regulatory constants live in one place.** `ComplianceLimits`
//!    carries the TEM IPA thresholds (60 ft hull minimum, 335,000 lb
//!    egregious trip, 300,000 lb window average, 500,000 lb ingest cap).
//!    Nothing else in the workspace hard-codes a threshold.
//!
//! 3. **Append-only landings.** A `Landing` is never edited in place; a
//!    correction is a new landing that records which entry it supersedes.
//!
//! 4. **UTC-only audit stamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision for every `recorded_at`/`assessed_at`
//!    field. Calendar facts (landing dates, calculation dates) are plain
//!    `chrono::NaiveDate` values.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tem-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod calculation;
pub mod error;
pub mod identity;
pub mod landing;
pub mod limits;
pub mod penalty;
pub mod temporal;
pub mod vessel;

// Re-export primary types for ergonomic imports.
pub use calculation::{
    round_to_cents, ComplianceStatus, TripWindowCalculation, WindowKey, TRIP_WINDOW,
};
pub use error::ValidationError;
pub use identity::{AssessmentId, LandingId, TransferId, VesselId};
pub use landing::{Landing, LandingCorrection, LandingSubmission, DEFAULT_SPECIES_CODE};
pub use limits::ComplianceLimits;
pub use penalty::{PenaltyAssessment, PenaltySchedule};
pub use temporal::Timestamp;
pub use vessel::Vessel;
