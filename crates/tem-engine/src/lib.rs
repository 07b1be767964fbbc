//! # tem-engine — Rolling-Window Compliance Engine
//!
//! The core of the TEM Stack. Three services layered on one data flow:
//!
//! 1. **[`LandingIngest`]** — accepts a new or corrected landing for a
//!    vessel, validates bounds, persists it, and synchronously triggers a
//!    full recompute for that vessel.
//! 2. **[`Calculator`]** — recomputes every sliding four-trip window over
//!    a vessel's effective landing history, classifies each window, and
//!    upserts the results keyed by `(vessel, window sequence)`.
//! 3. **[`ComplianceDeriver`]** — read-side derivation of violation counts
//!    and penalty amounts from the stored calculation history, plus the
//!    append-only penalty assessment ledger.
//!
//! Control flow: Ingest → Calculator → (on demand) Deriver.
//!
//! ## Store Ports
//!
//! The engine is written against the traits in [`store`] — it never talks
//! to a concrete database. Backends are handed in as explicit `Arc` handles
//! when services are constructed; there is no ambient global client.
//!
//! ## Serialization
//!
//! Recomputation is serialized per vessel through [`locks::VesselLocks`]:
//! two overlapping recomputes for the same vessel would otherwise race
//! read-landings against write-windows and leave a torn calculation set.
//! Recomputes for different vessels proceed concurrently.
//!
//! ## Crate Policy
//!
//! - No business logic lives outside this crate; API/CLI layers delegate.
//! - No `unwrap()`/`expect()` outside tests.
//! - Store read failures abort an operation with no partial writes; an
//!   individual window upsert failure is logged, reported, and skipped.

pub mod calculator;
pub mod deriver;
pub mod error;
pub mod ingest;
pub mod locks;
pub mod store;

pub use calculator::{Calculator, RecomputeOutcome, RecomputeSummary};
pub use deriver::{ComplianceDeriver, ComplianceReport};
pub use error::EngineError;
pub use ingest::{IngestReceipt, LandingIngest};
pub use store::{CalculationStore, LandingStore, PenaltyStore, StoreError, VesselStore};

use std::sync::Arc;

use tem_core::{ComplianceLimits, PenaltySchedule, Vessel};

use crate::locks::VesselLocks;

/// The four store handles the engine runs against.
#[derive(Clone)]
pub struct EngineStores {
    pub vessels: Arc<dyn VesselStore>,
    pub landings: Arc<dyn LandingStore>,
    pub calculations: Arc<dyn CalculationStore>,
    pub penalties: Arc<dyn PenaltyStore>,
}

/// Bundle of the three engine services sharing one store set and one
/// per-vessel lock registry. Constructed once per process and passed to
/// the API/CLI layers.
pub struct ComplianceEngine {
    pub ingest: LandingIngest,
    pub calculator: Calculator,
    pub deriver: ComplianceDeriver,
    stores: EngineStores,
}

impl ComplianceEngine {
    /// Wire up the engine against a store set with the given rule
    /// parameters.
    pub fn new(stores: EngineStores, limits: ComplianceLimits, schedule: PenaltySchedule) -> Self {
        let locks = Arc::new(VesselLocks::new());
        let calculator = Calculator::new(
            Arc::clone(&stores.vessels),
            Arc::clone(&stores.landings),
            Arc::clone(&stores.calculations),
            limits,
            Arc::clone(&locks),
        );
        let ingest = LandingIngest::new(
            Arc::clone(&stores.vessels),
            Arc::clone(&stores.landings),
            calculator.clone(),
            limits,
        );
        let deriver = ComplianceDeriver::new(
            Arc::clone(&stores.calculations),
            Arc::clone(&stores.penalties),
            schedule,
        );
        Self {
            ingest,
            calculator,
            deriver,
            stores,
        }
    }

    /// Wire up the engine with the published TEM IPA rule parameters.
    pub fn with_defaults(stores: EngineStores) -> Self {
        Self::new(stores, ComplianceLimits::default(), PenaltySchedule::default())
    }

    /// Register a vessel. Registration is a maintenance surface rather
    /// than part of the compliance flow, so it lives on the bundle.
    pub fn register_vessel(
        &self,
        name: &str,
        hull_length_ft: f64,
        registration_number: Option<String>,
    ) -> Result<Vessel, EngineError> {
        let mut vessel = Vessel::new(name, hull_length_ft)?;
        if let Some(reg) = registration_number {
            vessel = vessel.with_registration(reg);
        }
        self.stores.vessels.put_vessel(vessel.clone())?;
        Ok(vessel)
    }

    /// Direct read access to the underlying stores, for listing surfaces.
    pub fn stores(&self) -> &EngineStores {
        &self.stores
    }
}
