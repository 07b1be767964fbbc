//! JSON snapshot persistence for the in-memory store.
//!
//! The CLI runs as short-lived invocations, so the whole store is loaded
//! from a JSON file at startup and written back after mutating commands.
//! The snapshot is a plain dump of the four record families; restoring it
//! rebuilds the maps.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tem_core::{Landing, PenaltyAssessment, TripWindowCalculation, Vessel};

use crate::memory::MemoryStore;

/// Snapshot I/O failures.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file is not valid JSON for the expected shape.
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable dump of the full store state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub vessels: Vec<Vessel>,
    #[serde(default)]
    pub landings: Vec<Landing>,
    #[serde(default)]
    pub calculations: Vec<TripWindowCalculation>,
    #[serde(default)]
    pub assessments: Vec<PenaltyAssessment>,
}

impl StoreSnapshot {
    /// Capture the current state of a store.
    pub fn capture(store: &MemoryStore) -> Self {
        Self {
            vessels: store.dump_vessels(),
            landings: store.dump_landings(),
            calculations: store.dump_calculations(),
            assessments: store.dump_assessments(),
        }
    }

    /// Rebuild a store from this snapshot.
    pub fn restore(self) -> MemoryStore {
        let store = MemoryStore::new();
        for vessel in self.vessels {
            store.load_vessel(vessel);
        }
        for landing in self.landings {
            store.load_landing(landing);
        }
        for calc in self.calculations {
            store.load_calculation(calc);
        }
        for assessment in self.assessments {
            store.load_assessment(assessment);
        }
        store
    }

    /// Load a snapshot from `path`; a missing file yields an empty store.
    pub fn load_or_default(path: &Path) -> Result<MemoryStore, SnapshotError> {
        if !path.exists() {
            return Ok(MemoryStore::new());
        }
        let bytes = std::fs::read(path)?;
        let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
        Ok(snapshot.restore())
    }

    /// Write the store's current state to `path`.
    pub fn save(store: &MemoryStore, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = Self::capture(store);
        let json = serde_json::to_vec_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tem_core::{LandingSubmission, VesselId};
    use tem_engine::store::{LandingStore, VesselStore};

    fn sample_store() -> (MemoryStore, VesselId) {
        let store = MemoryStore::new();
        let vessel = Vessel::new("F/V Snapshot", 85.0).unwrap();
        let vessel_id = vessel.id.clone();
        store.put_vessel(vessel).unwrap();
        store
            .insert_landing(Landing::from_submission(LandingSubmission {
                vessel_id: vessel_id.clone(),
                landing_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                pounds: 280_000.0,
                season_year: None,
                species_code: None,
                landing_port: Some("Kodiak".to_string()),
                delivery_id: None,
            }))
            .unwrap();
        (store, vessel_id)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (store, vessel_id) = sample_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tem-state.json");

        StoreSnapshot::save(&store, &path).unwrap();
        let restored = StoreSnapshot::load_or_default(&path).unwrap();

        assert_eq!(restored.dump_vessels().len(), 1);
        let landings = restored.effective_landings(&vessel_id).unwrap();
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].pounds, 280_000.0);
        assert_eq!(landings[0].landing_port.as_deref(), Some("Kodiak"));
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let store = StoreSnapshot::load_or_default(&path).unwrap();
        assert!(store.dump_vessels().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(StoreSnapshot::load_or_default(&path).is_err());
    }
}
