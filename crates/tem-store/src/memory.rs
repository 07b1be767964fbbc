//! In-memory storage backend using DashMap.
//!
//! Each record family gets its own map. Landings are append-only by
//! construction: `insert_landing` refuses to replace an existing id.
//! The effective-history view excludes entries that some later entry
//! supersedes.

use std::sync::Arc;

use dashmap::DashMap;

use tem_core::{
    Landing, LandingId, PenaltyAssessment, TripWindowCalculation, Vessel, VesselId, WindowKey,
};
use tem_engine::store::{
    CalculationStore, LandingStore, PenaltyStore, StoreError, VesselStore,
};

/// Inner storage holding all maps.
#[derive(Default)]
struct Inner {
    vessels: DashMap<VesselId, Vessel>,
    landings: DashMap<LandingId, Landing>,
    calculations: DashMap<WindowKey, TripWindowCalculation>,
    assessments: DashMap<VesselId, Vec<PenaltyAssessment>>,
}

/// Shared in-memory store implementing all four engine ports.
///
/// Cheaply cloneable via `Arc` — all clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every landing on record, for snapshotting.
    pub(crate) fn dump_landings(&self) -> Vec<Landing> {
        self.inner.landings.iter().map(|e| e.value().clone()).collect()
    }

    /// Every vessel on record, for snapshotting.
    pub(crate) fn dump_vessels(&self) -> Vec<Vessel> {
        self.inner.vessels.iter().map(|e| e.value().clone()).collect()
    }

    /// Every calculation on record, for snapshotting.
    pub(crate) fn dump_calculations(&self) -> Vec<TripWindowCalculation> {
        self.inner
            .calculations
            .iter()
            .map(|e| e.value().clone())
            .collect()
    }

    /// Every assessment on record, for snapshotting.
    pub(crate) fn dump_assessments(&self) -> Vec<PenaltyAssessment> {
        self.inner
            .assessments
            .iter()
            .flat_map(|e| e.value().clone())
            .collect()
    }

    pub(crate) fn load_landing(&self, landing: Landing) {
        self.inner.landings.insert(landing.id.clone(), landing);
    }

    pub(crate) fn load_vessel(&self, vessel: Vessel) {
        self.inner.vessels.insert(vessel.id.clone(), vessel);
    }

    pub(crate) fn load_calculation(&self, calc: TripWindowCalculation) {
        self.inner.calculations.insert(calc.key(), calc);
    }

    pub(crate) fn load_assessment(&self, assessment: PenaltyAssessment) {
        self.inner
            .assessments
            .entry(assessment.vessel_id.clone())
            .or_default()
            .push(assessment);
    }
}

impl VesselStore for MemoryStore {
    fn get_vessel(&self, id: &VesselId) -> Result<Option<Vessel>, StoreError> {
        Ok(self.inner.vessels.get(id).map(|e| e.value().clone()))
    }

    fn put_vessel(&self, vessel: Vessel) -> Result<(), StoreError> {
        self.inner.vessels.insert(vessel.id.clone(), vessel);
        Ok(())
    }

    fn list_vessels(&self) -> Result<Vec<Vessel>, StoreError> {
        let mut vessels = self.dump_vessels();
        vessels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vessels)
    }
}

impl LandingStore for MemoryStore {
    fn insert_landing(&self, landing: Landing) -> Result<(), StoreError> {
        if self.inner.landings.contains_key(&landing.id) {
            return Err(StoreError::new(
                "insert_landing",
                format!("landing {} already exists; landings are append-only", landing.id),
            ));
        }
        self.inner.landings.insert(landing.id.clone(), landing);
        Ok(())
    }

    fn get_landing(&self, id: &LandingId) -> Result<Option<Landing>, StoreError> {
        Ok(self.inner.landings.get(id).map(|e| e.value().clone()))
    }

    fn effective_landings(&self, vessel_id: &VesselId) -> Result<Vec<Landing>, StoreError> {
        let for_vessel: Vec<Landing> = self
            .inner
            .landings
            .iter()
            .filter(|e| &e.value().vessel_id == vessel_id)
            .map(|e| e.value().clone())
            .collect();

        // An entry is superseded when any other entry names it.
        let superseded: std::collections::HashSet<LandingId> = for_vessel
            .iter()
            .filter_map(|l| l.supersedes.clone())
            .collect();

        let mut effective: Vec<Landing> = for_vessel
            .into_iter()
            .filter(|l| !superseded.contains(&l.id))
            .collect();
        effective.sort_by(|a, b| {
            a.landing_date
                .cmp(&b.landing_date)
                .then(a.recorded_at.cmp(&b.recorded_at))
        });
        Ok(effective)
    }

    fn all_landings(&self, vessel_id: &VesselId) -> Result<Vec<Landing>, StoreError> {
        let mut landings: Vec<Landing> = self
            .inner
            .landings
            .iter()
            .filter(|e| &e.value().vessel_id == vessel_id)
            .map(|e| e.value().clone())
            .collect();
        landings.sort_by(|a, b| {
            b.landing_date
                .cmp(&a.landing_date)
                .then(b.recorded_at.cmp(&a.recorded_at))
        });
        Ok(landings)
    }
}

impl CalculationStore for MemoryStore {
    fn upsert_calculation(&self, calc: TripWindowCalculation) -> Result<(), StoreError> {
        self.inner.calculations.insert(calc.key(), calc);
        Ok(())
    }

    fn calculations_for(
        &self,
        vessel_id: &VesselId,
    ) -> Result<Vec<TripWindowCalculation>, StoreError> {
        let mut calcs: Vec<TripWindowCalculation> = self
            .inner
            .calculations
            .iter()
            .filter(|e| &e.value().vessel_id == vessel_id)
            .map(|e| e.value().clone())
            .collect();
        calcs.sort_by_key(|c| c.sequence);
        Ok(calcs)
    }

    fn latest_calculation(
        &self,
        vessel_id: &VesselId,
    ) -> Result<Option<TripWindowCalculation>, StoreError> {
        Ok(self.calculations_for(vessel_id)?.into_iter().last())
    }

    fn prune_from(
        &self,
        vessel_id: &VesselId,
        first_stale_sequence: u32,
    ) -> Result<(), StoreError> {
        self.inner.calculations.retain(|key, _| {
            !(&key.vessel_id == vessel_id && key.sequence >= first_stale_sequence)
        });
        Ok(())
    }
}

impl PenaltyStore for MemoryStore {
    fn append_assessment(&self, assessment: PenaltyAssessment) -> Result<(), StoreError> {
        self.inner
            .assessments
            .entry(assessment.vessel_id.clone())
            .or_default()
            .push(assessment);
        Ok(())
    }

    fn assessments_for(
        &self,
        vessel_id: &VesselId,
    ) -> Result<Vec<PenaltyAssessment>, StoreError> {
        Ok(self
            .inner
            .assessments
            .get(vessel_id)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tem_core::{LandingCorrection, LandingSubmission};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn landing(vessel_id: &VesselId, day: u32, pounds: f64) -> Landing {
        Landing::from_submission(LandingSubmission {
            vessel_id: vessel_id.clone(),
            landing_date: date(2025, 3, day),
            pounds,
            season_year: Some(2025),
            species_code: None,
            landing_port: None,
            delivery_id: None,
        })
    }

    #[test]
    fn test_insert_landing_is_append_only() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        let entry = landing(&vessel_id, 1, 1000.0);

        store.insert_landing(entry.clone()).unwrap();
        let result = store.insert_landing(entry);
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_landings_sorted_ascending() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        store.insert_landing(landing(&vessel_id, 20, 1000.0)).unwrap();
        store.insert_landing(landing(&vessel_id, 5, 1000.0)).unwrap();
        store.insert_landing(landing(&vessel_id, 12, 1000.0)).unwrap();

        let effective = store.effective_landings(&vessel_id).unwrap();
        let days: Vec<u32> = effective
            .iter()
            .map(|l| chrono::Datelike::day(&l.landing_date))
            .collect();
        assert_eq!(days, vec![5, 12, 20]);
    }

    #[test]
    fn test_effective_excludes_superseded() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        let original = landing(&vessel_id, 5, 1000.0);
        store.insert_landing(original.clone()).unwrap();
        let corrected = original.corrected(&LandingCorrection {
            landing_date: None,
            pounds: Some(1200.0),
            reason: "amended".to_string(),
        });
        store.insert_landing(corrected.clone()).unwrap();

        let effective = store.effective_landings(&vessel_id).unwrap();
        assert_eq!(effective.len(), 1);
        assert_eq!(effective[0].id, corrected.id);

        let all = store.all_landings(&vessel_id).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_landings_scoped_per_vessel() {
        let store = MemoryStore::new();
        let a = VesselId::new();
        let b = VesselId::new();
        store.insert_landing(landing(&a, 1, 1000.0)).unwrap();
        store.insert_landing(landing(&b, 2, 2000.0)).unwrap();

        assert_eq!(store.effective_landings(&a).unwrap().len(), 1);
        assert_eq!(store.effective_landings(&b).unwrap().len(), 1);
    }

    #[test]
    fn test_prune_from_removes_tail() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        for sequence in 0..5u32 {
            let trips: Vec<Landing> =
                (0..4).map(|i| landing(&vessel_id, sequence + i + 1, 1000.0)).collect();
            let calc = TripWindowCalculation::from_window(
                sequence,
                date(2025, 4, 1),
                &trips,
                &tem_core::ComplianceLimits::default(),
            );
            store.upsert_calculation(calc).unwrap();
        }

        store.prune_from(&vessel_id, 2).unwrap();
        let remaining = store.calculations_for(&vessel_id).unwrap();
        let sequences: Vec<u32> = remaining.iter().map(|c| c.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
    }

    #[test]
    fn test_latest_calculation_highest_sequence() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        for sequence in 0..3u32 {
            let trips: Vec<Landing> =
                (0..4).map(|i| landing(&vessel_id, sequence + i + 1, 1000.0)).collect();
            let calc = TripWindowCalculation::from_window(
                sequence,
                date(2025, 4, 1),
                &trips,
                &tem_core::ComplianceLimits::default(),
            );
            store.upsert_calculation(calc).unwrap();
        }

        let latest = store.latest_calculation(&vessel_id).unwrap().unwrap();
        assert_eq!(latest.sequence, 2);
    }

    #[test]
    fn test_assessments_round_trip() {
        let store = MemoryStore::new();
        let vessel_id = VesselId::new();
        assert!(store.assessments_for(&vessel_id).unwrap().is_empty());

        let assessment = PenaltyAssessment {
            id: tem_core::AssessmentId::new(),
            vessel_id: vessel_id.clone(),
            season_year: 2025,
            violation_count: 1,
            amount: 750,
            assessed_at: tem_core::Timestamp::now(),
        };
        store.append_assessment(assessment.clone()).unwrap();
        assert_eq!(store.assessments_for(&vessel_id).unwrap(), vec![assessment]);
    }
}
