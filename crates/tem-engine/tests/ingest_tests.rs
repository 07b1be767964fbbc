use std::sync::Arc;

use chrono::NaiveDate;

use tem_core::{ComplianceLimits, LandingCorrection, LandingId, LandingSubmission, Vessel};
use tem_engine::locks::VesselLocks;
use tem_engine::store::{LandingStore, VesselStore};
use tem_engine::{Calculator, EngineError, LandingIngest, RecomputeOutcome};
use tem_store::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ingest(store: &MemoryStore) -> LandingIngest {
    let calculator = Calculator::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        ComplianceLimits::default(),
        Arc::new(VesselLocks::new()),
    );
    LandingIngest::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        calculator,
        ComplianceLimits::default(),
    )
}

fn add_vessel(store: &MemoryStore, hull_length_ft: f64) -> Vessel {
    let vessel = Vessel::new("F/V Test", hull_length_ft).unwrap();
    store.put_vessel(vessel.clone()).unwrap();
    vessel
}

fn submission(vessel: &Vessel, day: u32, pounds: f64) -> LandingSubmission {
    LandingSubmission {
        vessel_id: vessel.id.clone(),
        landing_date: date(2025, 3, day),
        pounds,
        season_year: None,
        species_code: None,
        landing_port: None,
        delivery_id: None,
    }
}

#[test]
fn test_submit_persists_and_recomputes() {
    let store = MemoryStore::new();
    let vessel = add_vessel(&store, 85.0);
    let service = ingest(&store);

    let receipt = service.submit(submission(&vessel, 1, 280_000.0)).unwrap();
    assert_eq!(receipt.landing.vessel_id, vessel.id);
    assert_eq!(receipt.landing.pounds, 280_000.0);
    assert_eq!(
        receipt.outcome,
        RecomputeOutcome::InsufficientData {
            regular_trips: 1,
            egregious_trips: 0
        }
    );

    assert_eq!(store.effective_landings(&vessel.id).unwrap().len(), 1);
}

#[test]
fn test_submit_rejects_out_of_bounds_weight() {
    let store = MemoryStore::new();
    let vessel = add_vessel(&store, 85.0);
    let service = ingest(&store);

    for bad in [0.0, -5.0, 500_000.5, f64::NAN] {
        let result = service.submit(submission(&vessel, 1, bad));
        assert!(matches!(result, Err(EngineError::Validation(_))), "{bad} accepted");
    }
    // Nothing was persisted.
    assert!(store.effective_landings(&vessel.id).unwrap().is_empty());
}

#[test]
fn test_submit_unknown_vessel() {
    let store = MemoryStore::new();
    let service = ingest(&store);
    let ghost = Vessel::new("F/V Ghost", 85.0).unwrap();

    let result = service.submit(submission(&ghost, 1, 280_000.0));
    assert!(matches!(result, Err(EngineError::VesselNotFound(_))));
}

#[test]
fn test_correct_supersedes_and_recomputes() {
    let store = MemoryStore::new();
    let vessel = add_vessel(&store, 85.0);
    let service = ingest(&store);

    let mut last = None;
    for day in 1..=4 {
        last = Some(service.submit(submission(&vessel, day, 300_000.0)).unwrap());
    }
    let target = last.unwrap().landing;

    let receipt = service
        .correct(
            &target.id,
            LandingCorrection {
                landing_date: None,
                pounds: Some(310_000.0),
                reason: "fish ticket amended".to_string(),
            },
        )
        .unwrap();

    // History keeps both entries; the effective set has four trips.
    assert_eq!(store.all_landings(&vessel.id).unwrap().len(), 5);
    let effective = store.effective_landings(&vessel.id).unwrap();
    assert_eq!(effective.len(), 4);
    assert!(effective.iter().any(|l| l.id == receipt.landing.id));
    assert!(!effective.iter().any(|l| l.id == target.id));

    // The recompute saw the corrected weight.
    let summary = match receipt.outcome {
        RecomputeOutcome::Completed(s) => s,
        other => panic!("expected Completed, got {other:?}"),
    };
    assert_eq!(summary.latest_window.average_pounds, 302_500.0);
    assert!(!summary.latest_window.is_compliant);
}

#[test]
fn test_correct_rejects_empty_reason() {
    let store = MemoryStore::new();
    let vessel = add_vessel(&store, 85.0);
    let service = ingest(&store);
    let receipt = service.submit(submission(&vessel, 1, 300_000.0)).unwrap();

    let result = service.correct(
        &receipt.landing.id,
        LandingCorrection {
            landing_date: None,
            pounds: Some(290_000.0),
            reason: "   ".to_string(),
        },
    );
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_correct_rejects_superseded_entry() {
    let store = MemoryStore::new();
    let vessel = add_vessel(&store, 85.0);
    let service = ingest(&store);
    let receipt = service.submit(submission(&vessel, 1, 300_000.0)).unwrap();
    let original = receipt.landing;

    service
        .correct(
            &original.id,
            LandingCorrection {
                landing_date: None,
                pounds: Some(290_000.0),
                reason: "first correction".to_string(),
            },
        )
        .unwrap();

    // Correcting the now-superseded original must be refused.
    let result = service.correct(
        &original.id,
        LandingCorrection {
            landing_date: None,
            pounds: Some(280_000.0),
            reason: "second correction against stale entry".to_string(),
        },
    );
    assert!(matches!(result, Err(EngineError::LandingSuperseded(_))));
}

#[test]
fn test_correct_unknown_landing() {
    let store = MemoryStore::new();
    add_vessel(&store, 85.0);
    let service = ingest(&store);

    let result = service.correct(
        &LandingId::new(),
        LandingCorrection {
            landing_date: None,
            pounds: Some(280_000.0),
            reason: "typo".to_string(),
        },
    );
    assert!(matches!(result, Err(EngineError::LandingNotFound(_))));
}
