use std::sync::Arc;

use chrono::NaiveDate;

use tem_core::{
    ComplianceLimits, ComplianceStatus, Landing, LandingSubmission, PenaltySchedule,
    TripWindowCalculation, Vessel,
};
use tem_engine::store::CalculationStore;
use tem_engine::{ComplianceDeriver, EngineError};
use tem_store::MemoryStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn deriver(store: &MemoryStore) -> ComplianceDeriver {
    ComplianceDeriver::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        PenaltySchedule::default(),
    )
}

/// Store a window with the given sequence and average directly.
fn put_window(store: &MemoryStore, vessel: &Vessel, sequence: u32, average: f64) {
    let trips: Vec<Landing> = (0..4)
        .map(|i| {
            Landing::from_submission(LandingSubmission {
                vessel_id: vessel.id.clone(),
                landing_date: date(2025, 3, sequence + 1 + i),
                pounds: average,
                season_year: Some(2025),
                species_code: None,
                landing_port: None,
                delivery_id: None,
            })
        })
        .collect();
    let calc = TripWindowCalculation::from_window(
        sequence,
        date(2025, 4, 1),
        &trips,
        &ComplianceLimits::default(),
    );
    store.upsert_calculation(calc).unwrap();
}

fn vessel() -> Vessel {
    Vessel::new("F/V Test", 85.0).unwrap()
}

#[test]
fn test_no_calculation_is_an_error() {
    let store = MemoryStore::new();
    let v = vessel();
    let result = deriver(&store).compliance_status(&v.id);
    assert!(matches!(result, Err(EngineError::NoCalculation(_))));
}

#[test]
fn test_compliant_vessel_zero_penalty() {
    let store = MemoryStore::new();
    let v = vessel();
    put_window(&store, &v, 0, 280_000.0);
    put_window(&store, &v, 1, 295_000.0);

    let report = deriver(&store).compliance_status(&v.id).unwrap();
    assert!(report.is_compliant);
    assert_eq!(report.status, ComplianceStatus::Compliant);
    assert_eq!(report.violation_count, 0);
    assert_eq!(report.penalty_amount, 0);
    assert_eq!(report.latest_average, 295_000.0);
}

#[test]
fn test_violation_counts_map_to_schedule() {
    let store = MemoryStore::new();
    let v = vessel();

    // Build up violations one window at a time and watch the penalty
    // climb the schedule, then cap.
    let expected = [(1usize, 750u32), (2, 1_500), (3, 2_000), (4, 2_500), (5, 2_500)];
    for (i, (count, amount)) in expected.iter().enumerate() {
        put_window(&store, &v, i as u32, 320_000.0);
        let report = deriver(&store).compliance_status(&v.id).unwrap();
        assert_eq!(report.violation_count, *count);
        assert_eq!(report.penalty_amount, *amount);
        assert!(!report.is_compliant);
    }
}

#[test]
fn test_report_reads_latest_window() {
    let store = MemoryStore::new();
    let v = vessel();
    put_window(&store, &v, 0, 320_000.0);
    put_window(&store, &v, 1, 280_000.0);

    // Latest window is compliant even though history holds a violation.
    let report = deriver(&store).compliance_status(&v.id).unwrap();
    assert!(report.is_compliant);
    assert_eq!(report.violation_count, 1);
    assert_eq!(report.penalty_amount, 750);
}

#[test]
fn test_assess_penalty_is_immutable() {
    let store = MemoryStore::new();
    let v = vessel();
    put_window(&store, &v, 0, 320_000.0);

    let service = deriver(&store);
    let assessment = service.assess_penalty(&v.id, 2025).unwrap();
    assert_eq!(assessment.amount, 750);
    assert_eq!(assessment.violation_count, 1);

    // A later window changes the derivation but not the record.
    put_window(&store, &v, 1, 340_000.0);
    let report = service.compliance_status(&v.id).unwrap();
    assert_eq!(report.penalty_amount, 1_500);

    let on_record = service.assessments(&v.id).unwrap();
    assert_eq!(on_record.len(), 1);
    assert_eq!(on_record[0].amount, 750);
}

#[test]
fn test_assessments_accumulate() {
    let store = MemoryStore::new();
    let v = vessel();
    put_window(&store, &v, 0, 320_000.0);

    let service = deriver(&store);
    service.assess_penalty(&v.id, 2025).unwrap();
    put_window(&store, &v, 1, 340_000.0);
    service.assess_penalty(&v.id, 2025).unwrap();

    let on_record = service.assessments(&v.id).unwrap();
    assert_eq!(on_record.len(), 2);
    assert_eq!(on_record[0].amount, 750);
    assert_eq!(on_record[1].amount, 1_500);
}
