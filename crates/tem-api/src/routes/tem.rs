//! Compliance routes: vessel registration, landing ingest and history,
//! recompute, compliance reports, and penalty assessments.
//!
//! Handlers translate HTTP to engine calls and back; every decision about
//! what a landing or a window *means* lives in `tem-engine`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use tem_core::{
    Landing, LandingCorrection, LandingId, LandingSubmission, PenaltyAssessment, Vessel, VesselId,
};
use tem_engine::{
    ComplianceReport, EngineError, IngestReceipt, LandingStore, RecomputeOutcome, VesselStore,
};

use crate::error::AppError;
use crate::state::AppState;

/// Routes under `/v1/tem`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/tem/vessels", post(register_vessel).get(list_vessels))
        .route("/v1/tem/landings", post(submit_landing).get(list_landings))
        .route("/v1/tem/landings/{id}/corrections", post(correct_landing))
        .route("/v1/tem/vessels/{id}/recompute", post(recompute))
        .route("/v1/tem/vessels/{id}/compliance", get(compliance))
        .route(
            "/v1/tem/vessels/{id}/assessments",
            post(assess_penalty).get(list_assessments),
        )
}

#[derive(Debug, Deserialize)]
pub struct RegisterVesselRequest {
    pub name: String,
    pub hull_length_ft: f64,
    pub registration_number: Option<String>,
}

async fn register_vessel(
    State(state): State<AppState>,
    Json(body): Json<RegisterVesselRequest>,
) -> Result<(StatusCode, Json<Vessel>), AppError> {
    let vessel =
        state
            .engine
            .register_vessel(&body.name, body.hull_length_ft, body.registration_number)?;
    Ok((StatusCode::CREATED, Json(vessel)))
}

async fn list_vessels(State(state): State<AppState>) -> Result<Json<Vec<Vessel>>, AppError> {
    let vessels = state
        .engine
        .stores()
        .vessels
        .list_vessels()
        .map_err(EngineError::from)?;
    Ok(Json(vessels))
}

#[derive(Debug, Deserialize)]
struct LandingsQuery {
    vessel_id: Uuid,
}

/// Full landing history for a vessel, newest first, superseded entries
/// included — this is the audit view, not the calculator's input.
async fn list_landings(
    State(state): State<AppState>,
    Query(query): Query<LandingsQuery>,
) -> Result<Json<Vec<Landing>>, AppError> {
    let vessel_id = VesselId::from_uuid(query.vessel_id);
    let landings = state
        .engine
        .stores()
        .landings
        .all_landings(&vessel_id)
        .map_err(EngineError::from)?;
    Ok(Json(landings))
}

async fn submit_landing(
    State(state): State<AppState>,
    Json(submission): Json<LandingSubmission>,
) -> Result<(StatusCode, Json<IngestReceipt>), AppError> {
    let receipt = state.engine.ingest.submit(submission)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn correct_landing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(correction): Json<LandingCorrection>,
) -> Result<(StatusCode, Json<IngestReceipt>), AppError> {
    let landing_id = LandingId::from_uuid(id);
    let receipt = state.engine.ingest.correct(&landing_id, correction)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn recompute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecomputeOutcome>, AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let outcome = state.engine.calculator.recompute(&vessel_id)?;
    Ok(Json(outcome))
}

async fn compliance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplianceReport>, AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let report = state.engine.deriver.compliance_status(&vessel_id)?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    pub season_year: i32,
}

async fn assess_penalty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AssessRequest>,
) -> Result<(StatusCode, Json<PenaltyAssessment>), AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let assessment = state.engine.deriver.assess_penalty(&vessel_id, body.season_year)?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

async fn list_assessments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PenaltyAssessment>>, AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let assessments = state.engine.deriver.assessments(&vessel_id)?;
    Ok(Json(assessments))
}
