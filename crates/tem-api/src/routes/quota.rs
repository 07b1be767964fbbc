//! Quota routes: seasonal balances, catch recording, and the transfer
//! request lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tem_core::{TransferId, VesselId};
use tem_quota::{QuotaAlert, QuotaBalance, TransferRequest, TransferSubmission};

use crate::error::AppError;
use crate::state::AppState;

/// Routes under `/v1/quota`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/quota/vessels/{id}/allocations", post(allocate))
        .route("/v1/quota/vessels/{id}/balances", get(balances))
        .route("/v1/quota/vessels/{id}/catch", post(record_catch))
        .route("/v1/quota/vessels/{id}/transfers", get(list_transfers))
        .route("/v1/quota/transfers", post(submit_transfer))
        .route("/v1/quota/transfers/{id}", get(get_transfer))
        .route("/v1/quota/transfers/{id}/approve", post(approve_transfer))
        .route("/v1/quota/transfers/{id}/reject", post(reject_transfer))
}

/// A balance with its derived fields spelled out, as reporting callers
/// expect them.
#[derive(Debug, Serialize)]
pub struct QuotaBalanceView {
    #[serde(flatten)]
    pub balance: QuotaBalance,
    pub remaining_pounds: f64,
    pub percentage_used: f64,
    pub status: String,
}

impl From<QuotaBalance> for QuotaBalanceView {
    fn from(balance: QuotaBalance) -> Self {
        Self {
            remaining_pounds: balance.remaining_pounds(),
            percentage_used: balance.percentage_used(),
            status: balance.status().to_string(),
            balance,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AllocateRequest {
    pub species_code: String,
    pub season_year: i32,
    pub pounds: f64,
}

async fn allocate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AllocateRequest>,
) -> Result<(StatusCode, Json<QuotaBalanceView>), AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let balance =
        state
            .quota
            .allocate(vessel_id, &body.species_code, body.season_year, body.pounds)?;
    Ok((StatusCode::CREATED, Json(balance.into())))
}

#[derive(Debug, Deserialize)]
struct SeasonQuery {
    season_year: i32,
}

#[derive(Debug, Serialize)]
struct BalancesResponse {
    balances: Vec<QuotaBalanceView>,
    alerts: Vec<QuotaAlert>,
}

async fn balances(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SeasonQuery>,
) -> Json<BalancesResponse> {
    let vessel_id = VesselId::from_uuid(id);
    let balances = state
        .quota
        .balances_for(&vessel_id, query.season_year)
        .into_iter()
        .map(QuotaBalanceView::from)
        .collect();
    let alerts = state.quota.alerts_for(&vessel_id, query.season_year);
    Json(BalancesResponse { balances, alerts })
}

#[derive(Debug, Deserialize)]
pub struct CatchRequest {
    pub species_code: String,
    pub season_year: i32,
    pub pounds: f64,
}

/// Record catch against a balance; the response body is the list of
/// alert thresholds this catch newly crossed.
async fn record_catch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CatchRequest>,
) -> Result<Json<Vec<QuotaAlert>>, AppError> {
    let vessel_id = VesselId::from_uuid(id);
    let alerts =
        state
            .quota
            .record_catch(&vessel_id, &body.species_code, body.season_year, body.pounds)?;
    Ok(Json(alerts))
}

async fn submit_transfer(
    State(state): State<AppState>,
    Json(submission): Json<TransferSubmission>,
) -> Result<(StatusCode, Json<TransferRequest>), AppError> {
    let request = state.quota.submit_transfer(submission)?;
    Ok((StatusCode::CREATED, Json(request)))
}

async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransferRequest>, AppError> {
    let request = state.quota.get_transfer(&TransferId::from_uuid(id))?;
    Ok(Json(request))
}

async fn list_transfers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<Vec<TransferRequest>> {
    let vessel_id = VesselId::from_uuid(id);
    Json(state.quota.transfers_for(&vessel_id))
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub reviewed_by: String,
}

async fn approve_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApproveRequest>,
) -> Result<Json<TransferRequest>, AppError> {
    let request = state
        .quota
        .approve_transfer(&TransferId::from_uuid(id), &body.reviewed_by)?;
    Ok(Json(request))
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reviewed_by: String,
    pub note: String,
}

async fn reject_transfer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<Json<TransferRequest>, AppError> {
    let request = state.quota.reject_transfer(
        &TransferId::from_uuid(id),
        &body.reviewed_by,
        &body.note,
    )?;
    Ok(Json(request))
}
