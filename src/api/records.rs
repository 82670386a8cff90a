//! Tax record endpoints. Every handler is scoped to the authenticated user.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{TaxRecord, TaxRecordUpdate};

use super::auth::CurrentUser;
use super::handlers::{tax_error, json_body, path_param, query_param};
use super::request::{CreateTaxRecordRequest, PageQuery};
use super::response::{ApiErrorResponse, MessageResponse};
use super::state::AppState;

/// Handler for POST /tax/records.
pub(super) async fn create_record_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateTaxRecordRequest>, JsonRejection>,
) -> Result<Json<TaxRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = user.id, "Creating tax record");

    let request = json_body(payload, correlation_id)?;
    let now = Utc::now();
    request
        .validate(state.config().records().min_tax_year, now.year())
        .map_err(|err| tax_error(correlation_id, err))?;

    let record = state
        .store()
        .create_tax_record(user.id, request.gross_salary, request.tax_year, now);

    info!(
        correlation_id = %correlation_id,
        record_id = record.id,
        tax_paid = %record.tax_paid,
        "Tax record created"
    );
    Ok(Json(record))
}

/// Handler for GET /tax/records.
pub(super) async fn list_records_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<TaxRecord>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let (skip, limit) = query_param(query, correlation_id)?.resolve(state.config().records());

    let records = state.store().tax_records(user.id, skip, limit);
    info!(
        correlation_id = %correlation_id,
        user_id = user.id,
        skip,
        limit,
        count = records.len(),
        "Listed tax records"
    );
    Ok(Json(records))
}

/// Handler for GET /tax/records/:id.
pub(super) async fn get_record_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaxRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(path, correlation_id)?;

    let record = state
        .store()
        .tax_record(id, user.id)
        .map_err(|err| tax_error(correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for PUT /tax/records/:id.
///
/// A new salary recalculates the record from scratch.
pub(super) async fn update_record_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaxRecordUpdate>, JsonRejection>,
) -> Result<Json<TaxRecord>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = user.id, "Updating tax record");

    let id = path_param(path, correlation_id)?;
    let update = json_body(payload, correlation_id)?;
    let now = Utc::now();
    update
        .validate(state.config().records().min_tax_year, now.year())
        .map_err(|err| tax_error(correlation_id, err))?;

    let record = state
        .store()
        .update_tax_record(id, user.id, &update, now)
        .map_err(|err| tax_error(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        record_id = record.id,
        tax_paid = %record.tax_paid,
        "Tax record updated"
    );
    Ok(Json(record))
}

/// Handler for DELETE /tax/records/:id.
pub(super) async fn delete_record_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let id = path_param(path, correlation_id)?;

    state
        .store()
        .delete_tax_record(id, user.id)
        .map_err(|err| tax_error(correlation_id, err))?;

    info!(correlation_id = %correlation_id, record_id = id, "Tax record deleted");
    Ok(Json(MessageResponse {
        message: "Tax record deleted successfully".to_string(),
    }))
}
