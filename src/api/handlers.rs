//! HTTP request handlers for the Tax Calculator API.
//!
//! This module builds the router and holds the public endpoints plus the
//! extraction helpers shared by the authenticated handlers in
//! [`auth`](super::auth), [`records`](super::records) and
//! [`employees`](super::employees).

use std::time::Instant;

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate;
use crate::error::TaxError;
use crate::models::validate_gross_salary;

use super::request::CalculateTaxRequest;
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, RootResponse, TaxBreakdownResponse,
};
use super::state::AppState;
use super::{auth, employees, records};

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/me", get(auth::me_handler))
        .route("/tax/calculate", post(calculate_handler))
        .route(
            "/tax/records",
            post(records::create_record_handler).get(records::list_records_handler),
        )
        .route(
            "/tax/records/:id",
            get(records::get_record_handler)
                .put(records::update_record_handler)
                .delete(records::delete_record_handler),
        )
        .route("/employees", get(employees::list_employees_handler))
        .route("/employees/register", post(employees::register_employee_handler))
        .route("/employees/records", get(employees::employee_records_handler))
        .route("/employees/:id", get(employees::get_employee_handler))
        .route("/employees/:id/dashboard", get(employees::dashboard_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for GET /.
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Tax Calculator API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /health.
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Tax Calculator API is running".to_string(),
    })
}

/// Handler for POST /tax/calculate.
///
/// Runs the calculator on the submitted salary without storing anything.
async fn calculate_handler(
    payload: Result<Json<CalculateTaxRequest>, JsonRejection>,
) -> Result<Json<TaxBreakdownResponse>, ApiErrorResponse> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax calculation request");

    let request = json_body(payload, correlation_id)?;
    validate_gross_salary(request.gross_salary)
        .map_err(|err| tax_error(correlation_id, err))?;

    let start_time = Instant::now();
    let result = calculate(request.gross_salary);
    info!(
        correlation_id = %correlation_id,
        gross_salary = %request.gross_salary,
        tax_paid = %result.tax_paid,
        tax_rate = %result.tax_rate,
        duration_us = start_time.elapsed().as_micros(),
        "Tax calculation completed"
    );

    Ok(Json(TaxBreakdownResponse::new(request.gross_salary, result)))
}

/// Unwraps a JSON body, mapping extraction failures to API errors.
pub(super) fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps a path parameter, mapping failures to a validation error.
pub(super) fn path_param<T>(
    path: Result<axum::extract::Path<T>, PathRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match path {
        Ok(axum::extract::Path(value)) => Ok(value),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Invalid path parameter");
            Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                body_text,
            )))
        }
    }
}

/// Unwraps a query string, mapping failures to a validation error.
pub(super) fn query_param<T>(
    query: Result<axum::extract::Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match query {
        Ok(axum::extract::Query(value)) => Ok(value),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
            Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                body_text,
            )))
        }
    }
}

/// Logs a failed request and converts the error.
pub(super) fn tax_error(correlation_id: Uuid, err: TaxError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    err.into()
}
