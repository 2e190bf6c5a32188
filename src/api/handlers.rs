//! HTTP request handlers for the roster engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::MonthRoster;
use crate::orchestrator::compute_month_roster_with;

use super::request::RosterRequest;
use super::response::{ApiError, ApiErrorResponse, FacilityResponse, RosterResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/roster", post(roster_handler))
        .route("/facility", get(facility_handler))
        .with_state(state)
}

/// Computes the month described by a self-contained request.
///
/// Holidays and the default schedule fall back to `config` when the request
/// omits them.
///
/// # Errors
///
/// Returns `InvalidMonth` for a malformed month, or `DegenerateCycleConfig`
/// if the request's default schedule cannot drive a cycle.
pub fn compute_roster(request: RosterRequest, config: &ConfigLoader) -> EngineResult<MonthRoster> {
    let month = request.roster_month()?;
    let defaults = request
        .default_schedule
        .unwrap_or(*config.default_schedule());
    defaults
        .anchored_at(month.first_day())
        .validate("default_schedule")?;

    let staff = request.staff_ids();
    let source = request.into_source(config.holidays_in(month));
    Ok(compute_month_roster_with(&source, &staff, month, &defaults))
}

/// Handler for POST /roster endpoint.
async fn roster_handler(
    State(state): State<AppState>,
    payload: Result<Json<RosterRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing roster request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_time = Instant::now();
    let staff_count = request.staff.len();
    match compute_roster(request, state.config()) {
        Ok(roster) => {
            info!(
                correlation_id = %correlation_id,
                month = %roster.month,
                staff_count,
                conflict_days = roster.conflict_days.len(),
                issues = roster.issues.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Roster computed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(RosterResponse::new(roster)),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Roster request rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /facility endpoint.
async fn facility_handler(State(state): State<AppState>) -> Json<FacilityResponse> {
    let config = state.config();
    Json(FacilityResponse {
        facility: config.facility().clone(),
        shift_timings: *config.shift_timings(),
        default_schedule: *config.default_schedule(),
        holiday_count: config.config().holidays().len(),
    })
}
