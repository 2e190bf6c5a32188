//! Response types for the roster engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{FacilityMetadata, ShiftTimings};
use crate::error::EngineError;
use crate::models::{MonthRoster, ScheduleDefaults};

/// Response body for the `/roster` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Unique identifier for this computation.
    pub calculation_id: Uuid,
    /// When the computation ran.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the roster.
    pub engine_version: String,
    /// The computed month.
    pub roster: MonthRoster,
}

impl RosterResponse {
    /// Wraps a computed month with a fresh id and timestamp.
    pub fn new(roster: MonthRoster) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            roster,
        }
    }
}

/// Response body for the `/facility` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityResponse {
    /// Facility metadata.
    pub facility: FacilityMetadata,
    /// Informational shift windows.
    pub shift_timings: ShiftTimings,
    /// Defaults applied to staff without a schedule.
    pub default_schedule: ScheduleDefaults,
    /// Number of configured holidays.
    pub holiday_count: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidMonth { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    message,
                    "The month must be given as YYYY-MM with a month between 01 and 12",
                ),
            },
            EngineError::DegenerateCycleConfig { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "DEGENERATE_CYCLE_CONFIG",
                    message,
                    "Cycle length and rotation frequency must both be at least 1",
                ),
            },
            EngineError::InvalidDutyCode { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_DUTY_CODE", message),
            },
            EngineError::InvalidShiftPattern { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_SHIFT_PATTERN", message),
            },
            EngineError::InvalidLeaveInterval { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_LEAVE_INTERVAL", message),
            },
            EngineError::SourceUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("SOURCE_UNAVAILABLE", message),
            },
        }
    }
}
