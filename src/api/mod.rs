//! HTTP API module for the roster engine.
//!
//! This module provides the REST API endpoints for computing monthly rosters
//! and reading the facility configuration.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{compute_roster, create_router};
pub use request::{RosterRequest, StaffRequest};
pub use response::{ApiError, ApiErrorResponse, FacilityResponse, RosterResponse};
pub use state::AppState;
