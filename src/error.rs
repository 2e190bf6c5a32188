//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that stops a computation outright. Failures that only
//! degrade a single staff member or the holiday layer are reported as
//! [`RosterIssue`](crate::models::RosterIssue) values instead.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the roster engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonth { year: 2026, month: 13 };
/// assert_eq!(error.to_string(), "Invalid month: 2026-13");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested roster month does not exist.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A staff member's cycle parameters cannot produce a schedule.
    #[error("Degenerate cycle configuration for staff '{staff_id}': {message}")]
    DegenerateCycleConfig {
        /// The staff member whose configuration was rejected.
        staff_id: String,
        /// What made the configuration degenerate.
        message: String,
    },

    /// A duty code string did not match any known code.
    #[error("Unknown duty code: {code}")]
    InvalidDutyCode {
        /// The unrecognised code.
        code: String,
    },

    /// A numeric shift pattern did not match any known pattern.
    #[error("Unknown shift pattern: {value}")]
    InvalidShiftPattern {
        /// The unrecognised value.
        value: u32,
    },

    /// A leave interval ends before it starts.
    #[error("Invalid leave interval for staff '{staff_id}': {start_date} is after {end_date}")]
    InvalidLeaveInterval {
        /// The staff member the interval belongs to.
        staff_id: String,
        /// The first day of the interval.
        start_date: NaiveDate,
        /// The last day of the interval.
        end_date: NaiveDate,
    },

    /// A collaborator could not deliver the requested records.
    #[error("Failed to fetch {resource}: {message}")]
    SourceUnavailable {
        /// The kind of record being fetched (e.g. "holidays").
        resource: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
