//! Rotating-shift roster engine for hospital staff
//!
//! This crate computes per-staff monthly duty rosters from a rotating
//! active/off cycle, layers manual overrides, leave and facility holidays on
//! top, and audits the month for days with nobody on duty.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
