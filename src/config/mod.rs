//! Configuration loading and management for the roster engine.
//!
//! This module loads facility configuration from YAML files: facility
//! metadata, informational shift windows, the default schedule for staff
//! without a configuration, and the holiday calendar.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/facility").unwrap();
//! println!("Loaded facility: {}", config.facility().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    FacilityConfig, FacilityFile, FacilityMetadata, HolidayCalendar, ShiftTimings, ShiftWindow,
};
