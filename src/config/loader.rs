//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading facility
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DutyCode, Holiday, RosterMonth, ScheduleDefaults};

use super::types::{
    FacilityConfig, FacilityFile, FacilityMetadata, HolidayCalendar, ShiftTimings, ShiftWindow,
};

/// Loads and provides access to facility configuration.
///
/// # Directory Structure
///
/// ```text
/// config/facility/
/// ├── facility.yaml     # Facility metadata, shift windows, default schedule
/// └── holidays/
///     └── 2026.yaml     # Holiday calendar, one file per year
/// ```
///
/// The `holidays/` directory is optional.
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
/// use roster_engine::models::RosterMonth;
///
/// let loader = ConfigLoader::load("./config/facility").unwrap();
/// let month = RosterMonth::new(2026, 12).unwrap();
/// for holiday in loader.holidays_in(month) {
///     println!("{}: {}", holiday.date, holiday.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FacilityConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if `facility.yaml` is missing, or
    /// `ConfigParseError` if any file contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use roster_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/facility")?;
    /// # Ok::<(), roster_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let facility = Self::load_yaml::<FacilityFile>(&path.join("facility.yaml"))?;
        facility
            .default_schedule
            .anchored_at(chrono::NaiveDate::MIN)
            .validate("default_schedule")
            .map_err(|err| EngineError::ConfigParseError {
                path: path.join("facility.yaml").display().to_string(),
                message: err.to_string(),
            })?;

        let holidays = Self::load_holidays(&path.join("holidays"))?;

        debug!(
            path = %path.display(),
            facility = %facility.facility.code,
            holidays = holidays.len(),
            "Loaded facility configuration"
        );

        Ok(Self {
            config: FacilityConfig::new(
                facility.facility,
                facility.shift_timings,
                facility.default_schedule,
                holidays,
            ),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: FacilityConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every calendar file in the holidays directory, in file name order.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<Vec<Holiday>> {
        if !holidays_dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                files.push(path);
            }
        }
        files.sort();

        let mut holidays = Vec::new();
        for file in files {
            let calendar = Self::load_yaml::<HolidayCalendar>(&file)?;
            holidays.extend(calendar.holidays);
        }
        Ok(holidays)
    }

    /// Returns the underlying facility configuration.
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Returns the facility metadata.
    pub fn facility(&self) -> &FacilityMetadata {
        self.config.facility()
    }

    /// Returns the facility shift windows.
    pub fn shift_timings(&self) -> &ShiftTimings {
        self.config.shift_timings()
    }

    /// Returns the window for a shift code, if it has one.
    pub fn shift_window(&self, code: DutyCode) -> Option<&ShiftWindow> {
        self.config.shift_timings().window(code)
    }

    /// Returns the default schedule for staff without a configuration.
    pub fn default_schedule(&self) -> &ScheduleDefaults {
        self.config.default_schedule()
    }

    /// Returns the configured holidays falling in `month`.
    pub fn holidays_in(&self, month: RosterMonth) -> &[Holiday] {
        self.config.holidays_in(month)
    }
}
