//! Schedule configuration file support.
//!
//! This module reads a weekly schedule from a TOML file:
//!
//! ```toml
//! timezone = "Europe/Paris"
//! holidays = ["2024-05-08"]
//!
//! [shift_start]
//! hours = 0
//! minutes = 30
//!
//! [days]
//! monday = [[6, 0], [18, 0]]
//! saturday = [[[0, 0], [7, 0]], [[20, 0], [24, 0]]]
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::calendar::HolidayDates;
use crate::error::{Result, ScheduleError};
use crate::models::{CompactSchedule, Day, DaySpec};
use crate::schedule::WeeklySchedule;
use crate::tz::DEFAULT_TIMEZONE;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV_VAR: &str = "WEEKSCHED_CONFIG";

/// Weekly schedule configuration from file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Dates (`"YYYY-MM-DD"`) on which the schedule is always off.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<ShiftSettings>,
    #[serde(default)]
    pub days: DaySettings,
}

/// Start postponement applied after the days are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSettings {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
}

/// Per-day compact specifications keyed by day name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<DaySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<DaySpec>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            holidays: Vec::new(),
            shift_start: None,
            days: DaySettings::default(),
        }
    }
}

impl DaySettings {
    fn get(&self, day: Day) -> Option<&DaySpec> {
        match day {
            Day::Monday => self.monday.as_ref(),
            Day::Tuesday => self.tuesday.as_ref(),
            Day::Wednesday => self.wednesday.as_ref(),
            Day::Thursday => self.thursday.as_ref(),
            Day::Friday => self.friday.as_ref(),
            Day::Saturday => self.saturday.as_ref(),
            Day::Sunday => self.sunday.as_ref(),
        }
    }

    /// Compact mapping of the configured days.
    pub fn to_compact(&self) -> CompactSchedule {
        Day::ALL
            .into_iter()
            .filter_map(|day| self.get(day).map(|spec| (u8::from(day), spec.clone())))
            .collect()
    }

    /// Build settings from a compact mapping, rejecting day keys outside 0-6.
    pub fn from_compact(compact: &CompactSchedule) -> Result<Self> {
        let mut settings = DaySettings::default();
        for (&index, spec) in compact {
            let slot = match Day::try_from(index)? {
                Day::Monday => &mut settings.monday,
                Day::Tuesday => &mut settings.tuesday,
                Day::Wednesday => &mut settings.wednesday,
                Day::Thursday => &mut settings.thursday,
                Day::Friday => &mut settings.friday,
                Day::Saturday => &mut settings.saturday,
                Day::Sunday => &mut settings.sunday,
            };
            *slot = Some(spec.clone());
        }
        Ok(settings)
    }
}

impl ScheduleConfig {
    /// Load schedule configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ScheduleConfig)` if successful
    /// * `Err(ScheduleError::Config)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScheduleError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded schedule configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse schedule configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScheduleError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Render the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| ScheduleError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load schedule configuration from the default location.
    ///
    /// Searches for `weeksched.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self> {
        let search_paths = [
            PathBuf::from("weeksched.toml"),
            PathBuf::from("config/weeksched.toml"),
            PathBuf::from("../weeksched.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ScheduleError::Config(
            "No weeksched.toml found in standard locations".to_string(),
        ))
    }

    /// Load from the file named by `WEEKSCHED_CONFIG`, falling back to the
    /// default locations.
    pub fn from_env_or_default() -> Result<Self> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                info!("Using schedule configuration from {}={}", CONFIG_ENV_VAR, path);
                Self::from_file(path.trim())
            }
            _ => Self::from_default_location(),
        }
    }

    /// Build the configured schedule.
    ///
    /// Days are applied first, then the timezone, the holiday calendar and
    /// finally the start shift.
    pub fn build(&self) -> Result<WeeklySchedule> {
        let compact = self.days.to_compact();
        let mut schedule = WeeklySchedule::from_raw(compact, &self.timezone)?;

        if !self.holidays.is_empty() {
            debug!("Registering {} holiday(s)", self.holidays.len());
            schedule = schedule
                .with_working_days_calendar(HolidayDates::new(self.holidays.iter().copied()));
        }

        if let Some(shift) = self.shift_start {
            schedule = schedule.shift_start(shift.hours, shift.minutes)?;
        }

        Ok(schedule)
    }
}
