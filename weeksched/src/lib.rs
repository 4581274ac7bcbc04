//! # weeksched
//!
//! Minute-resolution weekly schedules for gating control loops.
//!
//! A schedule answers one question: should the loop be active at a given
//! instant? It is stored as a dense 7x24x60 grid of one-minute slots, built from
//! and rendered back to a compact per-day interval format, and evaluated in an
//! IANA timezone with an optional working-day calendar.
//!
//! ## Architecture
//!
//! - [`models`]: days, clock times, intervals and the compact schedule format
//! - [`grid`]: the dense minute grid and its cell-wise operations
//! - [`codec`]: compact format to grid and back
//! - [`schedule`]: the [`WeeklySchedule`] type with its builders and queries
//! - [`calendar`]: working-day predicates
//! - [`tz`]: timezone resolution
//! - [`config`]: TOML configuration files
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use weeksched::{CompactSchedule, DaySpec, WeeklySchedule};
//!
//! let mut compact = CompactSchedule::new();
//! compact.insert(0, DaySpec::from(((6, 0), (18, 0))));
//! let schedule = WeeklySchedule::from_raw(compact, "UTC")?;
//!
//! // 2022-02-14 is a Monday
//! assert!(!schedule.is_on_at(&Utc.with_ymd_and_hms(2022, 2, 14, 5, 59, 0).unwrap()));
//! assert!(schedule.is_on_at(&Utc.with_ymd_and_hms(2022, 2, 14, 6, 0, 0).unwrap()));
//! # Ok::<(), weeksched::ScheduleError>(())
//! ```

pub mod calendar;
pub mod codec;
pub mod config;
pub mod error;
pub mod grid;
pub mod models;
pub mod schedule;
pub mod tz;


pub use calendar::{CalendarHandle, HolidayDates, WorkingDayCalendar};
pub use config::ScheduleConfig;
pub use error::{Result, ScheduleError};
pub use grid::MinuteGrid;
pub use models::{ClockTime, CompactSchedule, Day, DaySpec, Interval};
pub use schedule::{RawSchedule, WeeklySchedule};
