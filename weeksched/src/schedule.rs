//! Weekly schedule used to gate control loops.
//!
//! A [`WeeklySchedule`] is a 7x24x60 matrix where each cell represents a
//! one-minute slot of the week. Construction and formatting go through the
//! compact interval format (see [`crate::codec`]); queries are a single cell
//! lookup after converting the instant to the schedule's timezone.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use weeksched::{Day, WeeklySchedule};
//!
//! let schedule = WeeklySchedule::from_to(Day::Monday, Day::Friday, ((6, 0), (18, 0)))?
//!     .saturday(((6, 0), (12, 0)))?
//!     .for_timezone("Europe/Paris")?;
//!
//! // Monday 2022-02-14 09:00 in Paris
//! let instant = Utc.with_ymd_and_hms(2022, 2, 14, 8, 0, 0).unwrap();
//! assert!(schedule.is_on_at(&instant));
//! # Ok::<(), weeksched::ScheduleError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use log::{debug, trace, warn};

use crate::calendar::{CalendarHandle, WorkingDayCalendar};
use crate::codec::{decode_schedule, encode_day, encode_schedule};
use crate::error::{Result, ScheduleError};
use crate::grid::{MinuteGrid, MINUTES_PER_DAY};
use crate::models::{CompactSchedule, Day, DaySpec};
use crate::tz::parse_timezone;

/// Input accepted by [`WeeklySchedule::from_raw`].
#[derive(Debug, Clone)]
pub enum RawSchedule {
    /// Compact per-day intervals.
    Compact(CompactSchedule),
    /// Nested `[day][hour][minute]` cells, validated to be exactly 7x24x60.
    Dense(Vec<Vec<Vec<bool>>>),
    /// Nested `[day][hour][minute]` cells as 0/1 integers.
    Bits(Vec<Vec<Vec<u8>>>),
    /// Already validated grid.
    Grid(MinuteGrid),
}

impl From<CompactSchedule> for RawSchedule {
    fn from(schedule: CompactSchedule) -> Self {
        RawSchedule::Compact(schedule)
    }
}

impl From<Vec<Vec<Vec<bool>>>> for RawSchedule {
    fn from(nested: Vec<Vec<Vec<bool>>>) -> Self {
        RawSchedule::Dense(nested)
    }
}

impl From<Vec<Vec<Vec<u8>>>> for RawSchedule {
    fn from(bits: Vec<Vec<Vec<u8>>>) -> Self {
        RawSchedule::Bits(bits)
    }
}

impl From<MinuteGrid> for RawSchedule {
    fn from(grid: MinuteGrid) -> Self {
        RawSchedule::Grid(grid)
    }
}

/// Weekly schedule at one-minute resolution, with an optional timezone and
/// working-day calendar.
///
/// Two schedules are equal when their grids, timezones and calendar handles
/// (by identity) are equal.
#[derive(Clone, Default, PartialEq)]
pub struct WeeklySchedule {
    grid: MinuteGrid,
    timezone: Option<Tz>,
    calendar: Option<CalendarHandle>,
}

impl WeeklySchedule {
    /// Empty schedule without timezone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule which never allows control, in UTC.
    pub fn never() -> Self {
        Self {
            timezone: Some(Tz::UTC),
            ..Self::default()
        }
    }

    /// Schedule for 24/7 control, in UTC.
    pub fn always() -> Self {
        Self {
            grid: MinuteGrid::full(),
            timezone: Some(Tz::UTC),
            calendar: None,
        }
    }

    /// Build a weekly schedule from a compact mapping or a dense grid.
    ///
    /// A compact mapping looks like `{0: ((0, 0), (24, 0)), 1: ..., 6: ...}` with
    /// Monday as day 0. An empty mapping is rejected.
    pub fn from_raw(raw: impl Into<RawSchedule>, timezone: &str) -> Result<Self> {
        let grid = match raw.into() {
            RawSchedule::Compact(compact) => {
                if compact.is_empty() {
                    return Err(ScheduleError::invalid("raw schedule can't be empty"));
                }
                debug!("Building schedule from {} compact day(s)", compact.len());
                encode_schedule(&compact)?
            }
            RawSchedule::Dense(nested) => MinuteGrid::from_nested(&nested)?,
            RawSchedule::Bits(bits) => MinuteGrid::from_nested_bits(&bits)?,
            RawSchedule::Grid(grid) => grid,
        };

        Self {
            grid,
            ..Self::default()
        }
        .for_timezone(timezone)
    }

    /// Same as [`WeeklySchedule::from_raw`] for a borrowed compact mapping.
    pub fn from_compact(compact: &CompactSchedule, timezone: &str) -> Result<Self> {
        Self::from_raw(compact.clone(), timezone)
    }

    /// Parse a compact mapping from JSON, e.g. `{"0": [[6, 0], [18, 0]]}`.
    ///
    /// Text that is not JSON at all is a `Json` error. Well-formed JSON that is
    /// not a compact schedule (day keys outside 0-6, endpoints other than two
    /// integers, lists nested too deep) is an `InvalidArgument`.
    pub fn from_json(json: &str, timezone: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let compact: CompactSchedule = serde_json::from_value(value).map_err(|e| {
            ScheduleError::invalid(format!("invalid compact schedule: {}", e))
        })?;
        Self::from_raw(compact, timezone)
    }

    /// Apply the same day specification to every day in `[day_start, day_end]`.
    ///
    /// The result has no timezone; chain [`WeeklySchedule::for_timezone`] to set one.
    pub fn from_to(day_start: Day, day_end: Day, spec: impl Into<DaySpec>) -> Result<Self> {
        let spec = spec.into();
        if day_start > day_end {
            warn!(
                "Empty day range {}..={}, schedule stays empty",
                day_start, day_end
            );
        }

        let mut schedule = Self::new();
        for day in Day::ALL.into_iter().filter(|d| (day_start..=day_end).contains(d)) {
            schedule.set_day(day, &spec)?;
        }
        Ok(schedule)
    }

    /// Invert a weekly schedule.
    ///
    /// The new schedule keeps the timezone of `other`; the calendar is not copied.
    pub fn invert(other: &WeeklySchedule) -> WeeklySchedule {
        WeeklySchedule {
            grid: !&other.grid,
            timezone: other.timezone,
            calendar: None,
        }
    }

    /// Set the timezone, e.g. `"Europe/Paris"`.
    pub fn for_timezone(mut self, timezone: &str) -> Result<Self> {
        self.set_timezone(timezone)?;
        Ok(self)
    }

    pub fn set_timezone(&mut self, timezone: &str) -> Result<()> {
        self.timezone = Some(parse_timezone(timezone)?);
        Ok(())
    }

    /// Register a calendar deciding whether a day is a working day.
    ///
    /// Any `Fn(&NaiveDateTime) -> bool` closure is accepted. When set, queries on
    /// non-working days are off whatever the grid holds.
    pub fn with_working_days_calendar<C: WorkingDayCalendar + 'static>(self, calendar: C) -> Self {
        self.with_calendar_handle(CalendarHandle::new(calendar))
    }

    /// Register an already shared calendar.
    pub fn with_calendar_handle(mut self, calendar: CalendarHandle) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Replace one day's schedule.
    ///
    /// The day is left untouched if `spec` is invalid.
    pub fn set_day(&mut self, day: Day, spec: &DaySpec) -> Result<()> {
        let cells = encode_day(spec)?;
        self.grid.set_day(day.index(), &cells)
    }

    /// Chainable Monday setter, see [`WeeklySchedule::with_day`].
    pub fn monday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Monday, spec)
    }

    /// Chainable Tuesday setter, see [`WeeklySchedule::with_day`].
    pub fn tuesday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Tuesday, spec)
    }

    /// Chainable Wednesday setter, see [`WeeklySchedule::with_day`].
    pub fn wednesday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Wednesday, spec)
    }

    /// Chainable Thursday setter, see [`WeeklySchedule::with_day`].
    pub fn thursday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Thursday, spec)
    }

    /// Chainable Friday setter, see [`WeeklySchedule::with_day`].
    pub fn friday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Friday, spec)
    }

    /// Chainable Saturday setter, see [`WeeklySchedule::with_day`].
    pub fn saturday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Saturday, spec)
    }

    /// Chainable Sunday setter, see [`WeeklySchedule::with_day`].
    pub fn sunday(self, spec: impl Into<DaySpec>) -> Result<Self> {
        self.with_day(Day::Sunday, spec)
    }

    /// Set one day's schedule and return the schedule for chaining.
    ///
    /// The schedule is consumed and dropped on error; use
    /// [`WeeklySchedule::set_day`] to keep it.
    pub fn with_day(mut self, day: Day, spec: impl Into<DaySpec>) -> Result<Self> {
        self.set_day(day, &spec.into())?;
        Ok(self)
    }

    /// Postpone the start of every slot by `hours` and `minutes`.
    ///
    /// The end of each slot is unchanged, so slots shorter than the shift
    /// disappear. The total shift must not be negative, and a shift of a full
    /// day or more clears the schedule.
    ///
    /// The schedule is consumed and dropped on error; use
    /// [`WeeklySchedule::apply_shift_start`] to keep it.
    pub fn shift_start(mut self, hours: i64, minutes: i64) -> Result<Self> {
        self.apply_shift_start(hours, minutes)?;
        Ok(self)
    }

    /// In-place form of [`WeeklySchedule::shift_start`].
    pub fn apply_shift_start(&mut self, hours: i64, minutes: i64) -> Result<()> {
        // i64 * 60 + i64 always fits in i128
        let total = i128::from(hours) * 60 + i128::from(minutes);
        if total < 0 {
            return Err(ScheduleError::invalid(format!(
                "start should be postponed by a positive number of minutes, got {}",
                total
            )));
        }

        debug!("Shifting schedule starts by {} minute(s)", total);
        let total =
            usize::try_from(total.min(MINUTES_PER_DAY as i128)).unwrap_or(MINUTES_PER_DAY);
        self.grid.shift_start(total);
        Ok(())
    }

    /// The raw (7, 24, 60) grid.
    pub fn schedule(&self) -> &MinuteGrid {
        &self.grid
    }

    /// Compact form: `{day: ((start_h, start_m), (end_h, end_m))}` or a list of
    /// intervals per day; days without slots are omitted.
    pub fn format_schedule(&self) -> CompactSchedule {
        decode_schedule(&self.grid)
    }

    /// Compact form serialized as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.format_schedule())?)
    }

    /// Timezone identifier, if one is set.
    pub fn timezone(&self) -> Option<&'static str> {
        self.timezone.map(|tz| tz.name())
    }

    pub fn tz(&self) -> Option<Tz> {
        self.timezone
    }

    pub fn calendar(&self) -> Option<&CalendarHandle> {
        self.calendar.as_ref()
    }

    /// Whether the current time falls in the schedule.
    pub fn is_on(&self) -> bool {
        self.is_on_at(&Utc::now())
    }

    /// Whether `instant` falls in the schedule.
    ///
    /// The instant is converted to the schedule's timezone, or read on its own
    /// wall clock when no timezone is set. A calendar, when present, is
    /// consulted first and short-circuits on non-working days.
    pub fn is_on_at<T: TimeZone>(&self, instant: &DateTime<T>) -> bool {
        let local = match self.timezone {
            Some(tz) => instant.with_timezone(&tz).naive_local(),
            None => instant.naive_local(),
        };
        self.is_on_local(&local)
    }

    /// Parse an RFC 3339 instant and evaluate it.
    pub fn is_on_at_str(&self, instant: &str) -> Result<bool> {
        let parsed = DateTime::parse_from_rfc3339(instant.trim()).map_err(|e| {
            ScheduleError::invalid(format!("'{}' is not a valid date-time: {}", instant, e))
        })?;
        Ok(self.is_on_at(&parsed))
    }

    fn is_on_local(&self, local: &NaiveDateTime) -> bool {
        if let Some(calendar) = &self.calendar {
            if !calendar.is_working_day(local) {
                trace!("{} is not a working day", local.date());
                return false;
            }
        }

        self.grid.get(
            local.weekday().num_days_from_monday() as usize,
            local.hour() as usize,
            local.minute() as usize,
        )
    }

    /// Whether any slot is defined for `day`.
    pub fn is_defined_for_day(&self, day: Day) -> bool {
        self.grid.day(day.index()).iter().any(|&c| c)
    }
}

fn format_compact(compact: &CompactSchedule) -> String {
    let days: Vec<String> = compact
        .iter()
        .map(|(day, spec)| format!("{}: {}", day, spec))
        .collect();
    format!("{{{}}}", days.join("; "))
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeeklySchedule(schedule={}, timezone={}, calendar={})",
            format_compact(&self.format_schedule()),
            self.timezone().unwrap_or("None"),
            if self.calendar.is_some() { "set" } else { "None" }
        )
    }
}

impl fmt::Debug for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeeklySchedule")
            .field("schedule", &self.format_schedule())
            .field("timezone", &self.timezone())
            .field("calendar", &self.calendar)
            .finish()
    }
}
