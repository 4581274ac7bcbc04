use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::grid::MINUTES_PER_DAY;

/// Compact weekly schedule: day index (Monday = 0) to that day's intervals.
///
/// Days without any allowed time are absent from the map.
pub type CompactSchedule = BTreeMap<u8, DaySpec>;

/// Wall-clock time of day at minute resolution.
///
/// Stored signed so that malformed input such as `(-1, 0)` can be carried to
/// validation and rejected there. `24:00` denotes the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct ClockTime {
    pub hour: i32,
    pub minute: i32,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };
    pub const END_OF_DAY: ClockTime = ClockTime { hour: 24, minute: 0 };

    pub fn new(hour: i32, minute: i32) -> Self {
        Self { hour, minute }
    }

    /// Build from a minute offset within the day (0..=1440).
    pub fn from_minute_index(index: usize) -> Self {
        Self {
            hour: (index / 60) as i32,
            minute: (index % 60) as i32,
        }
    }

    /// Validate `00:00 <= self <= 24:00` and return the minute offset within the day.
    pub(crate) fn minute_index(&self, label: &str) -> Result<usize> {
        let in_range = (0..=24).contains(&self.hour)
            && (0..60).contains(&self.minute)
            && (self.hour < 24 || self.minute == 0);
        if !in_range {
            return Err(ScheduleError::invalid(format!(
                "{} time should be 00:00 <= x <= 24:00, got {}",
                label, self
            )));
        }
        Ok((self.hour * 60 + self.minute) as usize)
    }
}

impl From<(i32, i32)> for ClockTime {
    fn from((hour, minute): (i32, i32)) -> Self {
        Self { hour, minute }
    }
}

impl From<ClockTime> for (i32, i32) {
    fn from(t: ClockTime) -> Self {
        (t.hour, t.minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(ClockTime, ClockTime)", into = "(ClockTime, ClockTime)")]
pub struct Interval {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Interval {
    pub fn new(start: impl Into<ClockTime>, end: impl Into<ClockTime>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The whole day, `00:00` to `24:00`.
    pub fn full_day() -> Self {
        Self::new(ClockTime::MIDNIGHT, ClockTime::END_OF_DAY)
    }

    /// Validated `[start, end)` minute indexes.
    pub(crate) fn minute_range(&self) -> Result<std::ops::Range<usize>> {
        let start = self.start.minute_index("start")?;
        let end = self.end.minute_index("end")?;
        if start >= end {
            return Err(ScheduleError::invalid(format!(
                "start time should be before end time, got {} >= {}",
                self.start, self.end
            )));
        }
        debug_assert!(end <= MINUTES_PER_DAY);
        Ok(start..end)
    }
}

impl<S: Into<ClockTime>, E: Into<ClockTime>> From<(S, E)> for Interval {
    fn from((start, end): (S, E)) -> Self {
        Interval::new(start, end)
    }
}

impl From<Interval> for (ClockTime, ClockTime) {
    fn from(i: Interval) -> Self {
        (i.start, i.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One day's allowed time: a single interval or several disjoint ones.
///
/// Deserializes from either nesting depth, `[[6, 0], [18, 0]]` or
/// `[[[0, 0], [7, 0]], [[20, 0], [24, 0]]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaySpec {
    Single(Interval),
    Multiple(Vec<Interval>),
}

impl DaySpec {
    pub fn full_day() -> Self {
        DaySpec::Single(Interval::full_day())
    }

    pub fn intervals(&self) -> &[Interval] {
        match self {
            DaySpec::Single(interval) => std::slice::from_ref(interval),
            DaySpec::Multiple(intervals) => intervals,
        }
    }

    /// Unwraps a one-element list into a single interval.
    pub fn canonical(self) -> Self {
        match self {
            DaySpec::Multiple(mut intervals) if intervals.len() == 1 => {
                DaySpec::Single(intervals.remove(0))
            }
            other => other,
        }
    }
}

impl From<Interval> for DaySpec {
    fn from(interval: Interval) -> Self {
        DaySpec::Single(interval)
    }
}

impl From<((i32, i32), (i32, i32))> for DaySpec {
    fn from(pair: ((i32, i32), (i32, i32))) -> Self {
        DaySpec::Single(pair.into())
    }
}

impl From<Vec<Interval>> for DaySpec {
    fn from(intervals: Vec<Interval>) -> Self {
        DaySpec::Multiple(intervals)
    }
}

impl<const N: usize> From<[((i32, i32), (i32, i32)); N]> for DaySpec {
    fn from(pairs: [((i32, i32), (i32, i32)); N]) -> Self {
        DaySpec::Multiple(pairs.into_iter().map(Interval::from).collect())
    }
}

impl fmt::Display for DaySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.intervals().iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}
