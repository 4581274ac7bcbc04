//! Dense minute-resolution occupancy grid for one week.
//!
//! The grid is a flat boolean array of `7 * 24 * 60` cells indexed by
//! `day * 1440 + hour * 60 + minute`. Every set-algebra operation on schedules
//! (inversion, shifting) is a cell-wise pass over this array.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::error::{Result, ScheduleError};

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;
pub const MINUTES_PER_HOUR: usize = 60;
pub const MINUTES_PER_DAY: usize = HOURS_PER_DAY * MINUTES_PER_HOUR;
pub const MINUTES_PER_WEEK: usize = DAYS_PER_WEEK * MINUTES_PER_DAY;

/// One day's occupancy, `MINUTES_PER_DAY` cells long.
pub type DayVector = Vec<bool>;

/// Weekly occupancy grid of shape (7, 24, 60).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MinuteGrid {
    cells: Box<[bool]>,
}

impl MinuteGrid {
    /// All-false grid.
    pub fn empty() -> Self {
        Self::filled(false)
    }

    /// All-true grid.
    pub fn full() -> Self {
        Self::filled(true)
    }

    pub fn filled(value: bool) -> Self {
        Self {
            cells: vec![value; MINUTES_PER_WEEK].into_boxed_slice(),
        }
    }

    /// Build from a flat slice, which must hold exactly `MINUTES_PER_WEEK` cells.
    pub fn from_flat(cells: &[bool]) -> Result<Self> {
        if cells.len() != MINUTES_PER_WEEK {
            return Err(ScheduleError::invalid(format!(
                "weekly schedule should have {} cells, got {}",
                MINUTES_PER_WEEK,
                cells.len()
            )));
        }
        Ok(Self {
            cells: cells.into(),
        })
    }

    /// Build from a nested `[day][hour][minute]` array, which must be exactly 7x24x60.
    pub fn from_nested(nested: &[Vec<Vec<bool>>]) -> Result<Self> {
        let shape_error = || ScheduleError::invalid("weekly schedule should be a 7x24x60 matrix");

        if nested.len() != DAYS_PER_WEEK {
            return Err(shape_error());
        }
        let mut cells = Vec::with_capacity(MINUTES_PER_WEEK);
        for hours in nested {
            if hours.len() != HOURS_PER_DAY {
                return Err(shape_error());
            }
            for minutes in hours {
                if minutes.len() != MINUTES_PER_HOUR {
                    return Err(shape_error());
                }
                cells.extend_from_slice(minutes);
            }
        }
        Self::from_flat(&cells)
    }

    /// Build from a nested array of 0/1 integers, rejecting any other value.
    pub fn from_nested_bits(nested: &[Vec<Vec<u8>>]) -> Result<Self> {
        let mut converted = Vec::with_capacity(nested.len());
        for hours in nested {
            let mut day = Vec::with_capacity(hours.len());
            for minutes in hours {
                let row = minutes
                    .iter()
                    .map(|&v| match v {
                        0 => Ok(false),
                        1 => Ok(true),
                        other => Err(ScheduleError::invalid(format!(
                            "weekly schedule should only hold 0 or 1, got {}",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<bool>>>()?;
                day.push(row);
            }
            converted.push(day);
        }
        Self::from_nested(&converted)
    }

    /// Nested `[day][hour][minute]` copy of the grid.
    pub fn to_nested(&self) -> Vec<Vec<Vec<bool>>> {
        self.cells
            .chunks(MINUTES_PER_DAY)
            .map(|day| day.chunks(MINUTES_PER_HOUR).map(|h| h.to_vec()).collect())
            .collect()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Cell value at `day`, `hour`, `minute`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range (day 0-6, hour 0-23, minute 0-59).
    pub fn get(&self, day: usize, hour: usize, minute: usize) -> bool {
        self.cells[Self::index(day, hour, minute)]
    }

    /// Set one cell. Panics on out-of-range coordinates, like [`MinuteGrid::get`].
    pub fn set(&mut self, day: usize, hour: usize, minute: usize, value: bool) {
        self.cells[Self::index(day, hour, minute)] = value;
    }

    #[inline]
    fn index(day: usize, hour: usize, minute: usize) -> usize {
        assert!(
            day < DAYS_PER_WEEK && hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR,
            "cell ({}, {}, {}) is outside the weekly grid",
            day,
            hour,
            minute
        );
        day * MINUTES_PER_DAY + hour * MINUTES_PER_HOUR + minute
    }

    pub fn day(&self, day: usize) -> &[bool] {
        let start = day * MINUTES_PER_DAY;
        &self.cells[start..start + MINUTES_PER_DAY]
    }

    pub fn day_mut(&mut self, day: usize) -> &mut [bool] {
        let start = day * MINUTES_PER_DAY;
        &mut self.cells[start..start + MINUTES_PER_DAY]
    }

    /// Replace one day's cells.
    pub fn set_day(&mut self, day: usize, vector: &[bool]) -> Result<()> {
        if vector.len() != MINUTES_PER_DAY {
            return Err(ScheduleError::invalid(format!(
                "day schedule should have {} cells, got {}",
                MINUTES_PER_DAY,
                vector.len()
            )));
        }
        self.day_mut(day).copy_from_slice(vector);
        Ok(())
    }

    pub fn all(&self) -> bool {
        self.cells.iter().all(|&c| c)
    }

    pub fn any(&self) -> bool {
        self.cells.iter().any(|&c| c)
    }

    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Delay the start of every true run by `minutes`, keeping each run's end.
    ///
    /// Each day is processed independently: the day vector is ANDed with a copy
    /// of itself delayed by `minutes`. Runs no longer than `minutes` disappear,
    /// and a delay of a full day or more clears the day.
    pub fn shift_start(&mut self, minutes: usize) {
        if minutes == 0 {
            return;
        }
        *self = &*self & &self.delayed(minutes);
    }

    /// Copy of the grid where each day's cells move `minutes` later, with the
    /// first `minutes` cells of every day off.
    fn delayed(&self, minutes: usize) -> MinuteGrid {
        let mut delayed = MinuteGrid::empty();
        if minutes >= MINUTES_PER_DAY {
            return delayed;
        }
        for day in 0..DAYS_PER_WEEK {
            delayed.day_mut(day)[minutes..]
                .copy_from_slice(&self.day(day)[..MINUTES_PER_DAY - minutes]);
        }
        delayed
    }
}

impl Default for MinuteGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for MinuteGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinuteGrid")
            .field("minutes_on", &self.count_on())
            .finish()
    }
}

impl Not for &MinuteGrid {
    type Output = MinuteGrid;

    fn not(self) -> MinuteGrid {
        MinuteGrid {
            cells: self.cells.iter().map(|&c| !c).collect(),
        }
    }
}

impl BitAnd for &MinuteGrid {
    type Output = MinuteGrid;

    fn bitand(self, rhs: &MinuteGrid) -> MinuteGrid {
        MinuteGrid {
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(&a, &b)| a && b)
                .collect(),
        }
    }
}

impl BitOr for &MinuteGrid {
    type Output = MinuteGrid;

    fn bitor(self, rhs: &MinuteGrid) -> MinuteGrid {
        MinuteGrid {
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(&a, &b)| a || b)
                .collect(),
        }
    }
}
