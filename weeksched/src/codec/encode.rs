use log::trace;

use crate::error::{Result, ScheduleError};
use crate::grid::{DayVector, MinuteGrid, MINUTES_PER_DAY};
use crate::models::{CompactSchedule, Day, DaySpec};

/// Transform a day specification into a vector of 1440 one-minute cells.
///
/// Every interval marks `[start, end)` as on. Overlapping intervals simply
/// merge. An empty interval list is rejected.
pub fn encode_day(spec: &DaySpec) -> Result<DayVector> {
    let intervals = spec.intervals();
    if intervals.is_empty() {
        return Err(ScheduleError::invalid(
            "invalid day schedule format, expected one interval or a list of intervals",
        ));
    }

    let mut cells = vec![false; MINUTES_PER_DAY];
    for interval in intervals {
        let range = interval.minute_range()?;
        cells[range].fill(true);
    }
    Ok(cells)
}

/// Transform a compact weekly schedule into a dense grid.
pub fn encode_schedule(schedule: &CompactSchedule) -> Result<MinuteGrid> {
    let mut grid = MinuteGrid::empty();
    for (&day, spec) in schedule {
        let day = Day::try_from(day)?;
        let cells = encode_day(spec)?;
        trace!("Encoded {} as {} minutes", day, cells.iter().filter(|&&c| c).count());
        grid.set_day(day.index(), &cells)?;
    }
    Ok(grid)
}
