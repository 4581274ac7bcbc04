use crate::grid::{MinuteGrid, DAYS_PER_WEEK, MINUTES_PER_DAY};
use crate::models::{ClockTime, CompactSchedule, DaySpec, Interval};

/// Transform one day of minute cells back into its compact specification.
///
/// Returns `None` for a day without any on cell. A fully-on day is rendered as
/// `00:00-24:00`, and a day with one run is rendered as a single interval
/// rather than a one-element list.
pub fn decode_day(cells: &[bool]) -> Option<DaySpec> {
    debug_assert_eq!(cells.len(), MINUTES_PER_DAY);

    if cells.iter().all(|&c| c) {
        return Some(DaySpec::full_day());
    }
    if !cells.iter().any(|&c| c) {
        return None;
    }

    // edges where a cell differs from its predecessor; index 0 has no predecessor
    let mut edges: Vec<usize> = Vec::new();
    if cells[0] {
        edges.push(0);
    }
    edges.extend((1..cells.len()).filter(|&i| cells[i] != cells[i - 1]));
    if cells[cells.len() - 1] {
        edges.push(MINUTES_PER_DAY);
    }
    debug_assert!(edges.len() % 2 == 0, "edges must alternate start/end");

    let intervals: Vec<Interval> = edges
        .chunks_exact(2)
        .map(|pair| {
            Interval::new(
                ClockTime::from_minute_index(pair[0]),
                ClockTime::from_minute_index(pair[1]),
            )
        })
        .collect();

    Some(DaySpec::Multiple(intervals).canonical())
}

/// Transform a dense grid into a compact weekly schedule, omitting empty days.
pub fn decode_schedule(grid: &MinuteGrid) -> CompactSchedule {
    if grid.all() {
        return (0..DAYS_PER_WEEK as u8)
            .map(|day| (day, DaySpec::full_day()))
            .collect();
    }
    if !grid.any() {
        return CompactSchedule::new();
    }

    (0..DAYS_PER_WEEK)
        .filter_map(|day| decode_day(grid.day(day)).map(|spec| (day as u8, spec)))
        .collect()
}
