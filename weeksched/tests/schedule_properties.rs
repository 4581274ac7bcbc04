//! Property-based tests for the compact format and grid transformations.

use proptest::prelude::*;
use weeksched::codec::{decode_schedule, encode_schedule};
use weeksched::{CompactSchedule, DaySpec, Interval, MinuteGrid, WeeklySchedule};

/// Disjoint, non-adjacent intervals within one day, as minute offsets.
fn day_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::btree_set(0usize..=1440, 2..=8).prop_map(|cuts| {
        let cuts: Vec<usize> = cuts.into_iter().collect();
        cuts.chunks_exact(2)
            .map(|pair| {
                Interval::new(
                    ((pair[0] / 60) as i32, (pair[0] % 60) as i32),
                    ((pair[1] / 60) as i32, (pair[1] % 60) as i32),
                )
            })
            .collect()
    })
}

fn compact_schedule() -> impl Strategy<Value = CompactSchedule> {
    prop::collection::btree_map(0u8..7, day_intervals(), 1..=7).prop_map(|days| {
        days.into_iter()
            .filter(|(_, intervals)| !intervals.is_empty())
            .map(|(day, intervals)| (day, DaySpec::Multiple(intervals).canonical()))
            .collect()
    })
}

fn adjacent_runs_merge(schedule: &CompactSchedule) -> bool {
    schedule.values().any(|spec| {
        spec.intervals()
            .windows(2)
            .any(|w| w[0].end == w[1].start)
    })
}

proptest! {
    #[test]
    fn prop_compact_round_trip(schedule in compact_schedule()) {
        prop_assume!(!schedule.is_empty());
        prop_assume!(!adjacent_runs_merge(&schedule));

        let built = WeeklySchedule::from_raw(schedule.clone(), "UTC").unwrap();
        let expected: CompactSchedule = if built.schedule().all() {
            (0..7).map(|d| (d, DaySpec::full_day())).collect()
        } else {
            schedule
        };
        prop_assert_eq!(built.format_schedule(), expected);
    }

    #[test]
    fn prop_decode_then_encode_is_identity(cells in prop::collection::vec(any::<bool>(), 7 * 1440)) {
        let grid = MinuteGrid::from_flat(&cells).unwrap();
        let decoded = decode_schedule(&grid);
        let encoded = encode_schedule(&decoded).unwrap();
        prop_assert_eq!(encoded, grid);
    }

    #[test]
    fn prop_double_inversion(schedule in compact_schedule()) {
        prop_assume!(!schedule.is_empty());
        let built = WeeklySchedule::from_raw(schedule, "Europe/Paris").unwrap();
        let twice = WeeklySchedule::invert(&WeeklySchedule::invert(&built));
        prop_assert_eq!(twice, built);
    }

    #[test]
    fn prop_shift_never_adds_minutes(schedule in compact_schedule(), minutes in 0i64..3000) {
        prop_assume!(!schedule.is_empty());
        let built = WeeklySchedule::from_raw(schedule, "UTC").unwrap();
        let shifted = built.clone().shift_start(0, minutes).unwrap();
        let before = built.schedule().as_slice();
        let after = shifted.schedule().as_slice();
        prop_assert!(after.iter().zip(before).all(|(&a, &b)| !a || b));
        if minutes >= 1440 {
            prop_assert!(!shifted.schedule().any());
        }
        if minutes == 0 {
            prop_assert_eq!(shifted, built);
        }
    }
}
