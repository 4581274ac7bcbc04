use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weeksched::codec::{decode_schedule, encode_schedule};
use weeksched::{CompactSchedule, DaySpec, WeeklySchedule};

fn office_hours() -> CompactSchedule {
    let mut compact = CompactSchedule::new();
    for day in 0..5 {
        compact.insert(day, DaySpec::from(((7, 0), (20, 0))));
    }
    compact.insert(5, DaySpec::from([((8, 0), (12, 0)), ((14, 0), (16, 0))]));
    compact
}

fn bench_is_on_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let start = Utc.with_ymd_and_hms(2024, 3, 25, 0, 0, 0).unwrap();
    let instants: Vec<_> = (0..1000).map(|i| start + Duration::minutes(i * 10)).collect();

    for tz in ["UTC", "Europe/Paris"] {
        let schedule = WeeklySchedule::from_raw(office_hours(), tz).unwrap();
        group.bench_with_input(BenchmarkId::new("is_on_at", tz), &schedule, |b, schedule| {
            b.iter(|| {
                for instant in &instants {
                    black_box(schedule.is_on_at(black_box(instant)));
                }
            });
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let compact = office_hours();
    group.bench_function("encode_schedule", |b| {
        b.iter(|| encode_schedule(black_box(&compact)));
    });

    let grid = encode_schedule(&compact).unwrap();
    group.bench_function("decode_schedule", |b| {
        b.iter(|| decode_schedule(black_box(&grid)));
    });

    group.finish();
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");

    let schedule = WeeklySchedule::from_raw(office_hours(), "UTC").unwrap();
    group.bench_function("invert", |b| {
        b.iter(|| WeeklySchedule::invert(black_box(&schedule)));
    });

    group.bench_function("shift_start_1h", |b| {
        b.iter(|| black_box(schedule.clone()).shift_start(1, 0));
    });

    group.finish();
}

criterion_group!(benches, bench_is_on_at, bench_codec, bench_transforms);
criterion_main!(benches);
