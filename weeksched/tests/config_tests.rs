//! Loading schedules from TOML configuration files.

use std::io::Write;

use tempfile::NamedTempFile;
use weeksched::config::CONFIG_ENV_VAR;
use weeksched::{Day, ScheduleConfig, ScheduleError};

mod support;
use support::{utc, with_scoped_env};

const OFFICE_HOURS: &str = r#"
timezone = "Europe/Paris"
holidays = ["2024-05-08"]

[days]
monday = [[7, 0], [20, 0]]
tuesday = [[7, 0], [20, 0]]
wednesday = [[7, 0], [20, 0]]
thursday = [[7, 0], [20, 0]]
friday = [[7, 0], [20, 0]]
saturday = [[[8, 0], [12, 0]], [[14, 0], [16, 0]]]
"#;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(OFFICE_HOURS);
    let config = ScheduleConfig::from_file(file.path()).unwrap();

    assert_eq!(config.timezone, "Europe/Paris");
    assert_eq!(config.holidays.len(), 1);
    assert_eq!(config.days.saturday.as_ref().map(|s| s.intervals().len()), Some(2));
    assert!(config.days.sunday.is_none());
}

#[test]
fn test_build_schedule_from_config() {
    let file = write_config(OFFICE_HOURS);
    let schedule = ScheduleConfig::from_file(file.path()).unwrap().build().unwrap();

    assert_eq!(schedule.timezone(), Some("Europe/Paris"));
    assert!(schedule.calendar().is_some());
    assert!(schedule.is_defined_for_day(Day::Saturday));
    assert!(!schedule.is_defined_for_day(Day::Sunday));

    // Tuesday 2024-05-07 06:30 UTC is 08:30 in Paris
    assert!(schedule.is_on_at(&utc(2024, 5, 7, 6, 30, 0)));
    // Wednesday 2024-05-08 is a holiday
    assert!(!schedule.is_on_at(&utc(2024, 5, 8, 8, 0, 0)));
    // Saturday 2024-05-11 12:30 Paris falls between the two slots
    assert!(!schedule.is_on_at(&utc(2024, 5, 11, 10, 30, 0)));
    assert!(schedule.is_on_at(&utc(2024, 5, 11, 12, 30, 0)));
}

#[test]
fn test_config_shift_start() {
    let config = ScheduleConfig::from_toml_str(
        r#"
        [shift_start]
        minutes = 30

        [days]
        monday = [[6, 0], [18, 0]]
        "#,
    )
    .unwrap();
    let schedule = config.build().unwrap();

    // 2022-02-14 is a Monday
    assert!(!schedule.is_on_at(&utc(2022, 2, 14, 6, 29, 0)));
    assert!(schedule.is_on_at(&utc(2022, 2, 14, 6, 30, 0)));
    assert!(schedule.is_on_at(&utc(2022, 2, 14, 17, 59, 0)));
}

#[test]
fn test_config_negative_shift_is_rejected() {
    let config = ScheduleConfig::from_toml_str(
        r#"
        [shift_start]
        hours = -1

        [days]
        monday = [[6, 0], [18, 0]]
        "#,
    )
    .unwrap();
    assert!(config.build().unwrap_err().is_invalid_argument());
}

#[test]
fn test_config_invalid_interval_is_rejected_at_build() {
    let config = ScheduleConfig::from_toml_str(
        r#"
        [days]
        monday = [[18, 0], [6, 0]]
        "#,
    )
    .unwrap();
    assert!(config.build().unwrap_err().is_invalid_argument());
}

#[test]
fn test_config_unknown_timezone() {
    let config = ScheduleConfig::from_toml_str(
        r#"
        timezone = "Moon/Tranquility"

        [days]
        monday = [[6, 0], [18, 0]]
        "#,
    )
    .unwrap();
    assert!(config.build().unwrap_err().is_unknown_timezone());
}

#[test]
fn test_missing_file() {
    let err = ScheduleConfig::from_file("/nonexistent/weeksched.toml").unwrap_err();
    assert!(matches!(err, ScheduleError::Config(_)));
}

#[test]
fn test_malformed_toml() {
    let file = write_config("timezone = ");
    let err = ScheduleConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ScheduleError::Config(_)));
}

#[test]
fn test_env_var_selects_file() {
    let file = write_config(OFFICE_HOURS);
    let path = file.path().to_str().expect("utf-8 temp path");

    let config = with_scoped_env(&[(CONFIG_ENV_VAR, Some(path))], ScheduleConfig::from_env_or_default)
        .unwrap();
    assert_eq!(config.timezone, "Europe/Paris");
}

#[test]
fn test_env_var_pointing_nowhere() {
    let result = with_scoped_env(
        &[(CONFIG_ENV_VAR, Some("/nonexistent/weeksched.toml"))],
        ScheduleConfig::from_env_or_default,
    );
    assert!(matches!(result, Err(ScheduleError::Config(_))));
}
