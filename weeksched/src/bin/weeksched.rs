//! Weekly schedule checker.
//!
//! Loads a schedule configuration, prints it and reports whether the schedule
//! is on at a given instant.
//!
//! # Usage
//!
//! ```bash
//! # Check the current time against ./weeksched.toml
//! cargo run --bin weeksched
//!
//! # Check a specific instant against a specific file
//! cargo run --bin weeksched -- config/office.toml 2024-05-08T10:00:00+02:00
//! ```
//!
//! # Environment Variables
//!
//! - `WEEKSCHED_CONFIG`: configuration file used when no path argument is given
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::Path;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use weeksched::ScheduleConfig;

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let mut args = env::args().skip(1);
    let config_arg = args.next();
    let instant_arg = args.next();

    let config = match config_arg.as_deref() {
        Some(path) => ScheduleConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load schedule from {}", path))?,
        None => ScheduleConfig::from_env_or_default().context("Failed to load schedule")?,
    };

    let schedule = config.build().context("Invalid schedule configuration")?;
    info!("Loaded {}", schedule);

    let (label, on) = match instant_arg {
        Some(instant) => {
            let on = schedule.is_on_at_str(&instant)?;
            (instant, on)
        }
        None => ("now".to_string(), schedule.is_on()),
    };

    println!("{}", schedule);
    println!("{}: {}", label, if on { "on" } else { "off" });

    Ok(())
}
