//! IANA timezone resolution backed by `chrono-tz`.

use chrono_tz::Tz;
use log::debug;

use crate::error::{Result, ScheduleError};

/// Identifier used when no timezone is given explicitly.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Resolve an IANA timezone identifier such as `"Europe/Paris"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let tz = name
        .trim()
        .parse::<Tz>()
        .map_err(|_| ScheduleError::UnknownTimezone(name.to_string()))?;
    debug!("Resolved timezone '{}'", tz.name());
    Ok(tz)
}
