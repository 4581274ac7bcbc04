//! Working-day predicates.
//!
//! A schedule may carry one [`WorkingDayCalendar`]. Any closure taking the local
//! date-time and returning a boolean is a calendar; richer calendar services only
//! need to implement the single method.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

/// Decides whether a local date-time falls on a working day.
pub trait WorkingDayCalendar: Send + Sync {
    fn is_working_day(&self, local: &NaiveDateTime) -> bool;
}

impl<F> WorkingDayCalendar for F
where
    F: Fn(&NaiveDateTime) -> bool + Send + Sync,
{
    fn is_working_day(&self, local: &NaiveDateTime) -> bool {
        self(local)
    }
}

/// Shared handle to a calendar.
///
/// Equality is identity: two handles are equal only when they point to the same
/// calendar instance. Cloning shares the instance.
#[derive(Clone)]
pub struct CalendarHandle(Arc<dyn WorkingDayCalendar>);

impl CalendarHandle {
    pub fn new<C: WorkingDayCalendar + 'static>(calendar: C) -> Self {
        Self(Arc::new(calendar))
    }

    pub fn from_arc(calendar: Arc<dyn WorkingDayCalendar>) -> Self {
        Self(calendar)
    }

    pub fn is_working_day(&self, local: &NaiveDateTime) -> bool {
        self.0.is_working_day(local)
    }
}

impl PartialEq for CalendarHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CalendarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalendarHandle({:p})", Arc::as_ptr(&self.0))
    }
}

/// Calendar treating a fixed set of dates as non-working.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayDates {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayDates {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl WorkingDayCalendar for HolidayDates {
    fn is_working_day(&self, local: &NaiveDateTime) -> bool {
        !self.contains(local.date())
    }
}
