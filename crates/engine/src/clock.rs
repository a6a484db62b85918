use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Source of "today" for newly created invoices.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in a fixed reference timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZonedClock {
    timezone: Tz,
}

impl ZonedClock {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn utc() -> Self {
        Self::new(Tz::UTC)
    }
}

impl Default for ZonedClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
