use chrono::{Local, NaiveDate};

/// Source of "today" for [`Effect::ResolveToday`](crate::application::Effect).
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always answers with the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(today)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
