use chrono::{Local, NaiveDate};
use parking_lot::RwLock;

/// Source of "today" for date rules (future certificates, reference-level locks)
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.write() = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.read()
    }
}
