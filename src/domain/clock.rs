//! Source of "today" for date-sensitive computations
//!
//! Streaks, analytics windows and "today" lookups all read the calendar day
//! from a `Clock` so tests can pin the date.

use chrono::{NaiveDate, Utc};

/// Provides the current calendar day
pub trait Clock: Send + Sync {
    /// The current calendar day
    fn today(&self) -> NaiveDate;
}

/// Wall clock using the UTC day boundary
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock frozen on a single day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
