//! Date source for streak tracking.

use chrono::{NaiveDate, Utc};

/// Provides "today" across the application so tests can pin the calendar.
pub trait Clock: Send + Sync {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. Dates are taken in UTC, matching the ISO date strings written to storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen on one date. Advance it manually with [`FixedClock::set`].
#[derive(Debug)]
pub struct FixedClock {
    date: std::sync::Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: std::sync::Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        if let Ok(mut guard) = self.date.lock() {
            *guard = date;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.date.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_moves_only_when_set() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let clock = FixedClock::new(d);
        assert_eq!(clock.today(), d);
        let next = d.succ_opt().unwrap();
        clock.set(next);
        assert_eq!(clock.today(), next);
    }
}
