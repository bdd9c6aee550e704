//! Daily study streak.
//!
//! The streak advances when a task is added. It grows by one when the
//! previous add day falls inside the "yesterday" window, stays put when it
//! was already counted today, and restarts at one otherwise.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Persisted streak record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub count: u32,
    pub last_date: Option<NaiveDate>,
}

/// What an [`StreakState::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Today was already counted.
    AlreadyCounted,
    /// Consecutive day, count grew by one.
    Extended,
    /// First add, or the chain was broken. Count is one.
    Restarted,
}

/// Indicator glyph for the streak box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakGlyph {
    Idle,
    Spark,
    Fire,
}

impl StreakGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            StreakGlyph::Idle => "💤",
            StreakGlyph::Spark => "⚡",
            StreakGlyph::Fire => "🔥",
        }
    }
}

/// Presentation of the streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakView {
    pub count: u32,
    pub glyph: StreakGlyph,
    pub hot: bool,
    pub message: String,
}

/// True when `today` is within `(0, tolerance]` after `prev`.
pub fn is_yesterday(prev: NaiveDate, today: NaiveDate, tolerance: Duration) -> bool {
    let gap = today.signed_duration_since(prev);
    gap > Duration::zero() && gap <= tolerance
}

impl StreakState {
    /// Record a study day.
    pub fn advance(&mut self, today: NaiveDate, tolerance: Duration) -> StreakChange {
        if self.last_date == Some(today) {
            return StreakChange::AlreadyCounted;
        }

        let change = match self.last_date {
            Some(prev) if is_yesterday(prev, today, tolerance) => {
                self.count = self.count.saturating_add(1);
                StreakChange::Extended
            }
            _ => {
                self.count = 1;
                StreakChange::Restarted
            }
        };
        self.last_date = Some(today);
        tracing::info!(count = self.count, ?change, %today, "streak advanced");
        change
    }

    /// Indicator text and glyph. `hot_threshold` is the count at which the streak runs hot.
    pub fn view(&self, hot_threshold: u32) -> StreakView {
        let (glyph, hot, message) = match self.count {
            0 => (
                StreakGlyph::Idle,
                false,
                "No streak yet. Add a topic to start!".to_string(),
            ),
            n => {
                let hot = n >= hot_threshold;
                let glyph = if hot { StreakGlyph::Fire } else { StreakGlyph::Spark };
                let message = if n == 1 {
                    "Nice! You're on a 1-day study streak.".to_string()
                } else {
                    format!("🔥 You're on a {n}-day study streak!")
                };
                (glyph, hot, message)
            }
        };
        StreakView {
            count: self.count,
            glyph,
            hot,
            message,
        }
    }
}
