//! Summary statistics over the full note set.
//!
//! # Invariants
//! - `high + medium + low == total`.
//! - The recent window is measured back from query time, not from any
//!   record's creation time.

use crate::model::note::{Note, Priority};
use serde::{Deserialize, Serialize};

/// Trailing window for the weekly-new statistic: 7 days in milliseconds.
pub const RECENT_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Counts by priority bucket and recency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Notes created strictly after `now - RECENT_WINDOW_MS`.
    pub recent_week: usize,
}

impl NoteStats {
    /// Aggregates `notes` in a single pass relative to `now_ms`.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>, now_ms: i64) -> Self {
        let window_start = now_ms.saturating_sub(RECENT_WINDOW_MS);
        let mut stats = Self::default();
        for note in notes {
            stats.total += 1;
            match note.priority {
                Priority::High => stats.high += 1,
                Priority::Medium => stats.medium += 1,
                Priority::Low => stats.low += 1,
            }
            if note.timestamp > window_start {
                stats.recent_week += 1;
            }
        }
        stats
    }

    pub fn count_for(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStats, RECENT_WINDOW_MS};
    use crate::model::note::{Note, Priority};

    #[test]
    fn empty_input_yields_zeroes() {
        let stats = NoteStats::from_notes(&Vec::<Note>::new(), 1_000);
        assert_eq!(stats, NoteStats::default());
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let now = 10 * RECENT_WINDOW_MS;
        let notes = vec![
            Note::new("edge", "", Priority::Low, now - RECENT_WINDOW_MS),
            Note::new("inside", "", Priority::Medium, now - RECENT_WINDOW_MS + 1),
            Note::new("old", "", Priority::High, 0),
        ];

        let stats = NoteStats::from_notes(&notes, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.recent_week, 1);
        for priority in Priority::ALL {
            assert_eq!(stats.count_for(priority), 1);
        }
    }

    #[test]
    fn serializes_recent_week_in_camel_case() {
        let value = serde_json::to_value(NoteStats::default()).unwrap();
        assert_eq!(value["recentWeek"], 0);
    }
}
