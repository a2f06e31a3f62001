//! Pure streak transition logic.
//!
//! `StreakEngine` computes the next record state for one user given the
//! previous record (if any) and the current wall-clock time. It performs
//! no I/O and takes no locks; serialization and persistence are the
//! caller's job (see [`crate::access`] and [`crate::service`]).

use crate::calendar;
use crate::types::{Outcome, StreakRecord, Timestamp};
use chrono::FixedOffset;
use tracing::warn;

/// Computes streak transitions against a fixed reference zone.
#[derive(Clone, Copy, Debug)]
pub struct StreakEngine {
    zone: FixedOffset,
}

impl StreakEngine {
    pub fn new(zone: FixedOffset) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Apply one qualifying message to a user's record.
    ///
    /// Decisions are made on the calendar-day difference in the reference
    /// zone, not on elapsed hours:
    /// - no prior record: streak starts at 1
    /// - same day: unchanged (the returned record must not be persisted;
    ///   see [`Outcome::mutates_state`])
    /// - next day: streak + 1
    /// - gap of more than one day: streak back to 1
    /// - negative difference (clock moved backward or a corrupted
    ///   timestamp): treated as already-counted, never decremented
    ///
    /// The display name is refreshed on every call regardless of outcome.
    pub fn apply(
        &self,
        prev: Option<&StreakRecord>,
        display_name: &str,
        now: Timestamp,
    ) -> (StreakRecord, Outcome) {
        let prev = match prev {
            Some(record) => record,
            None => {
                let record = StreakRecord {
                    display_name: display_name.to_string(),
                    last_message: now,
                    streak: 1,
                };
                return (record, Outcome::FirstTime);
            }
        };

        let diff = calendar::days_between(prev.last_message, now, self.zone);

        if diff < 0 {
            warn!(
                last_message = %prev.last_message,
                now = %now,
                days = diff,
                "clock moved backward relative to stored timestamp; ignoring"
            );
        }

        match diff {
            d if d <= 0 => {
                let record = StreakRecord {
                    display_name: display_name.to_string(),
                    ..prev.clone()
                };
                (record, Outcome::AlreadyCountedToday)
            }
            1 => {
                let streak = prev.streak + 1;
                let record = StreakRecord {
                    display_name: display_name.to_string(),
                    last_message: now,
                    streak,
                };
                (record, Outcome::Incremented(streak))
            }
            d => {
                let record = StreakRecord {
                    display_name: display_name.to_string(),
                    last_message: now,
                    streak: 1,
                };
                (record, Outcome::Reset { missed_days: d })
            }
        }
    }
}
