//! Core types for the streak tracker.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque stable identifier for a chat user (string form of the platform id).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

/// Zone-aware wall-clock timestamp. Serializes as RFC 3339 with offset.
pub type Timestamp = DateTime<FixedOffset>;

/// Current wall-clock time expressed in the given reference zone.
pub fn now_in(zone: FixedOffset) -> Timestamp {
    Utc::now().with_timezone(&zone)
}

/// Per-user streak record.
///
/// `streak` is at least 1 once the record exists; a lapse resets it to 1
/// rather than deleting the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreakRecord {
    /// Last-observed human-readable name. Updated opportunistically,
    /// not authoritative.
    #[serde(rename = "name")]
    pub display_name: String,

    /// Timestamp of the most recent qualifying message.
    /// Monotonically non-decreasing per user.
    #[serde(rename = "last_message")]
    pub last_message: Timestamp,

    /// Count of consecutive calendar days with qualifying activity.
    pub streak: u32,
}

/// The full collection of streak records, keyed by user id.
///
/// Persisted as a single JSON object. Loaded fresh before every logical
/// operation and saved fresh after every mutating one; the store is the
/// single source of truth.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreakState(pub HashMap<UserId, StreakRecord>);

impl StreakState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: &UserId) -> Option<&StreakRecord> {
        self.0.get(user)
    }

    pub fn insert(&mut self, user: UserId, record: StreakRecord) {
        self.0.insert(user, record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &StreakRecord)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of applying one event to a user's record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// First qualifying message ever; record created with streak 1.
    FirstTime,
    /// The user already messaged today; nothing to persist or re-notify.
    AlreadyCountedToday,
    /// Consecutive-day activity; carries the new streak value.
    Incremented(u32),
    /// Gap of more than one calendar day; streak restarted at 1.
    Reset { missed_days: i64 },
}

impl Outcome {
    /// Whether this outcome changed the record and must be persisted.
    pub fn mutates_state(&self) -> bool {
        !matches!(self, Outcome::AlreadyCountedToday)
    }
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub display_name: String,
    pub streak: u32,
}
