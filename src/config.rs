//! Tracker configuration.

use chrono::{Duration, FixedOffset};
use std::path::PathBuf;

/// Configuration for the streak tracker core.
///
/// The bot credential and target group identifier belong to the chat
/// gateway, not to this crate.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    /// Location of the persisted state file.
    pub state_path: PathBuf,

    /// Fixed reference zone for calendar-day decisions.
    pub zone: FixedOffset,

    /// Elapsed-time threshold for inactivity warnings.
    pub inactivity_threshold: Duration,

    /// How often the inactivity sweep runs.
    pub sweep_interval: std::time::Duration,

    /// Number of rows in the leaderboard response.
    pub leaderboard_size: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("./streaks.json"),
            // UTC+5:30; the zone has no DST, so a fixed offset is exact.
            zone: FixedOffset::east_opt(5 * 3600 + 1800).expect("offset in range"),
            inactivity_threshold: Duration::hours(24),
            sweep_interval: std::time::Duration::from_secs(6 * 3600),
            leaderboard_size: 5,
        }
    }
}
