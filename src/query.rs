//! Read-only queries over the streak state.

use crate::access::AccessSerializer;
use crate::error::Result;
use crate::types::{LeaderboardEntry, StreakState, UserId};
use std::sync::Arc;

/// Read-only operations built on the access gate.
pub struct QueryService {
    access: Arc<AccessSerializer>,
}

impl QueryService {
    pub fn new(access: Arc<AccessSerializer>) -> Self {
        Self { access }
    }

    /// Current streak for a user, 0 when no record exists.
    pub fn streak_of(&self, user: &UserId) -> Result<u32> {
        self.access
            .with_read(|state| state.get(user).map(|r| r.streak).unwrap_or(0))
    }

    /// Top `n` users by streak, descending. Ties break by ascending user
    /// id so repeated calls over unchanged data produce identical output.
    pub fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>> {
        self.access.with_read(|state| leaderboard(state, n))
    }
}

/// Deterministic leaderboard over a state snapshot.
pub fn leaderboard(state: &StreakState, n: usize) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = state
        .iter()
        .map(|(user_id, record)| LeaderboardEntry {
            user_id: user_id.clone(),
            display_name: record.display_name.clone(),
            streak: record.streak,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.streak
            .cmp(&a.streak)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    entries.truncate(n);
    entries
}
