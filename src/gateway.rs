//! The seam between the tracker core and the chat platform.
//!
//! The chat client, command dispatch, mention formatting and message
//! templating all live outside this crate. The core consumes
//! [`InboundEvent`]s, produces structured [`Response`]s, and pushes
//! [`InactivityWarning`]s through the [`ChatGateway`] trait; turning any
//! of these into platform messages is the gateway implementor's job.

use crate::error::Result;
use crate::types::{LeaderboardEntry, UserId};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Query-style commands. Commands are never streak-qualifying activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Welcome a user and report their current streak.
    Start,
    /// Report the caller's current streak.
    Streak,
    /// Show the leaderboard.
    Top,
    /// List available commands.
    Help,
}

/// An event delivered by the chat gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// A command invocation. Read-only; never touches streak state.
    Command {
        command: Command,
        user_id: UserId,
        display_name: String,
    },
    /// A qualifying (non-command) text message in the tracked group.
    TextMessage {
        user_id: UserId,
        display_name: String,
    },
}

/// Structured response handed back to the gateway, one per inbound event.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// First qualifying message ever; streak started at 1.
    StreakStarted { user_id: UserId, display_name: String },
    /// Consecutive-day activity.
    StreakExtended {
        user_id: UserId,
        display_name: String,
        streak: u32,
    },
    /// Missed one or more days; streak restarted at 1.
    StreakReset {
        user_id: UserId,
        display_name: String,
        missed_days: i64,
    },
    /// The user already messaged today; nothing changed.
    AlreadyCounted { user_id: UserId },
    /// Streak report for a command. 0 means no record yet.
    CurrentStreak {
        user_id: UserId,
        display_name: String,
        streak: u32,
    },
    /// Leaderboard rows, highest streak first.
    Leaderboard(Vec<LeaderboardEntry>),
    /// Command listing.
    Help,
}

/// A user past the inactivity threshold, eligible for a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InactivityWarning {
    pub user_id: UserId,
    pub display_name: String,
    /// Elapsed wall-clock time since the user's last qualifying message.
    pub inactive_for: Duration,
}

/// Outbound delivery to the chat platform.
///
/// Implementations send to the configured group channel. A failed send
/// returns [`crate::StreakError::Delivery`]; the caller isolates failures
/// per recipient.
pub trait ChatGateway: Send + Sync {
    fn send_warning(&self, warning: &InactivityWarning) -> Result<()>;
}
