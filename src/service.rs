//! The event-handling facade.
//!
//! `StreakService` ties the engine, the access gate and the store
//! together. Commands are read-only; only a qualifying text message goes
//! through the engine's read-modify-write path. The gate is always
//! released before a response leaves this crate, so a slow gateway send
//! can never stall other users' messages.

use crate::access::{AccessSerializer, Commit};
use crate::config::TrackerConfig;
use crate::engine::StreakEngine;
use crate::error::Result;
use crate::gateway::{Command, InboundEvent, Response};
use crate::notify::InactivityNotifier;
use crate::query::{self, QueryService};
use crate::store::StateStore;
use crate::types::{now_in, Outcome, Timestamp, UserId};
use std::sync::Arc;
use tracing::debug;

/// Streak tracking over a file-backed state collection.
pub struct StreakService {
    config: TrackerConfig,
    engine: StreakEngine,
    access: Arc<AccessSerializer>,
}

impl StreakService {
    /// Open the service against the configured state file.
    pub fn open(config: TrackerConfig) -> Result<Self> {
        let store = StateStore::open(config.state_path.clone())?;
        let access = Arc::new(AccessSerializer::new(store));
        let engine = StreakEngine::new(config.zone);

        Ok(Self {
            config,
            engine,
            access,
        })
    }

    /// Handle one inbound event at the current wall-clock time.
    pub fn handle_event(&self, event: InboundEvent) -> Result<Response> {
        self.handle_event_at(event, now_in(self.config.zone))
    }

    /// Handle one inbound event at an explicit time. Exposed for tests
    /// and replay.
    pub fn handle_event_at(&self, event: InboundEvent, now: Timestamp) -> Result<Response> {
        match event {
            InboundEvent::TextMessage {
                user_id,
                display_name,
            } => self.handle_message(user_id, display_name, now),
            InboundEvent::Command {
                command,
                user_id,
                display_name,
            } => self.handle_command(command, user_id, display_name),
        }
    }

    /// Read-only query surface sharing this service's gate.
    pub fn queries(&self) -> QueryService {
        QueryService::new(Arc::clone(&self.access))
    }

    /// Inactivity notifier sharing this service's gate.
    pub fn notifier(&self) -> InactivityNotifier {
        InactivityNotifier::new(
            Arc::clone(&self.access),
            self.config.zone,
            self.config.inactivity_threshold,
        )
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn handle_message(
        &self,
        user_id: UserId,
        display_name: String,
        now: Timestamp,
    ) -> Result<Response> {
        let engine = self.engine;
        let outcome = self.access.with_exclusive(|state| {
            let (record, outcome) = engine.apply(state.get(&user_id), &display_name, now);
            if outcome.mutates_state() {
                state.insert(user_id.clone(), record);
                (Commit::Persist, outcome)
            } else {
                (Commit::Discard, outcome)
            }
        })?;

        debug!(user = %user_id, ?outcome, "message handled");

        let response = match outcome {
            Outcome::FirstTime => Response::StreakStarted {
                user_id,
                display_name,
            },
            Outcome::Incremented(streak) => Response::StreakExtended {
                user_id,
                display_name,
                streak,
            },
            Outcome::Reset { missed_days } => Response::StreakReset {
                user_id,
                display_name,
                missed_days,
            },
            Outcome::AlreadyCountedToday => Response::AlreadyCounted { user_id },
        };
        Ok(response)
    }

    fn handle_command(
        &self,
        command: Command,
        user_id: UserId,
        display_name: String,
    ) -> Result<Response> {
        match command {
            Command::Start | Command::Streak => {
                let streak = self
                    .access
                    .with_read(|state| state.get(&user_id).map(|r| r.streak).unwrap_or(0))?;
                Ok(Response::CurrentStreak {
                    user_id,
                    display_name,
                    streak,
                })
            }
            Command::Top => {
                let n = self.config.leaderboard_size;
                let entries = self.access.with_read(|state| query::leaderboard(state, n))?;
                Ok(Response::Leaderboard(entries))
            }
            Command::Help => Ok(Response::Help),
        }
    }
}
