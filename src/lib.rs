//! # Daystreak
//!
//! Per-user daily messaging streaks for a group chat, backed by a single
//! JSON state file.
//!
//! ## Core Concepts
//!
//! - **Engine**: pure calendar-day streak transitions (start, extend,
//!   reset, same-day no-op)
//! - **Access gate**: one mutual-exclusion read-modify-write path over the
//!   whole collection
//! - **Store**: atomic whole-file persistence; a missing file is an empty
//!   collection
//! - **Sweep**: periodic read-only scan that warns users past the
//!   inactivity threshold
//!
//! ## Example
//!
//! ```ignore
//! use daystreak::{InboundEvent, StreakService, TrackerConfig, UserId};
//!
//! let service = StreakService::open(TrackerConfig {
//!     state_path: "./streaks.json".into(),
//!     ..Default::default()
//! })?;
//!
//! // A qualifying message extends or starts the sender's streak.
//! let response = service.handle_event(InboundEvent::TextMessage {
//!     user_id: UserId::from("42"),
//!     display_name: "Asha".into(),
//! })?;
//!
//! // Read-only queries share the same gate.
//! let top = service.queries().top_n(5)?;
//! ```

pub mod access;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod query;
pub mod service;
pub mod store;
pub mod sweep;
pub mod types;

// Re-exports
pub use access::{AccessSerializer, Commit};
pub use config::TrackerConfig;
pub use engine::StreakEngine;
pub use error::{Result, StreakError};
pub use gateway::{ChatGateway, Command, InactivityWarning, InboundEvent, Response};
pub use notify::InactivityNotifier;
pub use query::QueryService;
pub use service::StreakService;
pub use store::StateStore;
pub use sweep::SweepScheduler;
pub use types::{now_in, LeaderboardEntry, Outcome, StreakRecord, StreakState, Timestamp, UserId};
