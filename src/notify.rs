//! Periodic inactivity sweep.
//!
//! The sweep is read-only: it never mutates state and never resets a
//! streak. A streak only resets when the user's next qualifying message
//! goes through the engine.

use crate::access::AccessSerializer;
use crate::error::Result;
use crate::gateway::{ChatGateway, InactivityWarning};
use crate::types::{now_in, Timestamp};
use chrono::{Duration, FixedOffset};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies users past the warning threshold and delivers warnings.
pub struct InactivityNotifier {
    access: Arc<AccessSerializer>,
    zone: FixedOffset,

    /// Elapsed-time threshold (wall-clock, not calendar days).
    threshold: Duration,
}

impl InactivityNotifier {
    pub fn new(access: Arc<AccessSerializer>, zone: FixedOffset, threshold: Duration) -> Self {
        Self {
            access,
            zone,
            threshold,
        }
    }

    /// Snapshot-read the collection and return every warning-eligible
    /// user: those whose last message is strictly more than the threshold
    /// ago. The gate is released before this returns, so delivery never
    /// blocks other callers.
    pub fn sweep_at(&self, now: Timestamp) -> Result<Vec<InactivityWarning>> {
        let threshold = self.threshold;
        let warnings = self.access.with_read(|state| {
            let mut warnings: Vec<InactivityWarning> = state
                .iter()
                .filter_map(|(user_id, record)| {
                    let inactive_for = now.signed_duration_since(record.last_message);
                    if inactive_for > threshold {
                        Some(InactivityWarning {
                            user_id: user_id.clone(),
                            display_name: record.display_name.clone(),
                            inactive_for,
                        })
                    } else {
                        None
                    }
                })
                .collect();
            // Deterministic order for reproducible sweeps.
            warnings.sort_by(|a, b| a.user_id.cmp(&b.user_id));
            warnings
        })?;

        debug!(eligible = warnings.len(), "inactivity sweep complete");
        Ok(warnings)
    }

    /// One full sweep at the current wall-clock time, delivering each
    /// warning through the gateway. A failed send is logged and skipped;
    /// it never aborts the rest of the batch. Returns the number of
    /// warnings delivered.
    pub fn run_once(&self, gateway: &dyn ChatGateway) -> Result<usize> {
        let warnings = self.sweep_at(now_in(self.zone))?;

        let mut delivered = 0;
        for warning in &warnings {
            match gateway.send_warning(warning) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(user = %warning.user_id, error = %e, "failed to deliver warning");
                }
            }
        }

        info!(eligible = warnings.len(), delivered, "inactivity warnings sent");
        Ok(delivered)
    }
}
