//! Calendar-day arithmetic in the fixed reference zone.
//!
//! All zone handling for streak decisions lives here. The difference is
//! computed on date components only, never on elapsed hours: a message at
//! 23:59 followed by one at 00:01 is one calendar day apart even though
//! only two minutes elapsed.

use crate::types::Timestamp;
use chrono::FixedOffset;

/// Number of calendar days from `earlier` to `later`, as observed in
/// `zone`. Positive when `later` falls on a later date, zero on the same
/// date, negative when the clock appears to have moved backward.
pub fn days_between(earlier: Timestamp, later: Timestamp, zone: FixedOffset) -> i64 {
    let from = earlier.with_timezone(&zone).date_naive();
    let to = later.with_timezone(&zone).date_naive();
    to.signed_duration_since(from).num_days()
}
