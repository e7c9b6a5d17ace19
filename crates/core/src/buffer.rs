//! Pickup buffer calculation.
//!
//! A pickup is scheduled some minutes after the flight's expected arrival so
//! travellers have time to clear immigration and collect bags. Terminal 5
//! handles long-haul arrivals and gets a longer window.

use chrono::Duration;

use crate::types::LocalDateTime;

/// Terminal with the extended pickup window.
pub const EXTENDED_TERMINAL: &str = "T5";

/// Buffer for [`EXTENDED_TERMINAL`], in minutes.
pub const EXTENDED_BUFFER_MINUTES: i32 = 90;

/// Buffer for every other terminal, in minutes.
pub const DEFAULT_BUFFER_MINUTES: i32 = 45;

/// Pickup buffer in minutes for a terminal code. Unknown or empty codes
/// get the default.
pub fn buffer_for(terminal: &str) -> i32 {
    if terminal == EXTENDED_TERMINAL {
        EXTENDED_BUFFER_MINUTES
    } else {
        DEFAULT_BUFFER_MINUTES
    }
}

/// Recommended pickup time: expected arrival plus the buffer.
pub fn compute_pickup_time(expected_arrival: LocalDateTime, buffer_minutes: i32) -> LocalDateTime {
    expected_arrival + Duration::minutes(i64::from(buffer_minutes))
}
