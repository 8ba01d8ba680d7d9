// src/engine/clock.rs

//! Wall-clock helpers for heartbeat and schedule arithmetic.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time since the unix epoch. Saturates to zero on a pre-epoch clock.
pub fn unix_now() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

pub fn unix_now_secs() -> u64 {
    unix_now().as_secs()
}

/// The smallest multiple of `delay_secs` strictly greater than `now_secs`:
/// the next heartbeat boundary.
pub fn next_boundary(now_secs: u64, delay_secs: u64) -> u64 {
    let delay = delay_secs.max(1);
    (now_secs / delay + 1) * delay
}
