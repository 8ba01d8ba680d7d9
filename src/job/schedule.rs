// src/job/schedule.rs

//! Fixed-cadence schedule arithmetic.
//!
//! A schedule is "every N units, landing at a fixed offset inside each
//! window" — e.g. every 2 hours at minute 3, second 15. All arithmetic is in
//! whole unix-epoch seconds, as pure functions over a caller-supplied `now`,
//! so it is testable without touching the wall clock.

use std::str::FromStr;

use regex::Regex;

use crate::errors::{CrondagError, Result};

/// Schedule units and their seconds multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minute,
    Hour,
}

impl TimeUnit {
    pub fn seconds(self) -> u64 {
        match self {
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3600,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CrondagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "minutes" => Ok(TimeUnit::Minute),
            "hour" | "hours" => Ok(TimeUnit::Hour),
            other => Err(CrondagError::InvalidSchedule(format!(
                "unknown unit: {other} (expected \"minute\" or \"hour\")"
            ))),
        }
    }
}

/// Fixed-cadence schedule: every `interval` units, at `offset_secs` into the
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    interval: u64,
    unit: TimeUnit,
    offset_secs: u64,
}

impl Schedule {
    /// Build a schedule with offset 0. `interval` is clamped to at least 1.
    pub fn new(interval: u64, unit: TimeUnit) -> Self {
        Self {
            interval: interval.max(1),
            unit,
            offset_secs: 0,
        }
    }

    /// Set the offset within each window. Must fall inside one window.
    pub fn with_offset_secs(mut self, offset_secs: u64) -> Result<Self> {
        if offset_secs >= self.window_secs() {
            return Err(CrondagError::InvalidSchedule(format!(
                "offset {offset_secs}s does not fit inside a {}s window",
                self.window_secs()
            )));
        }
        self.offset_secs = offset_secs;
        Ok(self)
    }

    /// Parse-and-set variant of [`Schedule::with_offset_secs`].
    pub fn with_offset(self, offset: &str) -> Result<Self> {
        self.with_offset_secs(parse_offset(offset)?)
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn offset_secs(&self) -> u64 {
        self.offset_secs
    }

    /// Full window length in seconds.
    pub fn window_secs(&self) -> u64 {
        self.interval * self.unit.seconds()
    }

    /// The next wall-clock instant (unix seconds) the schedule fires, seen
    /// from `now`.
    ///
    /// Round `now` up to the next multiple of the window, add the offset,
    /// then pull back one full window so the offset lands inside the
    /// *upcoming* window rather than one window later.
    pub fn next_run_at(&self, now: u64) -> u64 {
        let window = self.window_secs();
        let next_window = ((now + window) / window) * window;
        next_window + self.offset_secs - window
    }
}

/// Parse a window offset written as `"M:S"` or `"H:M:S"` into seconds.
///
/// `"3:15"` is minute 3, second 15 → 195s. Minute and second fields must stay
/// below 60.
pub fn parse_offset(s: &str) -> Result<u64> {
    let re = Regex::new(r"^(?:(\d{1,2}):)?([0-5]?\d):([0-5]?\d)$")
        .map_err(|e| CrondagError::InvalidSchedule(e.to_string()))?;

    let caps = re.captures(s.trim()).ok_or_else(|| {
        CrondagError::InvalidSchedule(format!(
            "offset '{s}' does not match \"M:S\" or \"H:M:S\""
        ))
    })?;

    let field = |i: usize| -> u64 {
        caps.get(i)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(0))
            .unwrap_or(0)
    };

    Ok(field(1) * 3600 + field(2) * 60 + field(3))
}
