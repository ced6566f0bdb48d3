//! Countdown state and the deadline it counts toward.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DAY_MS: i64 = 86_400_000;
pub const HOUR_MS: i64 = 3_600_000;
pub const MINUTE_MS: i64 = 60_000;
pub const SECOND_MS: i64 = 1_000;

/// How far ahead of a landing page load its deadline is placed.
pub const DEADLINE_OFFSET_DAYS: i64 = 5;

/// Remaining time split into whole days, hours within the day, minutes within the hour
/// and seconds within the minute. Never negative.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decompose a distance in milliseconds. Zero or negative distances clamp to all zeros.
    pub fn from_millis(distance: i64) -> Self {
        if distance <= 0 {
            return Self::ZERO;
        }
        let part = |value: i64| u64::try_from(value).unwrap_or_default();
        Self {
            days: part(distance / DAY_MS),
            hours: part((distance % DAY_MS) / HOUR_MS),
            minutes: part((distance % HOUR_MS) / MINUTE_MS),
            seconds: part((distance % MINUTE_MS) / SECOND_MS),
        }
    }

    /// Whole seconds represented by all four parts.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// The instant a landing page counts down to.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Deadline(DateTime<Utc>);

impl Deadline {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Deadline for a page loaded at `now`: five days later. Every load computes its own.
    pub fn from_load(now: DateTime<Utc>) -> Self {
        Self(now + Duration::days(DEADLINE_OFFSET_DAYS))
    }

    /// Parse a deadline carried by a page as Unix milliseconds.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }
}
