use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::SECONDS_PER_HOUR;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeToLiveError {
    #[error("time-to-live value {value:?} is not a base-10 integer")]
    NotAnInteger { value: String },
}

/// Parse a time-to-live tag value as signed whole hours.
/// Surrounding whitespace and a leading sign are accepted; anything else is an error.
pub fn parse_time_to_live_hours(value: &str) -> Result<i64, TimeToLiveError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TimeToLiveError::NotAnInteger { value: value.to_string() })
}

/// Whole hours elapsed from `creation_time` to `now`, rounded toward negative infinity.
pub fn hours_alive(now: DateTime<Utc>, creation_time: DateTime<Utc>) -> i64 {
    let delta = now - creation_time;
    let mut secs = delta.num_seconds();
    // num_seconds truncates toward zero; floor it for negative deltas with a fractional part.
    if delta < Duration::seconds(secs) {
        secs -= 1;
    }
    secs.div_euclid(SECONDS_PER_HOUR)
}

/// A negative `time_to_live_hours` makes any non-negative age eligible.
pub fn time_to_live_exceeded(hours_alive: i64, time_to_live_hours: i64) -> bool {
    hours_alive >= time_to_live_hours
}
