use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Clone, PartialEq, Debug)]
pub enum TrackError {
    /// A rate was requested over a sequence with zero elapsed time or zero
    /// distance, `what` names the denominator.
    DivisionByZero { what: &'static str },
    /// No point satisfies the requested time bound.
    LookupFailure(String),
    /// The synthetic threshold sequence ran out before the source track did.
    ExhaustedProfile { consumed: usize, emitted: usize },
    /// Timestamps went backwards at `index` (the later of the two offending points).
    InvariantViolation {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    /// Target speed must be finite and strictly positive (km/h).
    InvalidSpeed(f64),
    /// The speed ratio asks for a profile longer than `limit` steps.
    ProfileTooLong { requested: f64, limit: usize },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackError::DivisionByZero { what } => {
                write!(f, "division by zero: {what} of the point sequence is zero")
            }
            TrackError::LookupFailure(msg) => write!(f, "lookup failure: {msg}"),
            TrackError::ExhaustedProfile { consumed, emitted } => write!(
                f,
                "target profile exhausted after {consumed} thresholds ({emitted} points emitted), \
                 the speed ratio is too large for the widened profile"
            ),
            TrackError::InvariantViolation {
                index,
                previous,
                current,
            } => write!(
                f,
                "timestamps must be non-decreasing: point {index} at {current} comes after {previous}"
            ),
            TrackError::InvalidSpeed(speed) => {
                write!(f, "target speed must be a positive number of km/h, got {speed}")
            }
            TrackError::ProfileTooLong { requested, limit } => write!(
                f,
                "speed profile of {requested} steps exceeds the limit of {limit}, \
                 the target speed is too far below the recorded one"
            ),
        }
    }
}

impl Error for TrackError {}
