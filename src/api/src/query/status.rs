//! Open/closed status derived from an advertised start time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived at read time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    /// Status of something starting at `start`, as seen at `now`.
    ///
    /// A start time equal to `now` is already closed.
    pub fn at(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now >= start {
            Status::Closed
        } else {
            Status::Open
        }
    }

    /// Status against the current wall clock.
    pub fn derive(start: DateTime<Utc>) -> Self {
        Self::at(start, Utc::now())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "OPEN",
            Status::Closed => "CLOSED",
        }
    }
}
