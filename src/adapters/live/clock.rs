//! System clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads wall-clock UTC time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
