//! System clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock backed by the host's wall time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
