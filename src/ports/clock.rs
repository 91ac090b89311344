//! Clock port for timestamping runs.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Run outcomes carry start and finish timestamps; tests substitute a fixed
/// clock to keep them deterministic.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
