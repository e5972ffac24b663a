//! Resolver configuration.

use std::time::Duration;

/// Configuration parameters for itinerary resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Upper bound on one whole resolution, across every backend attempt.
    /// `None` leaves it to the per-request HTTP timeout.
    pub deadline_secs: Option<u64>,
}

impl ResolverConfig {
    /// Bound each resolution by a deadline.
    pub fn with_deadline_secs(mut self, secs: u64) -> Self {
        self.deadline_secs = Some(secs);
        self
    }

    /// Returns the deadline as a Duration.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}
