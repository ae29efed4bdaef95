//! Adaptive playback-rate policy
//!
//! Each utterance is spoken faster when more items are still waiting behind
//! it, so the output catches up under load instead of falling further behind.

use serde::Deserialize;

/// Playback rate with an empty remaining backlog
pub const BASE_RATE: f32 = 1.75;

/// Speed-up per item still queued behind the current utterance
pub const RATE_INCREMENT: f32 = 0.25;

/// Upper clamp on the playback rate
pub const MAX_RATE: f32 = 2.5;

/// Maps remaining queue depth to a synthesis rate multiplier
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RatePolicy {
    /// Rate with no backlog
    pub base: f32,

    /// Added rate per backlogged item
    pub increment: f32,

    /// Maximum rate
    pub max: f32,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            base: BASE_RATE,
            increment: RATE_INCREMENT,
            max: MAX_RATE,
        }
    }
}

impl RatePolicy {
    /// Rate for an utterance with `backlog` items still queued behind it
    #[must_use]
    pub fn rate_for_backlog(&self, backlog: usize) -> f32 {
        self.increment.mul_add(backlog as f32, self.base).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backlog_speaks_at_base_rate() {
        assert_eq!(RatePolicy::default().rate_for_backlog(0), 1.75);
    }

    #[test]
    fn each_backlogged_item_adds_increment() {
        let policy = RatePolicy::default();
        assert_eq!(policy.rate_for_backlog(1), 2.0);
        assert_eq!(policy.rate_for_backlog(2), 2.25);
    }

    #[test]
    fn rate_is_clamped_at_max() {
        let policy = RatePolicy::default();
        assert_eq!(policy.rate_for_backlog(3), 2.5);
        assert_eq!(policy.rate_for_backlog(100), 2.5);
    }
}
