//! Per-session play statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while a session is played.
///
/// None of these feed into the score; they exist for summaries and UIs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Cards turned face-up.
    pub flips: u32,

    /// Pairs resolved (matches + mismatches).
    pub attempts: u32,

    /// Pairs found.
    pub matches: u32,

    /// Pairs that did not match.
    pub mismatches: u32,

    /// Levels cleared.
    pub levels_cleared: u32,
}

impl SessionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_match(&mut self) {
        self.attempts += 1;
        self.matches += 1;
    }

    pub(crate) fn record_mismatch(&mut self) {
        self.attempts += 1;
        self.mismatches += 1;
    }

    /// Fraction of attempts that were matches.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.matches as f64 / self.attempts as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SessionStats::new();
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.accuracy(), 0.0);
    }

    #[test]
    fn test_stats_accuracy() {
        let mut stats = SessionStats::new();
        stats.record_match();
        stats.record_mismatch();
        stats.record_mismatch();
        stats.record_match();

        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.accuracy(), 0.5);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SessionStats::new();
        stats.flips = 10;
        stats.record_match();

        stats.reset();

        assert_eq!(stats, SessionStats::default());
    }
}
