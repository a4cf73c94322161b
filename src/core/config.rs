//! Engine configuration.
//!
//! Games configure the engine at startup by providing an `EngineConfig`:
//! - `DifficultyProfile`: time limit, base pair count and level-up threshold
//!   for one difficulty
//! - Scoring constants (points per match, level-up time penalty)
//! - Timing of the session clock and of the mismatch reveal
//!
//! The defaults reproduce the classic game. Configs are plain serde data, so
//! they can also be loaded from JSON.
//!
//! ```
//! use memory_match::core::{Difficulty, EngineConfig};
//!
//! let config = EngineConfig::default().with_seed(7);
//! let easy = config.profile(Difficulty::Easy);
//!
//! assert_eq!(easy.time_limit, 60);
//! assert_eq!(easy.pairs_for_level(1), 2);
//! assert_eq!(easy.pairs_for_level(3), 4);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use crate::cards::{MatchCriterion, COLOR_PALETTE, SHAPE_PALETTE};

/// Game difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The hardest difficulty. Leaderboards rank by it.
    pub const HARDEST: Difficulty = Difficulty::Hard;

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Which part of the card face decides a pair.
    ///
    /// Shapes on the hardest difficulty, colors everywhere else.
    #[must_use]
    pub const fn match_criterion(self) -> MatchCriterion {
        match self {
            Difficulty::Hard => MatchCriterion::Shape,
            Difficulty::Easy | Difficulty::Medium => MatchCriterion::Color,
        }
    }

    /// Number of distinct pairing symbols available.
    #[must_use]
    pub const fn palette_size(self) -> usize {
        match self.match_criterion() {
            MatchCriterion::Color => COLOR_PALETTE.len(),
            MatchCriterion::Shape => SHAPE_PALETTE.len(),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-difficulty tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Seconds on the clock at the start of every level.
    pub time_limit: u32,

    /// Pairs dealt on level 1. Each later level adds one pair.
    pub base_pairs: usize,

    /// Every level that is a multiple of this gets a shorter clock.
    pub level_up_threshold: u32,
}

impl DifficultyProfile {
    /// Create a profile.
    #[must_use]
    pub const fn new(time_limit: u32, base_pairs: usize, level_up_threshold: u32) -> Self {
        Self {
            time_limit,
            base_pairs,
            level_up_threshold,
        }
    }

    /// Pairs dealt on `level` (1-based).
    #[must_use]
    pub fn pairs_for_level(&self, level: u32) -> usize {
        self.base_pairs + level.saturating_sub(1) as usize
    }

    /// Whether reaching `level` costs extra clock time.
    #[must_use]
    pub fn is_penalty_level(&self, level: u32) -> bool {
        self.level_up_threshold > 0 && level % self.level_up_threshold == 0
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,

    /// Seconds removed from the reset clock on penalty levels.
    pub level_up_time_penalty: u32,

    /// Points per match, multiplied by the current level.
    pub match_points: u32,

    /// Points removed per mismatch. Score never drops below zero.
    pub mismatch_penalty: u32,

    /// How long two flipped cards stay visible before resolution (ms).
    pub resolve_delay_ms: u64,

    /// Session clock period (ms). One tick removes one second.
    pub tick_interval_ms: u64,

    /// Undrained events kept for polling. Older events are dropped first.
    pub event_queue_capacity: usize,

    /// Deck RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile::new(60, 2, 3),
            medium: DifficultyProfile::new(45, 3, 5),
            hard: DifficultyProfile::new(30, 4, 7),
            level_up_time_penalty: 5,
            match_points: 10,
            mismatch_penalty: 0,
            resolve_delay_ms: 500,
            tick_interval_ms: 1000,
            event_queue_capacity: 1024,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Profile for a difficulty.
    #[must_use]
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Clock value at the start of `level`.
    #[must_use]
    pub fn time_for_level(&self, difficulty: Difficulty, level: u32) -> u32 {
        let profile = self.profile(difficulty);
        if level > 1 && profile.is_penalty_level(level) {
            profile.time_limit.saturating_sub(self.level_up_time_penalty)
        } else {
            profile.time_limit
        }
    }

    /// Points awarded for a match on `level`.
    #[must_use]
    pub fn points_for_match(&self, level: u32) -> u32 {
        self.match_points.saturating_mul(level)
    }

    #[must_use]
    pub fn resolve_delay(&self) -> Duration {
        Duration::from_millis(self.resolve_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Set the deck seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace one difficulty's profile.
    #[must_use]
    pub fn with_profile(mut self, difficulty: Difficulty, profile: DifficultyProfile) -> Self {
        match difficulty {
            Difficulty::Easy => self.easy = profile,
            Difficulty::Medium => self.medium = profile,
            Difficulty::Hard => self.hard = profile,
        }
        self
    }

    /// Set the per-mismatch penalty.
    #[must_use]
    pub fn with_mismatch_penalty(mut self, penalty: u32) -> Self {
        self.mismatch_penalty = penalty;
        self
    }

    /// Set the reveal delay before resolution.
    #[must_use]
    pub fn with_resolve_delay(mut self, delay: Duration) -> Self {
        self.resolve_delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Bound the polling event queue.
    #[must_use]
    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        self.event_queue_capacity = capacity;
        self
    }

    /// Check the config can deal level 1 of every difficulty.
    pub fn validate(&self) -> Result<()> {
        for difficulty in Difficulty::ALL {
            let profile = self.profile(difficulty);
            if profile.base_pairs == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{difficulty}: base_pairs must be at least 1"
                )));
            }
            if profile.base_pairs > difficulty.palette_size() {
                return Err(EngineError::InsufficientSymbols {
                    requested: profile.base_pairs,
                    available: difficulty.palette_size(),
                });
            }
            if profile.level_up_threshold == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{difficulty}: level_up_threshold must be at least 1"
                )));
            }
            if profile.time_limit <= self.level_up_time_penalty {
                return Err(EngineError::InvalidConfig(format!(
                    "{difficulty}: time_limit must exceed the level-up penalty"
                )));
            }
        }
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.easy, DifficultyProfile::new(60, 2, 3));
        assert_eq!(config.medium, DifficultyProfile::new(45, 3, 5));
        assert_eq!(config.hard, DifficultyProfile::new(30, 4, 7));
        assert_eq!(config.level_up_time_penalty, 5);
        assert_eq!(config.mismatch_penalty, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_time_for_level() {
        let config = EngineConfig::default();

        assert_eq!(config.time_for_level(Difficulty::Easy, 1), 60);
        assert_eq!(config.time_for_level(Difficulty::Easy, 2), 60);
        assert_eq!(config.time_for_level(Difficulty::Easy, 3), 55);
        assert_eq!(config.time_for_level(Difficulty::Easy, 6), 55);
        assert_eq!(config.time_for_level(Difficulty::Medium, 5), 40);
        assert_eq!(config.time_for_level(Difficulty::Hard, 7), 25);
        assert_eq!(config.time_for_level(Difficulty::Hard, 8), 30);
    }

    #[test]
    fn test_points_scale_with_level() {
        let config = EngineConfig::default();
        assert_eq!(config.points_for_match(1), 10);
        assert_eq!(config.points_for_match(4), 40);
    }

    #[test]
    fn test_match_criterion() {
        assert_eq!(Difficulty::Easy.match_criterion(), MatchCriterion::Color);
        assert_eq!(Difficulty::Medium.match_criterion(), MatchCriterion::Color);
        assert_eq!(Difficulty::Hard.match_criterion(), MatchCriterion::Shape);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_seed(123)
            .with_mismatch_penalty(5)
            .with_resolve_delay(Duration::from_millis(250));

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.mismatch_penalty, 5);
        assert_eq!(config.resolve_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_validate_rejects_oversized_base_pairs() {
        let config = EngineConfig::default()
            .with_profile(Difficulty::Easy, DifficultyProfile::new(60, 7, 3));

        assert_eq!(
            config.validate(),
            Err(EngineError::InsufficientSymbols {
                requested: 7,
                available: 6
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_threshold() {
        let config = EngineConfig::default()
            .with_profile(Difficulty::Hard, DifficultyProfile::new(30, 4, 0));

        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "match_points": 20, "seed": 5 }"#).unwrap();

        assert_eq!(config.match_points, 20);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.easy, EngineConfig::default().easy);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
