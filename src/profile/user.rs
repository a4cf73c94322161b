//! Player profile record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Difficulty;

/// A player: identity, best scores and display preference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,

    /// Best score per difficulty. Missing entries read as zero.
    #[serde(default)]
    pub high_scores: BTreeMap<Difficulty, u32>,

    #[serde(default)]
    pub is_dark_mode: bool,
}

impl UserRecord {
    /// A fresh user with a random id and zeroed scores.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            high_scores: Difficulty::ALL.iter().map(|&d| (d, 0)).collect(),
            is_dark_mode: false,
        }
    }

    #[must_use]
    pub fn high_score(&self, difficulty: Difficulty) -> u32 {
        self.high_scores.get(&difficulty).copied().unwrap_or(0)
    }

    pub fn set_high_score(&mut self, difficulty: Difficulty, score: u32) {
        self.high_scores.insert(difficulty, score);
    }

    /// Zero every high score.
    pub fn reset_high_scores(&mut self) {
        for difficulty in Difficulty::ALL {
            self.high_scores.insert(difficulty, 0);
        }
    }

    /// Case-insensitive username comparison.
    #[must_use]
    pub fn is_named(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase()
    }
}
