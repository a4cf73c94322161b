//! High-score recording at game over.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::store::UserStore;
use super::user::UserRecord;
use crate::core::Difficulty;
use crate::engine::{EndReason, SessionStats};

/// What a finished session hands to its recorder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub generation: u64,
    pub difficulty: Difficulty,
    pub score: u32,
    /// Level the session ended on.
    pub level: u32,
    pub reason: EndReason,
    pub stats: SessionStats,
}

/// Receives every finished session exactly once.
pub trait ScoreRecorder: Send {
    fn record(&mut self, summary: &GameSummary);
}

/// Discards scores. The engine's default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRecorder;

impl ScoreRecorder for NoopRecorder {
    fn record(&mut self, _summary: &GameSummary) {}
}

/// Store `score` as `user`'s best on `difficulty` if it beats the current one.
///
/// Returns the updated record, or the unchanged one when the score is not
/// strictly higher or the store fails. Failures are logged, not raised.
pub fn record_if_high_score(
    store: &dyn UserStore,
    user: &UserRecord,
    difficulty: Difficulty,
    score: u32,
) -> UserRecord {
    if score <= user.high_score(difficulty) {
        return user.clone();
    }

    let mut updated = user.clone();
    updated.set_high_score(difficulty, score);
    match store.save_user(&updated) {
        Ok(()) => {
            info!(user = %updated.username, %difficulty, score, "new high score");
            updated
        }
        Err(err) => {
            warn!(user = %user.username, %difficulty, score, %err, "could not save high score");
            user.clone()
        }
    }
}

/// Records high scores for whoever is logged in.
#[derive(Clone)]
pub struct ProfileRecorder {
    store: Arc<dyn UserStore>,
}

impl ProfileRecorder {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

impl ScoreRecorder for ProfileRecorder {
    fn record(&mut self, summary: &GameSummary) {
        let user = match self.store.get_current_user() {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(score = summary.score, "no user logged in, score not recorded");
                return;
            }
            Err(err) => {
                warn!(%err, "could not load current user, score not recorded");
                return;
            }
        };

        let updated =
            record_if_high_score(self.store.as_ref(), &user, summary.difficulty, summary.score);
        if updated != user {
            if let Err(err) = self.store.save_current_user(Some(&updated)) {
                warn!(%err, "could not refresh current user");
            }
        }
    }
}

impl std::fmt::Debug for ProfileRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileRecorder").finish_non_exhaustive()
    }
}
