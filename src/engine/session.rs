//! Session state: everything about one play-through.
//!
//! ## Session
//!
//! A plain state object owned by the `MatchEngine`. Observers read it
//! through `MatchEngine::session` or take a `snapshot`; only the engine
//! mutates it.
//!
//! Cards are kept in an `im::Vector`, so snapshots are O(1) clones that
//! share structure with the live session.
//!
//! ## Generation
//!
//! Every session carries a `generation` number. Restarting bumps it, which
//! is how deferred work (a pending resolution, a clock tick) scheduled for
//! an older session is recognised and dropped.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::stats::SessionStats;
use crate::cards::{Card, MatchCriterion};
use crate::core::{CardId, Difficulty};

/// Externally observable state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Cards dealt, nothing pending.
    Ready,
    /// One card face-up awaiting a partner.
    OneFlipped,
    /// Two cards face-up, resolution scheduled.
    Resolving,
    /// Session finished; no further moves.
    GameOver,
}

/// Why a session finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The clock ran out.
    TimeUp,
    /// The player (or caller) ended the game.
    Ended,
    /// The last dealable level was cleared.
    AllLevelsCleared,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) generation: u64,
    pub(crate) difficulty: Difficulty,
    pub(crate) level: u32,
    pub(crate) score: u32,
    pub(crate) time_remaining: u32,
    pub(crate) cards: Vector<Card>,
    pub(crate) pending_flips: SmallVec<[CardId; 2]>,
    pub(crate) is_over: bool,
    pub(crate) is_paused: bool,
    pub(crate) end_reason: Option<EndReason>,
    pub(crate) stats: SessionStats,
}

impl Session {
    /// Create a level-1 session over an already dealt deck.
    #[must_use]
    pub fn new(generation: u64, difficulty: Difficulty, time_limit: u32, cards: Vec<Card>) -> Self {
        Self {
            generation,
            difficulty,
            level: 1,
            score: 0,
            time_remaining: time_limit,
            cards: cards.into_iter().collect(),
            pending_flips: SmallVec::new(),
            is_over: false,
            is_paused: false,
            end_reason: None,
            stats: SessionStats::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the clock.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Cards of the current level, in table order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Face-up, unmatched cards awaiting resolution (at most two).
    #[must_use]
    pub fn pending_flips(&self) -> &[CardId] {
        &self.pending_flips
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn match_criterion(&self) -> MatchCriterion {
        self.difficulty.match_criterion()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_over {
            return SessionPhase::GameOver;
        }
        match self.pending_flips.len() {
            0 => SessionPhase::Ready,
            1 => SessionPhase::OneFlipped,
            _ => SessionPhase::Resolving,
        }
    }

    // === Cards ===

    /// Look up a card on the table.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub(crate) fn card_index(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        let index = self.card_index(id)?;
        self.cards.get_mut(index)
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|card| card.is_matched).count() / 2
    }

    /// Whether every card on the table is matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.is_matched)
    }

    pub(crate) fn deal(&mut self, cards: Vec<Card>) {
        self.cards = cards.into_iter().collect();
        self.pending_flips.clear();
    }
}
