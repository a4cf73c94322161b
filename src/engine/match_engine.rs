//! The match engine: flip, resolve, level, clock and game-over transitions.
//!
//! The engine is synchronous and owns its session exclusively. Anything
//! deferred (the reveal delay before a pair resolves, the one-second clock)
//! is scheduled by the caller; see [`crate::clock::SessionDriver`] for the
//! async composition.
//!
//! ## Resolution Tickets
//!
//! When a flip leaves two cards pending, `flip` returns a
//! [`ResolutionTicket`]. The caller waits however long it likes, then hands
//! the ticket to [`MatchEngine::resolve`]. A ticket from a superseded
//! session (after `restart`) or for a pair that is no longer pending is
//! stale, and resolving it changes nothing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::events::{EngineEvent, EventBus};
use super::session::{EndReason, Session};
use crate::cards::Card;
use crate::core::{CardId, Difficulty, EngineConfig, EngineError, Result};
use crate::deck::{DeckGenerator, RandomDeckGenerator};
use crate::profile::{GameSummary, NoopRecorder, ScoreRecorder};

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    GameOver,
    Paused,
    /// Two cards are already waiting for resolution.
    PairPending,
    AlreadyMatched,
    /// The card is already showing, possibly as the first of a pair.
    AlreadyFaceUp,
}

/// Outcome of a flip request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// The card is face-up and waiting for a partner.
    Flipped,
    /// The card completed a pair; resolve the ticket after the reveal delay.
    PairPending(ResolutionTicket),
}

impl FlipOutcome {
    /// Whether this outcome changed the session.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }

    /// The resolution ticket, if this flip completed a pair.
    pub const fn ticket(self) -> Option<ResolutionTicket> {
        match self {
            Self::PairPending(ticket) => Some(ticket),
            _ => None,
        }
    }
}

/// Handle for a scheduled resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket {
    pub generation: u64,
    pub first: CardId,
    pub second: CardId,
}

/// Outcome of resolving a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The ticket no longer applies; nothing changed.
    Stale,
    Matched { points: u32 },
    Mismatched,
    /// The match cleared the board and the next level was dealt.
    LevelAdvanced { points: u32, level: u32 },
    /// The match cleared the last dealable level; the game is over.
    AllLevelsCleared { points: u32 },
}

/// Outcome of a clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or finished; the clock did not move.
    Ignored,
    Ticked { time_remaining: u32 },
    /// The clock hit zero and the game ended.
    TimeUp,
}

/// Card-matching state machine for one session at a time.
pub struct MatchEngine {
    config: EngineConfig,
    generator: Box<dyn DeckGenerator>,
    recorder: Box<dyn ScoreRecorder>,
    session: Session,
    events: EventBus,
}

impl MatchEngine {
    /// Start a session with the default random generator.
    pub fn new(config: EngineConfig, difficulty: Difficulty) -> Result<Self> {
        let generator = RandomDeckGenerator::new(&config);
        Self::with_generator(config, difficulty, Box::new(generator))
    }

    /// Start a session dealing from `generator`.
    pub fn with_generator(
        config: EngineConfig,
        difficulty: Difficulty,
        mut generator: Box<dyn DeckGenerator>,
    ) -> Result<Self> {
        config.validate()?;
        let cards = generator.generate(difficulty, 1)?;
        let time_limit = config.profile(difficulty).time_limit;
        let events = EventBus::with_capacity(config.event_queue_capacity);

        let mut engine = Self {
            config,
            generator,
            recorder: Box::new(NoopRecorder),
            session: Session::new(0, difficulty, time_limit, cards),
            events,
        };
        engine.announce_start();
        Ok(engine)
    }

    /// Replace the score recorder (builder pattern).
    #[must_use]
    pub fn with_recorder(mut self, recorder: impl ScoreRecorder + 'static) -> Self {
        self.set_recorder(recorder);
        self
    }

    pub fn set_recorder(&mut self, recorder: impl ScoreRecorder + 'static) {
        self.recorder = Box::new(recorder);
    }

    /// Swap in a new recorder, handing back the old one.
    pub fn replace_recorder(&mut self, recorder: Box<dyn ScoreRecorder>) -> Box<dyn ScoreRecorder> {
        std::mem::replace(&mut self.recorder, recorder)
    }

    // === Observation ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The live session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// A detached copy of the session. O(1): cards share structure.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.session.generation
    }

    /// Register an observer for every future event.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + Send + 'static) {
        self.events.subscribe(listener);
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }

    // === Flipping ===

    /// Turn a card face-up.
    ///
    /// Unknown ids are an error. Everything else that cannot flip (finished
    /// or paused session, matched or already showing card, pair pending)
    /// is ignored.
    pub fn flip(&mut self, card_id: CardId) -> Result<FlipOutcome> {
        let card = self
            .session
            .card(card_id)
            .ok_or(EngineError::InvalidFlipRequest(card_id))?;

        if let Some(reason) = self.flip_blocker(card) {
            debug!(card = %card_id, ?reason, "flip ignored");
            return Ok(FlipOutcome::Ignored(reason));
        }

        if let Some(card) = self.session.card_mut(card_id) {
            card.turn_face_up();
        }
        self.session.pending_flips.push(card_id);
        self.session.stats.flips += 1;

        let generation = self.session.generation;
        debug!(card = %card_id, generation, "card flipped");
        self.events.emit(EngineEvent::CardFlipped {
            generation,
            card: card_id,
        });

        match self.session.pending_flips.as_slice() {
            &[first, second] => Ok(FlipOutcome::PairPending(ResolutionTicket {
                generation,
                first,
                second,
            })),
            _ => Ok(FlipOutcome::Flipped),
        }
    }

    fn flip_blocker(&self, card: &Card) -> Option<IgnoreReason> {
        if self.session.is_over {
            Some(IgnoreReason::GameOver)
        } else if self.session.is_paused {
            Some(IgnoreReason::Paused)
        } else if self.session.pending_flips.len() >= 2 {
            Some(IgnoreReason::PairPending)
        } else if card.is_matched {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.is_face_up {
            Some(IgnoreReason::AlreadyFaceUp)
        } else {
            None
        }
    }

    // === Resolution ===

    /// Resolve the pair named by `ticket`.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        if !self.ticket_is_current(ticket) {
            debug!(?ticket, generation = self.session.generation, "dropping stale resolution");
            return ResolveOutcome::Stale;
        }

        let criterion = self.session.match_criterion();
        let is_match = match (
            self.session.card(ticket.first),
            self.session.card(ticket.second),
        ) {
            (Some(first), Some(second)) => first.pairs_with(second, criterion),
            _ => {
                self.session.pending_flips.clear();
                return ResolveOutcome::Stale;
            }
        };
        self.session.pending_flips.clear();

        if is_match {
            self.apply_match(ticket)
        } else {
            self.apply_mismatch(ticket);
            ResolveOutcome::Mismatched
        }
    }

    /// Resolve whatever pair is currently pending, if any.
    pub fn resolve_pending(&mut self) -> ResolveOutcome {
        let ticket = match self.session.pending_flips.as_slice() {
            &[first, second] => ResolutionTicket {
                generation: self.session.generation,
                first,
                second,
            },
            _ => return ResolveOutcome::Stale,
        };
        self.resolve(ticket)
    }

    fn ticket_is_current(&self, ticket: ResolutionTicket) -> bool {
        ticket.generation == self.session.generation
            && !self.session.is_over
            && self.session.pending_flips.as_slice() == [ticket.first, ticket.second]
    }

    fn apply_match(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        for id in [ticket.first, ticket.second] {
            if let Some(card) = self.session.card_mut(id) {
                card.mark_matched();
            }
        }

        let points = self.config.points_for_match(self.session.level);
        self.session.score = self.session.score.saturating_add(points);
        self.session.stats.record_match();

        debug!(first = %ticket.first, second = %ticket.second, points, "pair matched");
        self.events.emit(EngineEvent::PairMatched {
            generation: ticket.generation,
            first: ticket.first,
            second: ticket.second,
            points,
        });

        if !self.session.all_matched() {
            return ResolveOutcome::Matched { points };
        }

        self.session.stats.levels_cleared += 1;
        match self.advance_level() {
            Ok(()) => ResolveOutcome::LevelAdvanced {
                points,
                level: self.session.level,
            },
            Err(err) => {
                info!(%err, level = self.session.level, "no further level can be dealt");
                self.finish(EndReason::AllLevelsCleared);
                ResolveOutcome::AllLevelsCleared { points }
            }
        }
    }

    fn apply_mismatch(&mut self, ticket: ResolutionTicket) {
        for id in [ticket.first, ticket.second] {
            if let Some(card) = self.session.card_mut(id) {
                card.turn_face_down();
            }
        }

        self.session.score = self
            .session
            .score
            .saturating_sub(self.config.mismatch_penalty);
        self.session.stats.record_mismatch();

        debug!(first = %ticket.first, second = %ticket.second, "pair mismatched");
        self.events.emit(EngineEvent::PairMismatched {
            generation: ticket.generation,
            first: ticket.first,
            second: ticket.second,
        });
    }

    // === Levels ===

    /// Deal the next level.
    ///
    /// Resets the clock (shorter on penalty levels) and clears pending
    /// flips. If the deck cannot be dealt the session is left untouched.
    ///
    /// Does nothing and returns `Ok(())` once the session is over: a finished
    /// session keeps its final level and cards until `restart`.
    pub fn advance_level(&mut self) -> Result<()> {
        if self.session.is_over {
            return Ok(());
        }

        let difficulty = self.session.difficulty;
        let next_level = self.session.level + 1;
        let cards = self.generator.generate(difficulty, next_level)?;

        self.session.level = next_level;
        self.session.time_remaining = self.config.time_for_level(difficulty, next_level);
        self.session.deal(cards);

        info!(
            level = next_level,
            time_remaining = self.session.time_remaining,
            cards = self.session.cards.len(),
            "level advanced"
        );
        self.events.emit(EngineEvent::LevelAdvanced {
            generation: self.session.generation,
            level: next_level,
            time_remaining: self.session.time_remaining,
            card_count: self.session.cards.len(),
        });
        Ok(())
    }

    // === Clock ===

    /// Take one second off the clock.
    pub fn tick(&mut self) -> TickOutcome {
        if self.session.is_over || self.session.is_paused {
            return TickOutcome::Ignored;
        }

        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        self.events.emit(EngineEvent::Tick {
            generation: self.session.generation,
            time_remaining: self.session.time_remaining,
        });

        if self.session.time_remaining == 0 {
            self.finish(EndReason::TimeUp);
            TickOutcome::TimeUp
        } else {
            TickOutcome::Ticked {
                time_remaining: self.session.time_remaining,
            }
        }
    }

    /// Suspend the clock and flips. Returns whether anything changed.
    pub fn pause(&mut self) -> bool {
        if self.session.is_over || self.session.is_paused {
            return false;
        }
        self.session.is_paused = true;
        self.events.emit(EngineEvent::Paused {
            generation: self.session.generation,
        });
        true
    }

    /// Lift a pause. Returns whether anything changed.
    pub fn resume(&mut self) -> bool {
        if self.session.is_over || !self.session.is_paused {
            return false;
        }
        self.session.is_paused = false;
        self.events.emit(EngineEvent::Resumed {
            generation: self.session.generation,
        });
        true
    }

    // === Session lifecycle ===

    /// Finish the session and record the score.
    ///
    /// Returns the summary the first time; later calls are no-ops.
    pub fn end_game(&mut self) -> Option<GameSummary> {
        self.finish(EndReason::Ended)
    }

    /// Throw away the session and deal a fresh level 1.
    ///
    /// The new session gets a new generation, so every outstanding
    /// resolution ticket becomes stale.
    pub fn restart(&mut self) -> Result<()> {
        let difficulty = self.session.difficulty;
        let cards = self.generator.generate(difficulty, 1)?;
        let generation = self.session.generation + 1;
        let time_limit = self.config.profile(difficulty).time_limit;

        self.session = Session::new(generation, difficulty, time_limit, cards);
        self.announce_start();
        Ok(())
    }

    fn finish(&mut self, reason: EndReason) -> Option<GameSummary> {
        if self.session.is_over {
            return None;
        }
        self.session.is_over = true;
        self.session.end_reason = Some(reason);

        let summary = GameSummary {
            generation: self.session.generation,
            difficulty: self.session.difficulty,
            score: self.session.score,
            level: self.session.level,
            reason,
            stats: self.session.stats.clone(),
        };

        info!(
            difficulty = %summary.difficulty,
            score = summary.score,
            level = summary.level,
            ?reason,
            "game over"
        );
        self.events.emit(EngineEvent::GameOver {
            generation: summary.generation,
            difficulty: summary.difficulty,
            score: summary.score,
            level: summary.level,
            reason,
        });
        self.recorder.record(&summary);
        Some(summary)
    }

    fn announce_start(&mut self) {
        debug!(
            generation = self.session.generation,
            difficulty = %self.session.difficulty,
            cards = self.session.cards.len(),
            "session started"
        );
        self.events.emit(EngineEvent::SessionStarted {
            generation: self.session.generation,
            difficulty: self.session.difficulty,
            card_count: self.session.cards.len(),
        });
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
