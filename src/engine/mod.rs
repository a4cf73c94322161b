//! The match engine and its session state.
//!
//! ## Flow
//!
//! 1. `MatchEngine::new` deals level 1 and starts a session
//! 2. `flip` turns cards face-up; the second flip of a pair yields a
//!    `ResolutionTicket`
//! 3. After the reveal delay the ticket goes back to `resolve`, which
//!    scores the pair or turns it back over
//! 4. Clearing the board deals the next level; the clock (`tick`) or
//!    `end_game` finishes the session
//!
//! Every state change is published as an [`EngineEvent`].
//!
//! ```
//! use memory_match::core::{Difficulty, EngineConfig};
//! use memory_match::engine::{FlipOutcome, MatchEngine};
//!
//! let mut engine = MatchEngine::new(EngineConfig::default().with_seed(1), Difficulty::Easy).unwrap();
//! let first = engine.session().cards()[0].id;
//!
//! assert_eq!(engine.flip(first).unwrap(), FlipOutcome::Flipped);
//! assert_eq!(engine.session().pending_flips(), &[first]);
//! ```

mod events;
mod match_engine;
mod session;
mod stats;

pub use events::{EngineEvent, EventBus, EventListener, DEFAULT_QUEUE_CAPACITY};
pub use match_engine::{
    FlipOutcome, IgnoreReason, MatchEngine, ResolutionTicket, ResolveOutcome, TickOutcome,
};
pub use session::{EndReason, Session, SessionPhase};
pub use stats::SessionStats;
