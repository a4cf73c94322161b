//! # memory-match
//!
//! A card-flip memory matching game engine.
//!
//! ## Design Principles
//!
//! 1. **UI-Agnostic**: The engine is a plain state machine. Frontends read
//!    `Session` snapshots and react to `EngineEvent`s.
//!
//! 2. **Deferred Work Is Explicit**: Resolving a flipped pair and ticking the
//!    clock are separate calls. The engine never sleeps; callers (or
//!    `SessionDriver`) decide when.
//!
//! 3. **Configuration Over Convention**: Time limits, pair counts, scoring and
//!    timings live in `EngineConfig`.
//!
//! ## Architecture
//!
//! - **Generations**: Every session has a generation number. Scheduled work
//!   carries it, so a restart makes everything pending from the old session
//!   a no-op.
//!
//! - **Persistent Data Structures**: Cards live in an `im::Vector`, so
//!   snapshots for observers are O(1).
//!
//! - **Injected Storage**: Profiles go through the `UserStore` trait; the
//!   engine only sees a `ScoreRecorder`.
//!
//! ## Modules
//!
//! - `core`: Card ids, RNG, difficulty and configuration, errors
//! - `cards`: Card faces, palettes and match criteria
//! - `deck`: Deck generation
//! - `engine`: Match engine, session state, events
//! - `clock`: Async session driver (clock and delayed resolution)
//! - `profile`: Users, persistence, high scores, leaderboard

pub mod core;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod clock;
pub mod profile;

// Re-export commonly used types
pub use crate::core::{
    CardId, Difficulty, DifficultyProfile, EngineConfig, EngineError, GameRng, Result,
};

pub use crate::cards::{Card, CardFace, Color, MatchCriterion, Shape};

pub use crate::deck::{DeckGenerator, RandomDeckGenerator};

pub use crate::engine::{
    EndReason, EngineEvent, FlipOutcome, IgnoreReason, MatchEngine, ResolutionTicket,
    ResolveOutcome, Session, SessionPhase, SessionStats, TickOutcome,
};

pub use crate::clock::SessionDriver;

pub use crate::profile::{
    AccountService, BlobUserStore, FileBlobStore, GameSummary, LeaderboardEntry,
    MemoryBlobStore, ProfileRecorder, ScoreRecorder, StoreError, UserRecord, UserStore,
};
