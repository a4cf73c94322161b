//! Core engine types: card ids, RNG, configuration, errors.
//!
//! This module holds the building blocks every other module shares.
//! Difficulty tuning lives in `EngineConfig` rather than in the engine.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{Difficulty, DifficultyProfile, EngineConfig};
pub use entity::{CardId, CardIdAllocator};
pub use error::{EngineError, Result};
pub use rng::GameRng;
