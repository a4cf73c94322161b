//! Deck generation.
//!
//! The engine asks a `DeckGenerator` for a fresh deck at session start,
//! on restart, and on every level advance. Generators never touch session
//! state; they only return cards.
//!
//! ## Contract
//!
//! - Pair count is the difficulty's base pairs plus `level - 1`
//! - Every match key appears on exactly two cards
//! - Asking for more pairs than the palette holds is an error, never a
//!   silently smaller deck
//!
//! ```
//! use memory_match::core::{Difficulty, EngineConfig};
//! use memory_match::deck::{DeckGenerator, RandomDeckGenerator};
//!
//! let config = EngineConfig::default().with_seed(42);
//! let mut generator = RandomDeckGenerator::new(&config);
//!
//! let cards = generator.generate(Difficulty::Easy, 2).unwrap();
//! assert_eq!(cards.len(), 6);
//! ```

mod generator;

pub use generator::RandomDeckGenerator;

use crate::cards::Card;
use crate::core::{Difficulty, Result};

/// Source of decks for the match engine.
///
/// Implement this to deal fixed decks in tests or custom palettes in games.
pub trait DeckGenerator: Send {
    /// Deal the cards for `level` (1-based) of `difficulty`.
    fn generate(&mut self, difficulty: Difficulty, level: u32) -> Result<Vec<Card>>;
}
