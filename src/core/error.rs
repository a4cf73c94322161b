//! Engine error types.
//!
//! Only genuinely invalid requests are errors. Redundant calls from a UI
//! layer (flipping a matched card, pausing twice, flipping while a pair is
//! pending) are no-ops reported through outcome enums instead.

use thiserror::Error;

use super::entity::CardId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// More pairs were requested than the palette has distinct symbols.
    #[error("Not enough symbols to deal {requested} pairs, palette has {available}")]
    InsufficientSymbols { requested: usize, available: usize },

    /// A flip referenced a card that is not on the table.
    #[error("No card with id {0} in the current session")]
    InvalidFlipRequest(CardId),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
