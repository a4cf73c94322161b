//! Card system: faces, palettes, and dealt cards.
//!
//! ## Key Types
//!
//! - `CardFace`: What a card shows (a color, plus a shape on Hard)
//! - `MatchCriterion`: Whether color or shape decides a pair
//! - `Card`: A dealt card with its face-up/matched state

pub mod card;
pub mod symbol;

pub use card::Card;
pub use symbol::{CardFace, Color, MatchCriterion, MatchKey, Shape, COLOR_PALETTE, SHAPE_PALETTE};
