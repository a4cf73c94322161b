//! Dealt cards - identity plus presentation state.
//!
//! A `Card`'s id and face never change after dealing. What does change is
//! whether it is showing, and whether its pair has been found. Once matched,
//! a card stays face-up for the rest of the level.

use serde::{Deserialize, Serialize};

use super::symbol::{CardFace, MatchCriterion};
use crate::core::CardId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id, never reused.
    pub id: CardId,

    /// What the card shows when face-up.
    pub face: CardFace,

    /// Is this card currently showing its face?
    pub is_face_up: bool,

    /// Has this card's pair been found? Permanent.
    pub is_matched: bool,

    /// Has this card ever been turned over?
    pub was_flipped: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, face: CardFace) -> Self {
        Self {
            id,
            face,
            is_face_up: false,
            is_matched: false,
            was_flipped: false,
        }
    }

    /// Whether a flip would turn this card over.
    #[must_use]
    pub fn is_flippable(&self) -> bool {
        !self.is_matched && !self.is_face_up
    }

    /// Whether this card pairs with `other` under `criterion`.
    #[must_use]
    pub fn pairs_with(&self, other: &Card, criterion: MatchCriterion) -> bool {
        self.id != other.id && self.face.pairs_with(&other.face, criterion)
    }

    pub(crate) fn turn_face_up(&mut self) {
        self.is_face_up = true;
        self.was_flipped = true;
    }

    pub(crate) fn turn_face_down(&mut self) {
        if !self.is_matched {
            self.is_face_up = false;
        }
    }

    pub(crate) fn mark_matched(&mut self) {
        self.is_matched = true;
        self.is_face_up = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Shape, COLOR_PALETTE};

    #[test]
    fn test_new_card_is_face_down() {
        let card = Card::new(CardId(1), CardFace::colored(COLOR_PALETTE[0]));

        assert!(!card.is_face_up);
        assert!(!card.is_matched);
        assert!(!card.was_flipped);
        assert!(card.is_flippable());
    }

    #[test]
    fn test_flip_sets_was_flipped() {
        let mut card = Card::new(CardId(1), CardFace::colored(COLOR_PALETTE[0]));

        card.turn_face_up();
        assert!(card.is_face_up);
        assert!(!card.is_flippable());

        card.turn_face_down();
        assert!(!card.is_face_up);
        assert!(card.was_flipped);
    }

    #[test]
    fn test_matched_card_never_turns_face_down() {
        let mut card = Card::new(CardId(1), CardFace::colored(COLOR_PALETTE[0]));

        card.turn_face_up();
        card.mark_matched();
        card.turn_face_down();

        assert!(card.is_face_up);
        assert!(card.is_matched);
        assert!(!card.is_flippable());
    }

    #[test]
    fn test_card_does_not_pair_with_itself() {
        let card = Card::new(CardId(3), CardFace::shaped(Shape::Star, COLOR_PALETTE[2]));

        assert!(!card.pairs_with(&card, MatchCriterion::Shape));
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(CardId(9), CardFace::shaped(Shape::Heart, COLOR_PALETTE[5]));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
