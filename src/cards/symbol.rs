//! Card faces and the palettes they are drawn from.
//!
//! A face always has a color. On the hardest difficulty it also has a shape,
//! and the shape alone decides whether two cards pair up; the colors of a
//! shape pair are picked independently and may differ.

use serde::{Deserialize, Serialize};

/// An RGB card color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    /// Create a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn rgb(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// Red, green and blue channels.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Colors dealt on every difficulty.
pub const COLOR_PALETTE: [Color; 6] = [
    Color::rgb(0xFF6B6B),
    Color::rgb(0x4ECDC4),
    Color::rgb(0xFFD166),
    Color::rgb(0x06D6A0),
    Color::rgb(0x118AB2),
    Color::rgb(0xEF476F),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Star,
    Heart,
}

impl Shape {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Diamond => "diamond",
            Shape::Star => "star",
            Shape::Heart => "heart",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shapes dealt on the hardest difficulty.
pub const SHAPE_PALETTE: [Shape; 6] = [
    Shape::Circle,
    Shape::Square,
    Shape::Triangle,
    Shape::Diamond,
    Shape::Star,
    Shape::Heart,
];

/// Which part of a face decides a pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchCriterion {
    Color,
    Shape,
}

/// The pairing key extracted from a face under some criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKey {
    Color(Color),
    Shape(Shape),
    /// A shape-criterion key on a face that has no shape. Never pairs.
    Missing,
}

/// What a card shows when face-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub color: Color,
    pub shape: Option<Shape>,
}

impl CardFace {
    /// A plain colored face.
    #[must_use]
    pub const fn colored(color: Color) -> Self {
        Self { color, shape: None }
    }

    /// A face showing `shape` drawn in `color`.
    #[must_use]
    pub const fn shaped(shape: Shape, color: Color) -> Self {
        Self {
            color,
            shape: Some(shape),
        }
    }

    #[must_use]
    pub fn match_key(&self, criterion: MatchCriterion) -> MatchKey {
        match criterion {
            MatchCriterion::Color => MatchKey::Color(self.color),
            MatchCriterion::Shape => self.shape.map_or(MatchKey::Missing, MatchKey::Shape),
        }
    }

    /// Whether two faces form a pair under `criterion`.
    #[must_use]
    pub fn pairs_with(&self, other: &CardFace, criterion: MatchCriterion) -> bool {
        let key = self.match_key(criterion);
        key != MatchKey::Missing && key == other.match_key(criterion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display() {
        assert_eq!(COLOR_PALETTE[0].to_string(), "#FF6B6B");
        assert_eq!(Color::rgb(0x06D6A0).to_string(), "#06D6A0");
    }

    #[test]
    fn test_color_channels() {
        assert_eq!(Color::rgb(0x118AB2).channels(), (0x11, 0x8A, 0xB2));
    }

    #[test]
    fn test_palettes_are_distinct() {
        let mut colors = COLOR_PALETTE.to_vec();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), COLOR_PALETTE.len());

        let mut shapes = SHAPE_PALETTE.to_vec();
        shapes.sort();
        shapes.dedup();
        assert_eq!(shapes.len(), SHAPE_PALETTE.len());
    }

    #[test]
    fn test_color_pairing() {
        let a = CardFace::colored(COLOR_PALETTE[1]);
        let b = CardFace::colored(COLOR_PALETTE[1]);
        let c = CardFace::colored(COLOR_PALETTE[2]);

        assert!(a.pairs_with(&b, MatchCriterion::Color));
        assert!(!a.pairs_with(&c, MatchCriterion::Color));
    }

    #[test]
    fn test_shape_pairing_ignores_color() {
        let a = CardFace::shaped(Shape::Star, COLOR_PALETTE[0]);
        let b = CardFace::shaped(Shape::Star, COLOR_PALETTE[4]);
        let c = CardFace::shaped(Shape::Heart, COLOR_PALETTE[0]);

        assert!(a.pairs_with(&b, MatchCriterion::Shape));
        assert!(!a.pairs_with(&c, MatchCriterion::Shape));
    }

    #[test]
    fn test_shapeless_faces_never_pair_by_shape() {
        let a = CardFace::colored(COLOR_PALETTE[0]);
        let b = CardFace::colored(COLOR_PALETTE[0]);

        assert!(!a.pairs_with(&b, MatchCriterion::Shape));
    }

    #[test]
    fn test_shape_serde_names() {
        let json = serde_json::to_string(&Shape::Diamond).unwrap();
        assert_eq!(json, "\"diamond\"");
    }
}
