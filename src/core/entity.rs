//! Card identification.
//!
//! Every dealt card has a unique `CardId`. Ids are handed out by the deck
//! generator from a counter that only moves forward, so an id is never
//! reused: not across levels, and not across restarts of the same engine.
//!
//! ## Usage
//!
//! ```
//! use memory_match::core::{CardId, CardIdAllocator};
//!
//! let mut ids = CardIdAllocator::new();
//! let first = ids.next_id();
//! let second = ids.next_id();
//!
//! assert_ne!(first, second);
//! assert_eq!(first, CardId::new(0));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a dealt card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Forward-only source of card IDs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdAllocator {
    next: u32,
}

impl CardIdAllocator {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of IDs handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_sequential() {
        let mut ids = CardIdAllocator::new();

        assert_eq!(ids.next_id(), CardId(0));
        assert_eq!(ids.next_id(), CardId(1));
        assert_eq!(ids.next_id(), CardId(2));
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn test_allocator_never_repeats() {
        let mut ids = CardIdAllocator::new();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..1000 {
            assert!(seen.insert(ids.next_id()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(42)), "Card(42)");
    }

    #[test]
    fn test_serialization() {
        let id = CardId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
