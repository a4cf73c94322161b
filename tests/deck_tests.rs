//! Deck generator property tests.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use memory_match::cards::{Card, MatchKey};
use memory_match::core::{Difficulty, EngineConfig, EngineError};
use memory_match::deck::{DeckGenerator, RandomDeckGenerator};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

/// Highest level the palette can deal for `difficulty`.
fn max_level(difficulty: Difficulty) -> u32 {
    let base = EngineConfig::default().profile(difficulty).base_pairs;
    (difficulty.palette_size() - base + 1) as u32
}

fn key_counts(cards: &[Card], difficulty: Difficulty) -> FxHashMap<MatchKey, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts
            .entry(card.face.match_key(difficulty.match_criterion()))
            .or_insert(0) += 1;
    }
    counts
}

proptest! {
    /// Every dealable deck has the right size and exactly two cards per key.
    #[test]
    fn test_every_key_appears_twice(
        seed in any::<u64>(),
        difficulty in difficulty(),
        level_offset in 0u32..8,
    ) {
        let level = 1 + level_offset % max_level(difficulty);
        let config = EngineConfig::default().with_seed(seed);
        let mut generator = RandomDeckGenerator::new(&config);

        let cards = generator.generate(difficulty, level).unwrap();
        let pairs = config.profile(difficulty).pairs_for_level(level);

        prop_assert_eq!(cards.len(), 2 * pairs);
        let counts = key_counts(&cards, difficulty);
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&n| n == 2));
        prop_assert!(!counts.contains_key(&MatchKey::Missing));
        prop_assert!(cards.iter().all(|card| !card.is_face_up && !card.is_matched));
    }

    /// Past the palette the generator refuses rather than dealing short.
    #[test]
    fn test_beyond_palette_is_error(
        seed in any::<u64>(),
        difficulty in difficulty(),
        extra in 1u32..5,
    ) {
        let level = max_level(difficulty) + extra;
        let mut generator = RandomDeckGenerator::new(&EngineConfig::default().with_seed(seed));

        let result = generator.generate(difficulty, level);

        prop_assert_eq!(
            result,
            Err(EngineError::InsufficientSymbols {
                requested: difficulty.palette_size() + extra as usize,
                available: difficulty.palette_size(),
            })
        );
    }

    #[test]
    fn test_seed_determines_deck(seed in any::<u64>(), difficulty in difficulty()) {
        let config = EngineConfig::default().with_seed(seed);
        let mut a = RandomDeckGenerator::new(&config);
        let mut b = RandomDeckGenerator::new(&config);

        prop_assert_eq!(a.generate(difficulty, 1).unwrap(), b.generate(difficulty, 1).unwrap());
    }
}

#[test]
fn test_max_levels_match_palette() {
    assert_eq!(max_level(Difficulty::Easy), 5);
    assert_eq!(max_level(Difficulty::Medium), 4);
    assert_eq!(max_level(Difficulty::Hard), 3);
}

#[test]
fn test_order_is_shuffled() {
    // Across many seeds, the two cards of the first pair dealt should not
    // always sit next to each other.
    let mut adjacent = 0;
    for seed in 0..50 {
        let mut generator = RandomDeckGenerator::new(&EngineConfig::default().with_seed(seed));
        let cards = generator.generate(Difficulty::Medium, 3).unwrap();
        let key = cards[0].face.match_key(Difficulty::Medium.match_criterion());
        if cards[1].face.match_key(Difficulty::Medium.match_criterion()) == key {
            adjacent += 1;
        }
    }
    assert!(adjacent < 50);
}
