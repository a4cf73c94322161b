//! Random deck generation.

use tracing::debug;

use super::DeckGenerator;
use crate::cards::{Card, CardFace, MatchCriterion, COLOR_PALETTE, SHAPE_PALETTE};
use crate::core::{CardIdAllocator, Difficulty, EngineConfig, EngineError, GameRng, Result};

/// Deals uniformly shuffled decks from the built-in palettes.
///
/// Holds its own id allocator, so ids stay unique for as long as the
/// generator lives, across levels and restarts alike.
#[derive(Clone, Debug)]
pub struct RandomDeckGenerator {
    config: EngineConfig,
    rng: GameRng,
    ids: CardIdAllocator,
}

impl RandomDeckGenerator {
    /// Create a generator seeded from `config.seed`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, GameRng::from_seed_option(config.seed))
    }

    /// Create a generator with an explicit RNG.
    #[must_use]
    pub fn with_rng(config: &EngineConfig, rng: GameRng) -> Self {
        Self {
            config: config.clone(),
            rng,
            ids: CardIdAllocator::new(),
        }
    }

    /// Pairs that `generate` would deal for this difficulty and level.
    #[must_use]
    pub fn pair_count(&self, difficulty: Difficulty, level: u32) -> usize {
        self.config.profile(difficulty).pairs_for_level(level)
    }

    fn pair_faces(&mut self, criterion: MatchCriterion, pairs: usize) -> Vec<(CardFace, CardFace)> {
        match criterion {
            MatchCriterion::Color => self
                .rng
                .choose_distinct(&COLOR_PALETTE, pairs)
                .into_iter()
                .map(|color| (CardFace::colored(color), CardFace::colored(color)))
                .collect(),
            MatchCriterion::Shape => {
                let shapes = self.rng.choose_distinct(&SHAPE_PALETTE, pairs);
                shapes
                    .into_iter()
                    .map(|shape| {
                        let first = self.random_color();
                        let second = self.random_color();
                        (CardFace::shaped(shape, first), CardFace::shaped(shape, second))
                    })
                    .collect()
            }
        }
    }

    fn random_color(&mut self) -> crate::cards::Color {
        // Palette is a non-empty const array
        *self.rng.choose(&COLOR_PALETTE).unwrap_or(&COLOR_PALETTE[0])
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(&mut self, difficulty: Difficulty, level: u32) -> Result<Vec<Card>> {
        let pairs = self.pair_count(difficulty, level);
        let available = difficulty.palette_size();
        if pairs > available {
            return Err(EngineError::InsufficientSymbols {
                requested: pairs,
                available,
            });
        }

        let mut cards = Vec::with_capacity(pairs * 2);
        for (first, second) in self.pair_faces(difficulty.match_criterion(), pairs) {
            cards.push(Card::new(self.ids.next_id(), first));
            cards.push(Card::new(self.ids.next_id(), second));
        }
        self.rng.shuffle(&mut cards);

        debug!(%difficulty, level, pairs, "dealt deck");
        Ok(cards)
    }
}
