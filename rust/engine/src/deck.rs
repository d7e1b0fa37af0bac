use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{all_suits, full_deck, Card, Rank};

/// How many standard decks make up the shoe, and whether each deck carries its
/// two jokers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DeckConfig {
    pub copies: u8,
    pub jokers: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            copies: 1,
            jokers: false,
        }
    }
}

impl DeckConfig {
    pub fn shoe(copies: u8) -> Self {
        Self {
            copies: copies.max(1),
            jokers: false,
        }
    }

    fn build(&self) -> Vec<Card> {
        let per_deck = if self.jokers { 54 } else { 52 };
        let mut cards = Vec::with_capacity(per_deck * self.copies as usize);
        for _ in 0..self.copies {
            cards.extend(full_deck());
            if self.jokers {
                let suits = all_suits();
                cards.push(Card::new(suits[0], Rank::LittleJoker));
                cards.push(Card::new(suits[3], Rank::BigJoker));
            }
        }
        cards
    }
}

/// A seeded deck (or multi-deck shoe). Dealing hands a card out by value; the
/// deck forgets it until the next reset or shuffle.
#[derive(Debug)]
pub struct Deck {
    config: DeckConfig,
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_config(DeckConfig::default(), seed)
    }

    pub fn with_config(config: DeckConfig, seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: config.build(),
            config,
            position: 0,
            rng,
        }
    }

    /// A deck that deals `cards` front to back until its next shuffle.
    pub fn stacked(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            config: DeckConfig::default(),
            cards,
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> DeckConfig {
        self.config
    }

    pub fn shuffle(&mut self) {
        self.cards = self.config.build();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    /// Rebuild and shuffle the deck without `in_play`, one copy removed per
    /// listed card.
    pub fn shuffle_without(&mut self, in_play: &[Card]) {
        let mut cards = self.config.build();
        for card in in_play {
            if let Some(i) = cards.iter().position(|c| c == card) {
                cards.swap_remove(i);
            }
        }
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = self.config.build();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }
}
