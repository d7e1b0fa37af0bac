//! Blackjack hand valuation.
//!
//! A hand is scored "hard" (every Ace worth 1, every face card worth 10). A
//! separate flag says whether one Ace may instead count as 11 without going
//! over 21. The flag is not a second total: callers wanting the soft figure add
//! [`ACE_BONUS`] themselves, or use [`HandValue::best`].

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

pub const BLACKJACK: u32 = 21;
pub const ACE_BONUS: u32 = 10;

pub fn card_points(card: &Card) -> u32 {
    match card.rank {
        Rank::LittleJoker | Rank::BigJoker => 0,
        r if r.is_face() => 10,
        r => u32::from(r.number()),
    }
}

/// Sum with every Ace counted as 1.
pub fn hard_value(cards: &[Card]) -> u32 {
    cards.iter().map(card_points).sum()
}

/// True iff the hand holds an Ace and counting one of them as 11 stays at or
/// below 21.
pub fn can_count_ace_high(cards: &[Card]) -> bool {
    cards.iter().any(|c| c.rank == Rank::Ace) && hard_value(cards) + ACE_BONUS <= BLACKJACK
}

/// Cached valuation of one hand.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub hard: u32,
    pub ace_high: bool,
    pub cards: usize,
}

impl HandValue {
    pub fn of(cards: &[Card]) -> Self {
        Self {
            hard: hard_value(cards),
            ace_high: can_count_ace_high(cards),
            cards: cards.len(),
        }
    }

    /// Soft total when an Ace can be high, hard total otherwise.
    pub fn best(&self) -> u32 {
        if self.ace_high {
            self.hard + ACE_BONUS
        } else {
            self.hard
        }
    }

    pub fn is_bust(&self) -> bool {
        self.hard > BLACKJACK
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards == 2 && (self.hard == BLACKJACK || self.best() == BLACKJACK)
    }
}
