//! Fixed-threshold dealer-style policy.

use cardtable_engine::valuation::HandValue;
use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::{AiPlayer, PlayDecision};

/// Stakes the baseline policy picks from, uniformly.
pub const DENOMINATIONS: [u32; 5] = [0, 5, 25, 100, 500];

/// Hits below 17 (counting an Ace high when it fits) and stakes a random
/// chip denomination. A denomination above the balance becomes no bet at all
/// rather than the largest affordable one.
#[derive(Debug, Clone)]
pub struct BaselineAI {
    stand_on: u32,
}

impl BaselineAI {
    pub fn new() -> Self {
        Self { stand_on: 17 }
    }

    pub fn with_threshold(stand_on: u32) -> Self {
        Self { stand_on }
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for BaselineAI {
    fn name(&self) -> &str {
        "BaselineAI"
    }

    fn play(&self, value: &HandValue) -> PlayDecision {
        if value.best() < self.stand_on {
            PlayDecision::Hit
        } else {
            PlayDecision::Stand
        }
    }

    fn bet(&self, balance: u32, rng: &mut dyn RngCore) -> u32 {
        match DENOMINATIONS.choose(rng) {
            Some(&stake) if stake <= balance => stake,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardtable_engine::cards::{Card, Rank, Suit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn value(ranks: &[Rank]) -> HandValue {
        let cards: Vec<Card> = ranks.iter().map(|&r| Card::new(Suit::Spades, r)).collect();
        HandValue::of(&cards)
    }

    #[test]
    fn soft_seventeen_stands_and_hard_sixteen_hits() {
        let ai = BaselineAI::new();
        assert_eq!(ai.play(&value(&[Rank::Ace, Rank::Six])), PlayDecision::Stand);
        assert_eq!(ai.play(&value(&[Rank::Ten, Rank::Six])), PlayDecision::Hit);
        assert_eq!(
            ai.play(&value(&[Rank::Ten, Rank::Six, Rank::Ace])),
            PlayDecision::Stand
        );
    }

    #[test]
    fn small_balances_never_bet() {
        let ai = BaselineAI::new();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(ai.bet(4, &mut rng), 0);
        }
    }

    #[test]
    fn bets_are_denominations_within_balance() {
        let ai = BaselineAI::new();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for _ in 0..500 {
            let stake = ai.bet(30, &mut rng);
            assert!(stake == 0 || stake == 5 || stake == 25, "got {stake}");
        }
    }
}
