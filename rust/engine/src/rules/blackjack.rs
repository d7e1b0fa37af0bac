use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GameRule;
use crate::blackjack::HandSlot;
use crate::cards::{Card, Rank};
use crate::errors::GameError;
use crate::event::Event;
use crate::hand::Hand;
use crate::valuation::HandValue;

/// Something holding up to two scored Blackjack hands.
pub trait ScoredHands {
    /// Cached valuation of the hand in `slot`, or `None` when that hand is
    /// not in play (the second hand before a split).
    fn scored(&self, slot: HandSlot) -> Option<HandValue>;
    fn is_bust(&self, slot: HandSlot) -> bool;
    fn is_blackjack(&self, slot: HandSlot) -> bool;
}

/// Ordered list of hand holders, walked by the Bust and BlackJack rules.
pub trait HandHolders {
    type Holder: ScoredHands;

    fn holders(&self) -> &[Self::Holder];
}

impl<P: ScoredHands> HandHolders for Vec<P> {
    type Holder = P;

    fn holders(&self) -> &[P] {
        self
    }
}

impl<P: ScoredHands> HandHolders for [P] {
    type Holder = P;

    fn holders(&self) -> &[P] {
        self
    }
}

/// Access to the dealer's face-up card.
pub trait DealerUpcard {
    fn upcard(&self) -> Option<Card>;
}

impl DealerUpcard for Hand {
    fn upcard(&self) -> Option<Card> {
        self.first()
    }
}

/// A rule hit on one hand of one seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HandMatch {
    pub seat: usize,
    pub slot: HandSlot,
}

/// Fires for every hand whose hard total went over 21 and that has not been
/// flagged bust yet.
#[derive(Debug, Default)]
pub struct BustRule {
    on_match: Event<HandMatch>,
}

impl BustRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&HandMatch) + 'static,
    {
        self.on_match.subscribe(handler);
    }
}

impl<S: HandHolders + ?Sized> GameRule<S> for BustRule {
    fn name(&self) -> &'static str {
        "bust"
    }

    fn check(&mut self, state: &S) -> Result<(), GameError> {
        for (seat, holder) in state.holders().iter().enumerate() {
            for slot in HandSlot::BOTH {
                let Some(value) = holder.scored(slot) else {
                    continue;
                };
                if !holder.is_bust(slot) && value.is_bust() {
                    debug!(seat, ?slot, hard = value.hard, "bust");
                    self.on_match.fire(&HandMatch { seat, slot });
                }
            }
        }
        Ok(())
    }
}

/// Fires for every two-card hand worth 21 that has not been flagged as a
/// blackjack yet.
#[derive(Debug, Default)]
pub struct BlackJackRule {
    on_match: Event<HandMatch>,
}

impl BlackJackRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&HandMatch) + 'static,
    {
        self.on_match.subscribe(handler);
    }
}

impl<S: HandHolders + ?Sized> GameRule<S> for BlackJackRule {
    fn name(&self) -> &'static str {
        "blackjack"
    }

    fn check(&mut self, state: &S) -> Result<(), GameError> {
        for (seat, holder) in state.holders().iter().enumerate() {
            for slot in HandSlot::BOTH {
                let Some(value) = holder.scored(slot) else {
                    continue;
                };
                if !holder.is_blackjack(slot) && value.is_blackjack() {
                    debug!(seat, ?slot, "blackjack");
                    self.on_match.fire(&HandMatch { seat, slot });
                }
            }
        }
        Ok(())
    }
}

/// One-shot check of the dealer's first card. The first time that card is
/// visible the rule fires if it is an Ace, then stays silent until reset.
#[derive(Debug, Default)]
pub struct InsuranceRule {
    done: bool,
    on_match: Event<()>,
}

impl InsuranceRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&()) + 'static,
    {
        self.on_match.subscribe(handler);
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl<S: DealerUpcard + ?Sized> GameRule<S> for InsuranceRule {
    fn name(&self) -> &'static str {
        "insurance"
    }

    fn check(&mut self, state: &S) -> Result<(), GameError> {
        if self.done {
            return Ok(());
        }
        let Some(upcard) = state.upcard() else {
            return Ok(());
        };
        if upcard.rank == Rank::Ace {
            debug!(%upcard, "insurance offered");
            self.on_match.fire(&());
        }
        self.done = true;
        Ok(())
    }

    fn reset(&mut self) {
        self.done = false;
    }
}
