//! # cardtable-ai: computer-controlled Blackjack seats
//!
//! An [`AiPlayer`] decides how a seat plays a hand and how much it stakes.
//! [`AiController`] wraps a policy and announces every decision it makes, so a
//! table front end can follow AI seats the same way it follows human input.
//!
//! ## Quick Start
//!
//! ```rust
//! use cardtable_ai::{create_ai, AiController, PlayDecision};
//! use cardtable_engine::cards::{Card, Rank, Suit};
//! use cardtable_engine::valuation::HandValue;
//!
//! let policy = create_ai("baseline").expect("known policy");
//! let mut ai = AiController::new(policy);
//!
//! let hand = [Card::new(Suit::Clubs, Rank::Ten), Card::new(Suit::Hearts, Rank::Six)];
//! assert_eq!(ai.ai_play(&HandValue::of(&hand)), PlayDecision::Hit);
//! ```

use cardtable_engine::blackjack::{BlackjackPlayer, HandSlot};
use cardtable_engine::event::Event;
use cardtable_engine::valuation::HandValue;
use rand::RngCore;
use tracing::debug;

pub mod baseline;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PlayDecision {
    Hit,
    Stand,
}

/// A Blackjack playing policy.
pub trait AiPlayer: Send + Sync {
    fn name(&self) -> &str;

    /// Decide the next move for a hand with the given cached value.
    fn play(&self, value: &HandValue) -> PlayDecision;

    /// Pick a stake for the next round. Zero means sit the round out.
    fn bet(&self, balance: u32, rng: &mut dyn RngCore) -> u32;
}

/// Runs a policy and fires its decisions to subscribers.
pub struct AiController {
    policy: Box<dyn AiPlayer>,
    decisions: Event<PlayDecision>,
}

impl AiController {
    pub fn new(policy: Box<dyn AiPlayer>) -> Self {
        Self {
            policy,
            decisions: Event::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.policy.name()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&PlayDecision) + 'static,
    {
        self.decisions.subscribe(handler);
    }

    pub fn ai_play(&mut self, value: &HandValue) -> PlayDecision {
        let decision = self.policy.play(value);
        debug!(ai = self.policy.name(), total = value.best(), ?decision, "ai play");
        self.decisions.fire(&decision);
        decision
    }

    /// [`ai_play`](Self::ai_play) for one of a seat's hands, using the
    /// values cached by its last `calculate_values`.
    pub fn ai_play_hand(&mut self, player: &BlackjackPlayer, slot: HandSlot) -> PlayDecision {
        self.ai_play(&player.value(slot))
    }

    pub fn ai_bet(&mut self, balance: u32, rng: &mut dyn RngCore) -> u32 {
        let stake = self.policy.bet(balance, rng);
        debug!(ai = self.policy.name(), balance, stake, "ai bet");
        stake
    }
}

/// Build a policy by name. Unknown names give `None`.
///
/// ```rust
/// use cardtable_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("oracle").is_none());
/// ```
pub fn create_ai(ai_type: &str) -> Option<Box<dyn AiPlayer>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        _ => None,
    }
}
