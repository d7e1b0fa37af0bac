use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// The game a player (or pile owner) belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Blackjack,
    Poker,
    Solitaire,
}

/// Who decides this seat's actions. The engine never acts on a seat by itself;
/// the turn sequencer reads this to know whether to ask a person or an AI.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Ai,
}

/// Represents a player action during a poker betting round.
/// Actions can involve betting amounts or no-cost moves like check/fold.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Make a bet of specified amount
    Bet(u32),
    /// Raise the current bet by specified amount
    Raise(u32),
    /// Bet all remaining chips
    AllIn,
}

/// State shared by every seat regardless of game: a name, the owning game,
/// who controls it and the primary hand.
#[derive(Debug)]
pub struct Player {
    name: String,
    game: GameKind,
    controller: Controller,
    hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>, game: GameKind, controller: Controller) -> Self {
        Self {
            name: name.into(),
            game,
            controller,
            hand: Hand::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn controller(&self) -> Controller {
        self.controller
    }

    pub fn is_ai(&self) -> bool {
        self.controller == Controller::Ai
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
}
