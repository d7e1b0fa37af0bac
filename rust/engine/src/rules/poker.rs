use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::GameRule;
use crate::errors::GameError;
use crate::event::Event;
use crate::player::PlayerAction as A;
use crate::poker::BettingPhase;

/// Anything that can have folded out of the current hand.
pub trait HasFoldState {
    fn is_folded(&self) -> bool;
}

/// Seat list plus the betting phase it is in.
pub trait FoldTracking {
    type Seat: HasFoldState;

    fn phase(&self) -> BettingPhase;
    fn seats(&self) -> &[Self::Seat];
}

/// The hand ended because every other seat folded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameEndMatch {
    pub winner: usize,
}

/// Ends a hand early once a single seat is left holding cards.
///
/// Only evaluated in [`BettingPhase::Preflop`], [`BettingPhase::TurnBet`] and
/// [`BettingPhase::RiverBet`]. No seat left at all is an error: a correct
/// betting flow ends the hand before the last player could fold.
#[derive(Debug, Default)]
pub struct GameEndRule {
    on_match: Event<GameEndMatch>,
}

impl GameEndRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&GameEndMatch) + 'static,
    {
        self.on_match.subscribe(handler);
    }
}

impl<S: FoldTracking + ?Sized> GameRule<S> for GameEndRule {
    fn name(&self) -> &'static str {
        "game_end"
    }

    fn check(&mut self, state: &S) -> Result<(), GameError> {
        let phase = state.phase();
        if !phase.checks_fold_out() {
            return Ok(());
        }
        let mut remaining = state
            .seats()
            .iter()
            .enumerate()
            .filter(|(_, seat)| !seat.is_folded())
            .map(|(i, _)| i);
        match (remaining.next(), remaining.next()) {
            (None, _) => {
                error!(?phase, "every seat folded");
                Err(GameError::AllPlayersFolded)
            }
            (Some(winner), None) => {
                debug!(winner, ?phase, "fold-out");
                self.on_match.fire(&GameEndMatch { winner });
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise(u32),
    AllIn(u32),
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`]. Any
/// action the stack cannot cover in full becomes an all-in for the whole
/// stack.
///
/// # Errors
///
/// - [`GameError::InsufficientChips`] - check while facing a bet
/// - [`GameError::InvalidBetAmount`] - zero bet, or raise below `min_raise`
///
/// # Examples
///
/// ```
/// use cardtable_engine::rules::{validate_action, ValidatedAction};
/// use cardtable_engine::player::PlayerAction;
///
/// let result = validate_action(1000, 50, 100, PlayerAction::Call);
/// assert!(matches!(result, Ok(ValidatedAction::Call(50))));
///
/// // All-in when stack is insufficient for full raise
/// let result = validate_action(80, 50, 100, PlayerAction::Raise(100));
/// assert!(matches!(result, Ok(ValidatedAction::AllIn(80))));
/// ```
pub fn validate_action(
    stack: u32,
    to_call: u32,
    min_raise: u32,
    action: A,
) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check if to_call == 0 => Ok(ValidatedAction::Check),
        A::Check => Err(GameError::InsufficientChips),
        A::Call if stack <= to_call => Ok(ValidatedAction::AllIn(stack)),
        A::Call => Ok(ValidatedAction::Call(to_call)),
        A::Bet(0) => Err(GameError::InvalidBetAmount {
            amount: 0,
            minimum: 1,
        }),
        A::Bet(amount) if amount >= stack => Ok(ValidatedAction::AllIn(stack)),
        A::Bet(amount) => Ok(ValidatedAction::Bet(amount)),
        A::Raise(amount) if amount.saturating_add(to_call) >= stack => {
            Ok(ValidatedAction::AllIn(stack))
        }
        A::Raise(amount) if amount < min_raise => Err(GameError::InvalidBetAmount {
            amount,
            minimum: min_raise,
        }),
        A::Raise(amount) => Ok(ValidatedAction::Raise(amount)),
        A::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}
