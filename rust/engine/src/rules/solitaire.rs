use tracing::debug;

use super::GameRule;
use crate::errors::GameError;
use crate::event::Event;
use crate::hand::Hand;

/// Cards in a completed foundation: one full Ace-to-King run.
pub const FULL_FOUNDATION: usize = 13;

pub trait FoundationPiles {
    fn foundations(&self) -> &[Hand];
}

impl<const N: usize> FoundationPiles for [Hand; N] {
    fn foundations(&self) -> &[Hand] {
        self
    }
}

/// Fires when every foundation holds a full run.
#[derive(Debug, Default)]
pub struct WinRule {
    on_match: Event<()>,
}

impl WinRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&()) + 'static,
    {
        self.on_match.subscribe(handler);
    }
}

impl<S: FoundationPiles + ?Sized> GameRule<S> for WinRule {
    fn name(&self) -> &'static str {
        "win"
    }

    fn check(&mut self, state: &S) -> Result<(), GameError> {
        let piles = state.foundations();
        if !piles.is_empty() && piles.iter().all(|p| p.len() == FULL_FOUNDATION) {
            debug!(piles = piles.len(), "all foundations complete");
            self.on_match.fire(&());
        }
        Ok(())
    }
}
