//! Rule engine.
//!
//! A rule inspects game state it is handed at check time and reports what it
//! found through its own typed notification. Rules never change the state they
//! look at; whoever subscribes to a rule decides what a match means (flag a
//! hand as bust, award a pot, declare the game won).
//!
//! A [`RuleSet`] runs its rules once per evaluation tick, in the order they were
//! registered. The only way a tick stops early is a rule returning an error,
//! which is reserved for broken invariants such as
//! [`GameError::AllPlayersFolded`].

use std::fmt;

use crate::errors::GameError;

pub mod blackjack;
pub mod poker;
pub mod solitaire;

pub use blackjack::{
    BlackJackRule, BustRule, DealerUpcard, HandHolders, HandMatch, InsuranceRule, ScoredHands,
};
pub use poker::{
    validate_action, FoldTracking, GameEndMatch, GameEndRule, HasFoldState, ValidatedAction,
};
pub use solitaire::{FoundationPiles, WinRule};

/// A single independent check over some game state `S`.
pub trait GameRule<S: ?Sized> {
    fn name(&self) -> &'static str;

    /// Inspect `state` and fire this rule's notification zero or more times.
    fn check(&mut self, state: &S) -> Result<(), GameError>;

    /// Forget any per-round memory. Most rules keep none.
    fn reset(&mut self) {}
}

/// Ordered collection of rules evaluated together.
pub struct RuleSet<S: ?Sized> {
    rules: Vec<Box<dyn GameRule<S>>>,
}

impl<S: ?Sized> RuleSet<S> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register<R>(&mut self, rule: R) -> &mut Self
    where
        R: GameRule<S> + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn check_all(&mut self, state: &S) -> Result<(), GameError> {
        for rule in self.rules.iter_mut() {
            rule.check(state)?;
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for rule in self.rules.iter_mut() {
            rule.reset();
        }
    }
}

impl<S: ?Sized> Default for RuleSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> fmt::Debug for RuleSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Recorder;

    struct Tagger {
        tag: &'static str,
        log: Recorder<&'static str>,
    }

    impl GameRule<u32> for Tagger {
        fn name(&self) -> &'static str {
            self.tag
        }

        fn check(&mut self, state: &u32) -> Result<(), GameError> {
            if *state == 0 {
                return Err(GameError::AllPlayersFolded);
            }
            self.log.push(self.tag);
            Ok(())
        }
    }

    #[test]
    fn rules_run_in_registration_order() {
        let log = Recorder::new();
        let mut set: RuleSet<u32> = RuleSet::new();
        set.register(Tagger {
            tag: "first",
            log: log.clone(),
        })
        .register(Tagger {
            tag: "second",
            log: log.clone(),
        });

        set.check_all(&1).unwrap();
        set.check_all(&1).unwrap();
        assert_eq!(log.drain(), vec!["first", "second", "first", "second"]);
        assert_eq!(set.names(), vec!["first", "second"]);
    }

    #[test]
    fn an_error_aborts_the_tick() {
        let log = Recorder::new();
        let mut set: RuleSet<u32> = RuleSet::new();
        set.register(Tagger {
            tag: "only",
            log: log.clone(),
        });
        assert_eq!(set.check_all(&0), Err(GameError::AllPlayersFolded));
        assert!(log.is_empty());
    }
}
