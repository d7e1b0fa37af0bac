use std::fmt;

use crate::cards::Card;
use crate::errors::GameError;
use crate::event::Event;

/// Structural change to a [`Hand`], fired once per card.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HandChange {
    Added(Card),
    Removed(Card),
}

/// Ordered cards owned by one player or pile.
///
/// A card lives in at most one hand: moving it is always a removal from one
/// hand followed by an add to another (see [`transfer`]). Every mutation is
/// announced to subscribers so that displays and counters can follow along.
#[derive(Default)]
pub struct Hand {
    cards: Vec<Card>,
    changed: Event<HandChange>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from cards without announcing them.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            changed: Event::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&HandChange) + 'static,
    {
        self.changed.subscribe(handler);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.changed.fire(&HandChange::Added(card));
    }

    pub fn extend<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        for card in cards {
            self.add(card);
        }
    }

    /// Remove the first card equal to `card`.
    pub fn remove(&mut self, card: &Card) -> Option<Card> {
        let index = self.cards.iter().position(|c| c == card)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(index);
        self.changed.fire(&HandChange::Removed(card));
        Some(card)
    }

    pub fn take_last(&mut self) -> Option<Card> {
        let card = self.cards.pop()?;
        self.changed.fire(&HandChange::Removed(card));
        Some(card)
    }

    /// Remove every card from `index` to the end, keeping their order.
    pub fn take_from(&mut self, index: usize) -> Vec<Card> {
        if index >= self.cards.len() {
            return Vec::new();
        }
        let tail = self.cards.split_off(index);
        for card in &tail {
            self.changed.fire(&HandChange::Removed(*card));
        }
        tail
    }

    pub fn clear(&mut self) -> Vec<Card> {
        self.take_from(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hand").field("cards", &self.cards).finish()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Move the card at `index` from one hand to another.
pub fn transfer(from: &mut Hand, index: usize, to: &mut Hand) -> Result<Card, GameError> {
    let card = from.remove_at(index).ok_or(GameError::EmptyPile)?;
    to.add(card);
    Ok(card)
}

/// Move every card from `index` onwards, preserving order.
pub fn transfer_run(from: &mut Hand, index: usize, to: &mut Hand) -> Result<usize, GameError> {
    let run = from.take_from(index);
    if run.is_empty() {
        return Err(GameError::EmptyPile);
    }
    let moved = run.len();
    to.extend(run);
    Ok(moved)
}
