//! Klondike Solitaire, draw-one.
//!
//! Layout: stock, waste, four foundations (one per suit, indexed by
//! [`Suit::index`]) and seven tableau columns. Every move removes cards from
//! one pile before adding them to another, and is followed by a rule check so
//! that [`WinRule`] can declare the game won.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::event::{Event, Recorder};
use crate::hand::{transfer, Hand};
use crate::rules::{FoundationPiles, RuleSet, WinRule};

pub const TABLEAU_COLUMNS: usize = 7;
pub const FOUNDATIONS: usize = 4;

/// A tableau column. The bottom `face_down` cards are hidden.
#[derive(Debug, Default)]
pub struct Column {
    cards: Hand,
    face_down: usize,
}

impl Column {
    pub fn new(cards: Vec<Card>, face_down: usize) -> Self {
        let face_down = face_down.min(cards.len().saturating_sub(1));
        Self {
            cards: Hand::from_cards(cards),
            face_down,
        }
    }

    pub fn cards(&self) -> &Hand {
        &self.cards
    }

    pub fn face_down(&self) -> usize {
        self.face_down
    }

    pub fn face_up(&self) -> &[Card] {
        &self.cards.cards()[self.face_down..]
    }

    pub fn top(&self) -> Option<Card> {
        self.cards.last()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn flip_if_exposed(&mut self) -> Option<Card> {
        if self.face_down > 0 && self.face_down == self.cards.len() {
            self.face_down -= 1;
            return self.cards.last();
        }
        None
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

#[derive(Debug, Default)]
pub struct SolitaireBoard {
    stock: Hand,
    waste: Hand,
    foundations: [Hand; FOUNDATIONS],
    tableau: [Column; TABLEAU_COLUMNS],
}

impl SolitaireBoard {
    pub fn stock(&self) -> &Hand {
        &self.stock
    }

    pub fn waste(&self) -> &Hand {
        &self.waste
    }

    pub fn foundation(&self, suit: Suit) -> &Hand {
        &self.foundations[suit.index()]
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.tableau.get(index)
    }

    pub fn columns(&self) -> &[Column] {
        &self.tableau
    }

    fn top_of(&self, pile: Pile) -> Option<Card> {
        match pile {
            Pile::Stock => self.stock.last(),
            Pile::Waste => self.waste.last(),
            Pile::Foundation(i) => self.foundations.get(i)?.last(),
            Pile::Tableau(i) => self.tableau.get(i)?.top(),
        }
    }

    fn hand_mut(&mut self, pile: Pile) -> Result<&mut Hand, GameError> {
        match pile {
            Pile::Stock => Ok(&mut self.stock),
            Pile::Waste => Ok(&mut self.waste),
            Pile::Foundation(i) => self
                .foundations
                .get_mut(i)
                .ok_or(GameError::IllegalMove("no such foundation")),
            Pile::Tableau(i) => self
                .tableau
                .get_mut(i)
                .map(|c| &mut c.cards)
                .ok_or(GameError::IllegalMove("no such column")),
        }
    }
}

impl FoundationPiles for SolitaireBoard {
    fn foundations(&self) -> &[Hand] {
        &self.foundations
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolitaireEvent {
    Moved { from: Pile, to: Pile, cards: Vec<Card> },
    Flipped { column: usize, card: Card },
    StockRecycled,
    Won,
}

pub struct Solitaire {
    board: SolitaireBoard,
    rules: RuleSet<SolitaireBoard>,
    wins: Recorder<()>,
    won: bool,
    moves: u32,
    events: Event<SolitaireEvent>,
}

impl Solitaire {
    /// Shuffle a fresh deck with `seed` and lay out the tableau: column `i`
    /// gets `i + 1` cards with only the top one face up. The rest is stock.
    pub fn deal(seed: u64) -> Result<Self, GameError> {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let mut columns: [Vec<Card>; TABLEAU_COLUMNS] = Default::default();
        for row in 0..TABLEAU_COLUMNS {
            for column in columns.iter_mut().skip(row) {
                column.push(deck.deal_card().ok_or(GameError::DeckExhausted)?);
            }
        }
        let mut stock = Vec::with_capacity(deck.remaining());
        while let Some(card) = deck.deal_card() {
            stock.push(card);
        }
        let tableau = columns.map(|cards| {
            let hidden = cards.len() - 1;
            Column::new(cards, hidden)
        });
        info!(seed, stock = stock.len(), "solitaire dealt");
        Ok(Self::from_piles(
            stock,
            Vec::new(),
            Default::default(),
            tableau,
        ))
    }

    /// Build a game from explicit piles. Useful for replaying a position.
    pub fn from_piles(
        stock: Vec<Card>,
        waste: Vec<Card>,
        foundations: [Vec<Card>; FOUNDATIONS],
        tableau: [Column; TABLEAU_COLUMNS],
    ) -> Self {
        let wins = Recorder::new();
        let mut win = WinRule::new();
        let sink = wins.clone();
        win.subscribe(move |_: &()| sink.push(()));
        let mut rules = RuleSet::new();
        rules.register(win);

        Self {
            board: SolitaireBoard {
                stock: Hand::from_cards(stock),
                waste: Hand::from_cards(waste),
                foundations: foundations.map(Hand::from_cards),
                tableau,
            },
            rules,
            wins,
            won: false,
            moves: 0,
            events: Event::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&SolitaireEvent) + 'static,
    {
        self.events.subscribe(handler);
    }

    pub fn board(&self) -> &SolitaireBoard {
        &self.board
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Turn the top stock card onto the waste. With the stock empty, the
    /// waste is turned back over into a new stock and `None` is returned.
    pub fn draw(&mut self) -> Result<Option<Card>, GameError> {
        if self.board.stock.is_empty() {
            if self.board.waste.is_empty() {
                return Err(GameError::EmptyPile);
            }
            let mut recycled = self.board.waste.clear();
            recycled.reverse();
            self.board.stock.extend(recycled);
            debug!(cards = self.board.stock.len(), "stock recycled");
            self.events.fire(&SolitaireEvent::StockRecycled);
            self.moves += 1;
            return Ok(None);
        }
        let top = self.board.stock.len() - 1;
        let card = transfer(&mut self.board.stock, top, &mut self.board.waste)?;
        self.record_move(Pile::Stock, Pile::Waste, vec![card]);
        self.check_rules()?;
        Ok(Some(card))
    }

    /// Move the top card of the waste or a tableau column onto its suit's
    /// foundation. Returns the foundation used.
    pub fn move_to_foundation(&mut self, from: Pile) -> Result<Pile, GameError> {
        if !matches!(from, Pile::Waste | Pile::Tableau(_)) {
            return Err(GameError::IllegalMove("foundation moves start from waste or tableau"));
        }
        let card = self.board.top_of(from).ok_or(GameError::EmptyPile)?;
        let to = Pile::Foundation(card.suit.index());
        let foundation = &self.board.foundations[card.suit.index()];
        let fits = match foundation.last() {
            None => card.rank == Rank::Ace,
            Some(top) => top.suit == card.suit && top.rank.next() == Some(card.rank),
        };
        if !fits {
            return Err(GameError::IllegalMove("card does not continue the foundation"));
        }
        self.move_cards(from, to, 1)?;
        Ok(to)
    }

    /// Move `count` cards onto tableau column `to`. Runs of several cards can
    /// only come from another column's face-up cards.
    pub fn move_to_tableau(&mut self, from: Pile, count: usize, to: usize) -> Result<(), GameError> {
        if count == 0 {
            return Err(GameError::IllegalMove("nothing to move"));
        }
        let moving = match from {
            Pile::Stock => return Err(GameError::IllegalMove("cannot play from the stock")),
            Pile::Tableau(i) => {
                let column = self
                    .board
                    .tableau
                    .get(i)
                    .ok_or(GameError::IllegalMove("no such column"))?;
                let face_up = column.face_up();
                if face_up.is_empty() {
                    return Err(GameError::EmptyPile);
                }
                if count > face_up.len() {
                    return Err(GameError::IllegalMove("run includes face-down cards"));
                }
                face_up[face_up.len() - count]
            }
            Pile::Waste | Pile::Foundation(_) => {
                if count != 1 {
                    return Err(GameError::IllegalMove("only one card can leave this pile"));
                }
                self.board.top_of(from).ok_or(GameError::EmptyPile)?
            }
        };
        let target = self
            .board
            .tableau
            .get(to)
            .ok_or(GameError::IllegalMove("no such column"))?;
        let fits = match target.top() {
            None => moving.rank == Rank::King,
            Some(top) => top.is_red() != moving.is_red() && moving.rank.next() == Some(top.rank),
        };
        if !fits {
            return Err(GameError::IllegalMove("card does not fit on that column"));
        }
        self.move_cards(from, Pile::Tableau(to), count)
    }

    /// Evaluate the win rule once.
    pub fn check_rules(&mut self) -> Result<(), GameError> {
        self.rules.check_all(&self.board)?;
        let fired = !self.wins.drain().is_empty();
        if fired && !self.won {
            self.won = true;
            info!(moves = self.moves, "solitaire won");
            self.events.fire(&SolitaireEvent::Won);
        }
        Ok(())
    }

    fn move_cards(&mut self, from: Pile, to: Pile, count: usize) -> Result<(), GameError> {
        if from == to {
            return Err(GameError::IllegalMove("source and target are the same pile"));
        }
        let source = self.board.hand_mut(from)?;
        let start = source.len().checked_sub(count).ok_or(GameError::EmptyPile)?;
        let cards = source.take_from(start);
        self.board.hand_mut(to)?.extend(cards.iter().copied());
        self.record_move(from, to, cards);
        if let Pile::Tableau(column) = from {
            if let Some(card) = self.board.tableau[column].flip_if_exposed() {
                debug!(column, %card, "flipped");
                self.events.fire(&SolitaireEvent::Flipped { column, card });
            }
        }
        self.check_rules()
    }

    fn record_move(&mut self, from: Pile, to: Pile, cards: Vec<Card>) {
        self.moves += 1;
        debug!(?from, ?to, count = cards.len(), "move");
        self.events.fire(&SolitaireEvent::Moved { from, to, cards });
    }
}
