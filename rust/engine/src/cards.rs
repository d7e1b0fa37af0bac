use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four suits. Jokers still carry a suit so that every card has the
/// same shape, but no game reads it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    /// Stable index used to address per-suit piles.
    pub fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// Rank of a card. The thirteen numeric ranks run Ace (1) through King (13);
/// the two jokers sit above them and only appear in decks built with jokers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    LittleJoker,
    BigJoker,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        let rank = match v {
            1 => Rank::Ace,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::LittleJoker,
            15 => Rank::BigJoker,
            _ => return None,
        };
        Some(rank)
    }

    /// Numeric rank: Ace = 1 through King = 13.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::LittleJoker | Rank::BigJoker)
    }

    pub fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// The rank directly above this one in an Ace-to-King run.
    pub fn next(self) -> Option<Rank> {
        match self {
            Rank::King | Rank::LittleJoker | Rank::BigJoker => None,
            r => Rank::from_u8(r.number() + 1),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::LittleJoker => "jk",
            Rank::BigJoker => "JK",
        }
    }
}

/// A single playing card. Cards are plain values: two cards with the same suit
/// and rank are indistinguishable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn is_red(&self) -> bool {
        self.suit.is_red()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank.is_joker() {
            write!(f, "{}", self.rank.label())
        } else {
            write!(f, "{}{}", self.rank.label(), self.suit.symbol())
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// The 52 standard cards, suit by suit, Ace to King.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_numbers_run_ace_to_king() {
        assert_eq!(Rank::Ace.number(), 1);
        assert_eq!(Rank::Ten.number(), 10);
        assert_eq!(Rank::King.number(), 13);
        assert_eq!(Rank::from_u8(12), Some(Rank::Queen));
        assert_eq!(Rank::from_u8(0), None);
        assert_eq!(Rank::from_u8(16), None);
    }

    #[test]
    fn next_rank_stops_at_king() {
        assert_eq!(Rank::Ace.next(), Some(Rank::Two));
        assert_eq!(Rank::Queen.next(), Some(Rank::King));
        assert_eq!(Rank::King.next(), None);
        assert_eq!(Rank::BigJoker.next(), None);
    }

    #[test]
    fn display_uses_short_labels() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).to_string(), "AS");
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "10H");
        assert_eq!(Card::new(Suit::Clubs, Rank::BigJoker).to_string(), "JK");
    }

    #[test]
    fn full_deck_has_no_jokers() {
        let deck = full_deck();
        assert_eq!(deck.len(), 52);
        assert!(deck.iter().all(|c| !c.rank.is_joker()));
    }
}
