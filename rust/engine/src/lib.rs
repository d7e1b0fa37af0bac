//! # cardtable-engine: rules and hand state for three card games
//!
//! Cards, hands and seats are shared by Blackjack, Texas Hold'em and Klondike
//! Solitaire. Each game keeps its own table state and a [`rules::RuleSet`]
//! that inspects that state after every change and reports what it finds
//! through typed notifications.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suit, Rank, Card
//! - [`deck`] - Seeded deck and multi-deck shoe (ChaCha20)
//! - [`event`] - Synchronous observer lists and recorders
//! - [`hand`] - Observable card collections and transfers between them
//! - [`player`] - Per-seat data shared by every game
//! - [`valuation`] - Blackjack hand values
//! - [`rules`] - Rule trait, rule sets and every game's rules
//! - [`blackjack`], [`poker`], [`solitaire`] - Game managers
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cardtable_engine::cards::{Card, Rank, Suit};
//! use cardtable_engine::valuation::HandValue;
//!
//! let cards = [
//!     Card::new(Suit::Spades, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//! ];
//! let value = HandValue::of(&cards);
//! assert_eq!(value.hard, 11);
//! assert!(value.ace_high);
//! assert!(value.is_blackjack());
//! ```
//!
//! ## Deterministic Play
//!
//! ```rust
//! use cardtable_engine::blackjack::{BlackjackConfig, BlackjackGame};
//! use cardtable_engine::player::Controller;
//!
//! let mut game = BlackjackGame::new(BlackjackConfig::default(), 42);
//! let seat = game.add_player("Ann", 500, Controller::Human).unwrap();
//! game.place_bet(seat, 25).unwrap();
//! game.deal().unwrap();
//! assert_eq!(game.dealer().hand().len(), 2);
//! ```

pub mod blackjack;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod event;
pub mod hand;
pub mod logger;
pub mod player;
pub mod poker;
pub mod rules;
pub mod solitaire;
pub mod valuation;
