//! Blackjack table: seats, the dealer, the shoe and the round state machine.
//!
//! A round runs Betting → PlayerTurns → DealerTurn → Settled. Hand flags are
//! never set by the rules themselves: [`BlackjackGame::check_rules`] runs the
//! rule set over the table, then applies the recorded matches (flag the hand
//! bust or blackjack, offer insurance) and re-broadcasts them as
//! [`BlackjackEvent`]s.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::{Deck, DeckConfig};
use crate::errors::GameError;
use crate::event::{Event, Recorder};
use crate::hand::{transfer, Hand};
use crate::player::{Controller, GameKind, Player};
use crate::rules::{
    BlackJackRule, BustRule, DealerUpcard, GameRule, HandHolders, HandMatch, InsuranceRule,
    RuleSet, ScoredHands,
};
use crate::valuation::HandValue;

/// Which of a seat's two hands. The second exists only after a split.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HandSlot {
    First,
    Second,
}

impl HandSlot {
    pub const BOTH: [HandSlot; 2] = [HandSlot::First, HandSlot::Second];

    fn index(self) -> usize {
        match self {
            HandSlot::First => 0,
            HandSlot::Second => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum HandStatus {
    Active,
    Standing,
    Bust,
    BlackJack,
}

/// A Blackjack seat (the dealer uses the same type with no balance).
///
/// Values are cached: after changing a hand, call
/// [`calculate_values`](Self::calculate_values) before reading
/// [`first_value`](Self::first_value) and friends. The `bust`/`blackjack`
/// flags record transitions that have already been handled and are only set
/// through [`mark_bust`](Self::mark_bust) / [`mark_blackjack`](Self::mark_blackjack).
#[derive(Debug)]
pub struct BlackjackPlayer {
    base: Player,
    second_hand: Hand,
    balance: u32,
    bets: [u32; 2],
    insurance: u32,
    values: [HandValue; 2],
    bust: [bool; 2],
    blackjack: [bool; 2],
    standing: [bool; 2],
    split: bool,
}

impl BlackjackPlayer {
    pub fn new(name: impl Into<String>, balance: u32, controller: Controller) -> Self {
        Self {
            base: Player::new(name, GameKind::Blackjack, controller),
            second_hand: Hand::new(),
            balance,
            bets: [0; 2],
            insurance: 0,
            values: [HandValue::default(); 2],
            bust: [false; 2],
            blackjack: [false; 2],
            standing: [false; 2],
            split: false,
        }
    }

    pub fn dealer() -> Self {
        Self::new("Dealer", 0, Controller::Ai)
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn controller(&self) -> Controller {
        self.base.controller()
    }

    pub fn is_ai(&self) -> bool {
        self.base.is_ai()
    }

    pub fn hand(&self) -> &Hand {
        self.base.hand()
    }

    pub fn second_hand(&self) -> &Hand {
        &self.second_hand
    }

    pub fn hand_in(&self, slot: HandSlot) -> &Hand {
        match slot {
            HandSlot::First => self.base.hand(),
            HandSlot::Second => &self.second_hand,
        }
    }

    pub fn hand_in_mut(&mut self, slot: HandSlot) -> &mut Hand {
        match slot {
            HandSlot::First => self.base.hand_mut(),
            HandSlot::Second => &mut self.second_hand,
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn bet(&self, slot: HandSlot) -> u32 {
        self.bets[slot.index()]
    }

    pub fn insurance(&self) -> u32 {
        self.insurance
    }

    /// Recompute the cached valuation of both hands.
    pub fn calculate_values(&mut self) {
        self.values[0] = HandValue::of(self.base.hand().cards());
        self.values[1] = if self.split {
            HandValue::of(self.second_hand.cards())
        } else {
            HandValue::default()
        };
    }

    pub fn first_value(&self) -> u32 {
        self.values[0].hard
    }

    pub fn first_value_consider_ace(&self) -> bool {
        self.values[0].ace_high
    }

    pub fn second_value(&self) -> u32 {
        self.values[1].hard
    }

    pub fn second_value_consider_ace(&self) -> bool {
        self.values[1].ace_high
    }

    pub fn value(&self, slot: HandSlot) -> HandValue {
        self.values[slot.index()]
    }

    pub fn bust(&self, slot: HandSlot) -> bool {
        self.bust[slot.index()]
    }

    pub fn blackjack(&self, slot: HandSlot) -> bool {
        self.blackjack[slot.index()]
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn mark_bust(&mut self, slot: HandSlot) {
        self.bust[slot.index()] = true;
    }

    pub fn mark_blackjack(&mut self, slot: HandSlot) {
        self.blackjack[slot.index()] = true;
    }

    pub fn status(&self, slot: HandSlot) -> HandStatus {
        let i = slot.index();
        if self.bust[i] {
            HandStatus::Bust
        } else if self.blackjack[i] {
            HandStatus::BlackJack
        } else if self.standing[i] {
            HandStatus::Standing
        } else {
            HandStatus::Active
        }
    }

    pub fn can_split(&self) -> bool {
        let cards = self.base.hand().cards();
        !self.split && cards.len() == 2 && cards[0].rank == cards[1].rank
    }

    fn in_play(&self, slot: HandSlot) -> bool {
        self.bets[slot.index()] > 0 && (slot == HandSlot::First || self.split)
    }

    fn stand(&mut self, slot: HandSlot) {
        self.standing[slot.index()] = true;
    }

    fn stake(&mut self, slot: HandSlot, amount: u32) {
        self.balance -= amount;
        self.bets[slot.index()] += amount;
    }

    fn split_hand(&mut self) -> Result<Card, GameError> {
        let card = transfer(self.base.hand_mut(), 1, &mut self.second_hand)?;
        self.split = true;
        Ok(card)
    }

    fn reset_round(&mut self) {
        self.base.hand_mut().clear();
        self.second_hand.clear();
        self.bets = [0; 2];
        self.insurance = 0;
        self.values = [HandValue::default(); 2];
        self.bust = [false; 2];
        self.blackjack = [false; 2];
        self.standing = [false; 2];
        self.split = false;
    }
}

impl ScoredHands for BlackjackPlayer {
    fn scored(&self, slot: HandSlot) -> Option<HandValue> {
        match slot {
            HandSlot::First => Some(self.values[0]),
            HandSlot::Second => self.split.then_some(self.values[1]),
        }
    }

    fn is_bust(&self, slot: HandSlot) -> bool {
        self.bust(slot)
    }

    fn is_blackjack(&self, slot: HandSlot) -> bool {
        self.blackjack(slot)
    }
}

/// Everything the Blackjack rules read.
#[derive(Debug)]
pub struct BlackjackTable {
    players: Vec<BlackjackPlayer>,
    dealer: BlackjackPlayer,
}

impl BlackjackTable {
    pub fn players(&self) -> &[BlackjackPlayer] {
        &self.players
    }

    pub fn dealer(&self) -> &BlackjackPlayer {
        &self.dealer
    }
}

impl HandHolders for BlackjackTable {
    type Holder = BlackjackPlayer;

    fn holders(&self) -> &[BlackjackPlayer] {
        &self.players
    }
}

impl DealerUpcard for BlackjackTable {
    fn upcard(&self) -> Option<Card> {
        self.dealer.hand().first()
    }
}

/// Cards set aside per hand when deciding whether the shoe can last a round.
const CARDS_PER_HAND_RESERVE: usize = 6;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlackjackConfig {
    /// Standard decks in the shoe.
    pub decks: u8,
    /// Seat capacity, dealer excluded.
    pub seats: usize,
    pub min_bet: u32,
    /// The dealer draws while its best total is below this.
    pub dealer_stands_on: u32,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            decks: 6,
            seats: 7,
            min_bet: 5,
            dealer_stands_on: 17,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    Betting,
    PlayerTurns,
    DealerTurn,
    Settled,
}

impl RoundPhase {
    pub fn name(self) -> &'static str {
        match self {
            RoundPhase::Betting => "betting",
            RoundPhase::PlayerTurns => "player turns",
            RoundPhase::DealerTurn => "dealer turn",
            RoundPhase::Settled => "settlement",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Push,
    Blackjack,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub seat: usize,
    pub slot: HandSlot,
    pub outcome: Outcome,
    pub bet: u32,
    /// Chips returned to the player, stake included.
    pub payout: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlackjackEvent {
    Dealt,
    Bust(HandMatch),
    BlackJack(HandMatch),
    InsuranceOffered,
    Turn { seat: usize, slot: HandSlot },
    DealerTurn,
    Settled(Vec<Settlement>),
}

#[derive(Debug, Copy, Clone)]
enum RuleMatch {
    Bust(HandMatch),
    BlackJack(HandMatch),
    Insurance,
}

pub struct BlackjackGame {
    config: BlackjackConfig,
    deck: Deck,
    table: BlackjackTable,
    rules: RuleSet<BlackjackTable>,
    matches: Recorder<RuleMatch>,
    phase: RoundPhase,
    turn: Option<(usize, HandSlot)>,
    insurance_offered: bool,
    settlements: Vec<Settlement>,
    round: u32,
    events: Event<BlackjackEvent>,
}

impl BlackjackGame {
    pub fn new(config: BlackjackConfig, seed: u64) -> Self {
        let mut deck = Deck::with_config(DeckConfig::shoe(config.decks), seed);
        deck.shuffle();
        Self::with_deck(config, deck)
    }

    /// Play from `deck` as given, without shuffling it first.
    pub fn with_deck(config: BlackjackConfig, deck: Deck) -> Self {
        let matches = Recorder::new();

        let mut bust = BustRule::new();
        let sink = matches.clone();
        bust.subscribe(move |m: &HandMatch| sink.push(RuleMatch::Bust(*m)));

        let mut blackjack = BlackJackRule::new();
        let sink = matches.clone();
        blackjack.subscribe(move |m: &HandMatch| sink.push(RuleMatch::BlackJack(*m)));

        let mut insurance = InsuranceRule::new();
        let sink = matches.clone();
        insurance.subscribe(move |_: &()| sink.push(RuleMatch::Insurance));

        let mut rules = RuleSet::new();
        rules
            .register(bust)
            .register(blackjack)
            .register(insurance);

        Self {
            config,
            deck,
            table: BlackjackTable {
                players: Vec::new(),
                dealer: BlackjackPlayer::dealer(),
            },
            rules,
            matches,
            phase: RoundPhase::Betting,
            turn: None,
            insurance_offered: false,
            settlements: Vec::new(),
            round: 1,
            events: Event::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&BlackjackEvent) + 'static,
    {
        self.events.subscribe(handler);
    }

    /// Register an extra rule, evaluated after the built-in ones.
    pub fn register_rule<R>(&mut self, rule: R)
    where
        R: GameRule<BlackjackTable> + 'static,
    {
        self.rules.register(rule);
    }

    pub fn config(&self) -> &BlackjackConfig {
        &self.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn table(&self) -> &BlackjackTable {
        &self.table
    }

    pub fn players(&self) -> &[BlackjackPlayer] {
        &self.table.players
    }

    pub fn player(&self, seat: usize) -> Result<&BlackjackPlayer, GameError> {
        self.table
            .players
            .get(seat)
            .ok_or(GameError::UnknownSeat(seat))
    }

    pub fn dealer(&self) -> &BlackjackPlayer {
        &self.table.dealer
    }

    /// Seat and hand whose turn it is.
    pub fn turn(&self) -> Option<(usize, HandSlot)> {
        self.turn
    }

    pub fn insurance_offered(&self) -> bool {
        self.insurance_offered
    }

    pub fn last_settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        balance: u32,
        controller: Controller,
    ) -> Result<usize, GameError> {
        self.require_phase(RoundPhase::Betting)?;
        if self.table.players.len() >= self.config.seats {
            return Err(GameError::TableFull {
                capacity: self.config.seats,
            });
        }
        self.table
            .players
            .push(BlackjackPlayer::new(name, balance, controller));
        Ok(self.table.players.len() - 1)
    }

    /// Set this seat's stake for the coming round. Zero sits the round out;
    /// a second call replaces the first.
    pub fn place_bet(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        self.require_phase(RoundPhase::Betting)?;
        let min_bet = self.config.min_bet;
        let player = self.seat_mut(seat)?;
        let previous = player.bets[0];
        if amount > 0 && amount < min_bet {
            return Err(GameError::InvalidBetAmount {
                amount,
                minimum: min_bet,
            });
        }
        if amount > player.balance + previous {
            return Err(GameError::InsufficientChips);
        }
        player.balance += previous;
        player.bets[0] = 0;
        player.stake(HandSlot::First, amount);
        Ok(())
    }

    /// Two cards to every seat with a stake, then to the dealer, one pass at a
    /// time.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.require_phase(RoundPhase::Betting)?;
        let seats: Vec<usize> = (0..self.table.players.len())
            .filter(|&s| self.table.players[s].bets[0] > 0)
            .collect();
        if seats.is_empty() {
            return Err(GameError::NoActiveBets);
        }
        for _ in 0..2 {
            for &seat in &seats {
                let card = self.draw()?;
                self.table.players[seat].base.hand_mut().add(card);
            }
            let card = self.draw()?;
            self.table.dealer.base.hand_mut().add(card);
        }
        self.calculate_values();
        self.phase = RoundPhase::PlayerTurns;
        info!(round = self.round, seats = seats.len(), "round dealt");
        self.events.fire(&BlackjackEvent::Dealt);
        self.check_rules()?;
        self.advance_turn(0)
    }

    /// Refresh the cached valuation of every hand at the table.
    pub fn calculate_values(&mut self) {
        for player in self.table.players.iter_mut() {
            player.calculate_values();
        }
        self.table.dealer.calculate_values();
    }

    /// Run every rule once over the table and apply what they report.
    pub fn check_rules(&mut self) -> Result<(), GameError> {
        self.rules.check_all(&self.table)?;
        for found in self.matches.drain() {
            self.apply_match(found);
        }
        Ok(())
    }

    pub fn hit(&mut self, seat: usize) -> Result<Card, GameError> {
        let slot = self.acting_slot(seat)?;
        let card = self.draw()?;
        let player = &mut self.table.players[seat];
        player.hand_in_mut(slot).add(card);
        player.calculate_values();
        debug!(seat, ?slot, %card, "hit");
        self.check_rules()?;
        if self.table.players[seat].status(slot) != HandStatus::Active {
            self.advance_turn(Self::position(seat, slot))?;
        }
        Ok(card)
    }

    pub fn stand(&mut self, seat: usize) -> Result<(), GameError> {
        let slot = self.acting_slot(seat)?;
        self.table.players[seat].stand(slot);
        debug!(seat, ?slot, "stand");
        self.advance_turn(Self::position(seat, slot))
    }

    /// Split a pair into two hands, staking the same bet again. Each hand
    /// then receives one more card.
    pub fn split(&mut self, seat: usize) -> Result<(), GameError> {
        let slot = self.acting_slot(seat)?;
        let player = &self.table.players[seat];
        if slot != HandSlot::First || !player.can_split() {
            return Err(GameError::CannotSplit);
        }
        let bet = player.bet(HandSlot::First);
        if player.balance < bet {
            return Err(GameError::InsufficientChips);
        }
        let player = &mut self.table.players[seat];
        player.stake(HandSlot::Second, bet);
        player.split_hand()?;
        for slot in HandSlot::BOTH {
            let card = self.draw()?;
            self.table.players[seat].hand_in_mut(slot).add(card);
        }
        self.table.players[seat].calculate_values();
        debug!(seat, bet, "split");
        self.check_rules()?;
        self.advance_turn(Self::position(seat, HandSlot::First))
    }

    /// Side bet of half the main stake against a dealer blackjack. Only
    /// available once offered and before the seat has drawn or split.
    pub fn buy_insurance(&mut self, seat: usize) -> Result<u32, GameError> {
        self.require_phase(RoundPhase::PlayerTurns)?;
        let offered = self.insurance_offered;
        let player = self.seat_mut(seat)?;
        let bet = player.bets[0];
        if !offered || bet == 0 || player.insurance > 0 || player.split || player.hand().len() != 2
        {
            return Err(GameError::InsuranceUnavailable);
        }
        let cost = bet / 2;
        if cost == 0 {
            return Err(GameError::InsuranceUnavailable);
        }
        if cost > player.balance {
            return Err(GameError::InsufficientChips);
        }
        player.balance -= cost;
        player.insurance = cost;
        Ok(cost)
    }

    /// Clear the table for the next round. The shoe is reshuffled once it
    /// runs below a quarter of its size or below what the seated table could
    /// draw in one round.
    pub fn new_round(&mut self) -> Result<(), GameError> {
        self.require_phase(RoundPhase::Settled)?;
        for player in self.table.players.iter_mut() {
            player.reset_round();
        }
        self.table.dealer.reset_round();
        self.rules.reset_all();
        self.matches.drain();
        self.insurance_offered = false;
        self.turn = None;
        self.settlements.clear();
        let reserve = (self.table.players.len() * 2 + 1) * CARDS_PER_HAND_RESERVE;
        let remaining = self.deck.remaining();
        if remaining * 4 < self.deck.size() || remaining < reserve {
            info!(remaining, reserve, "reshuffling shoe");
            self.deck.shuffle();
        }
        self.round += 1;
        self.phase = RoundPhase::Betting;
        Ok(())
    }

    fn apply_match(&mut self, found: RuleMatch) {
        let event = match found {
            RuleMatch::Bust(m) => {
                if let Some(player) = self.table.players.get_mut(m.seat) {
                    player.mark_bust(m.slot);
                }
                BlackjackEvent::Bust(m)
            }
            RuleMatch::BlackJack(m) => {
                if let Some(player) = self.table.players.get_mut(m.seat) {
                    player.mark_blackjack(m.slot);
                }
                BlackjackEvent::BlackJack(m)
            }
            RuleMatch::Insurance => {
                self.insurance_offered = true;
                BlackjackEvent::InsuranceOffered
            }
        };
        self.events.fire(&event);
    }

    fn position(seat: usize, slot: HandSlot) -> usize {
        seat * 2 + slot.index()
    }

    /// Move the turn to the first open hand at or after `from`, in seat order,
    /// first hand before second. With none left the dealer plays out.
    fn advance_turn(&mut self, from: usize) -> Result<(), GameError> {
        let total = self.table.players.len() * 2;
        let next = (from..total)
            .map(|pos| (pos / 2, HandSlot::BOTH[pos % 2]))
            .find(|&(seat, slot)| {
                let player = &self.table.players[seat];
                player.in_play(slot) && player.status(slot) == HandStatus::Active
            });
        match next {
            Some((seat, slot)) => {
                if self.turn != Some((seat, slot)) {
                    self.turn = Some((seat, slot));
                    debug!(seat, ?slot, "turn");
                    self.events.fire(&BlackjackEvent::Turn { seat, slot });
                }
                Ok(())
            }
            None => {
                self.turn = None;
                self.play_dealer()
            }
        }
    }

    fn play_dealer(&mut self) -> Result<(), GameError> {
        self.phase = RoundPhase::DealerTurn;
        self.events.fire(&BlackjackEvent::DealerTurn);
        let contested = self.table.players.iter().any(|p| {
            HandSlot::BOTH
                .iter()
                .any(|&slot| p.in_play(slot) && p.status(slot) == HandStatus::Standing)
        });
        if contested {
            while self.table.dealer.value(HandSlot::First).best() < self.config.dealer_stands_on {
                let card = self.draw()?;
                self.table.dealer.base.hand_mut().add(card);
                self.table.dealer.calculate_values();
            }
        }
        self.settle()
    }

    /// Pay every hand against the dealer. Balances only change once every
    /// payout is known to fit.
    fn settle(&mut self) -> Result<(), GameError> {
        let dealer = self.table.dealer.value(HandSlot::First);
        let dealer_blackjack = dealer.is_blackjack();
        let mut settlements = Vec::new();
        let mut balances = Vec::with_capacity(self.table.players.len());
        for (seat, player) in self.table.players.iter().enumerate() {
            let mut balance = u64::from(player.balance);
            if player.insurance > 0 && dealer_blackjack {
                balance += u64::from(player.insurance) * 3;
            }
            for slot in HandSlot::BOTH {
                if !player.in_play(slot) {
                    continue;
                }
                let bet = player.bet(slot);
                let outcome = if player.bust(slot) {
                    Outcome::Loss
                } else if player.blackjack(slot) {
                    if dealer_blackjack {
                        Outcome::Push
                    } else {
                        Outcome::Blackjack
                    }
                } else if dealer_blackjack {
                    Outcome::Loss
                } else if dealer.is_bust() {
                    Outcome::Win
                } else {
                    match player.value(slot).best().cmp(&dealer.best()) {
                        Ordering::Greater => Outcome::Win,
                        Ordering::Equal => Outcome::Push,
                        Ordering::Less => Outcome::Loss,
                    }
                };
                let stake = u64::from(bet);
                let payout = match outcome {
                    Outcome::Blackjack => stake + stake * 3 / 2,
                    Outcome::Win => stake * 2,
                    Outcome::Push => stake,
                    Outcome::Loss => 0,
                };
                balance += payout;
                let payout = u32::try_from(payout).map_err(|_| GameError::ChipOverflow)?;
                settlements.push(Settlement {
                    seat,
                    slot,
                    outcome,
                    bet,
                    payout,
                });
            }
            balances.push(u32::try_from(balance).map_err(|_| GameError::ChipOverflow)?);
        }
        for (player, balance) in self.table.players.iter_mut().zip(balances) {
            player.balance = balance;
        }
        info!(
            round = self.round,
            dealer = dealer.best(),
            hands = settlements.len(),
            "round settled"
        );
        self.phase = RoundPhase::Settled;
        self.events
            .fire(&BlackjackEvent::Settled(settlements.clone()));
        self.settlements = settlements;
        Ok(())
    }

    /// Next card from the shoe. An empty shoe is rebuilt from every card not
    /// on the table and reshuffled.
    fn draw(&mut self) -> Result<Card, GameError> {
        if let Some(card) = self.deck.deal_card() {
            return Ok(card);
        }
        let in_play = self.cards_in_play();
        warn!(
            round = self.round,
            in_play = in_play.len(),
            "shoe exhausted mid-round, reshuffling"
        );
        self.deck.shuffle_without(&in_play);
        self.deck.deal_card().ok_or(GameError::DeckExhausted)
    }

    fn cards_in_play(&self) -> Vec<Card> {
        self.table
            .players
            .iter()
            .chain(std::iter::once(&self.table.dealer))
            .flat_map(|p| p.hand().iter().chain(p.second_hand().iter()))
            .copied()
            .collect()
    }

    fn acting_slot(&self, seat: usize) -> Result<HandSlot, GameError> {
        self.require_phase(RoundPhase::PlayerTurns)?;
        if seat >= self.table.players.len() {
            return Err(GameError::UnknownSeat(seat));
        }
        match self.turn {
            Some((s, slot)) if s == seat => Ok(slot),
            Some((s, _)) => Err(GameError::NotPlayersTurn {
                expected: s,
                actual: seat,
            }),
            None => Err(GameError::NoHandInProgress),
        }
    }

    fn seat_mut(&mut self, seat: usize) -> Result<&mut BlackjackPlayer, GameError> {
        self.table
            .players
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat(seat))
    }

    fn require_phase(&self, phase: RoundPhase) -> Result<(), GameError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                phase: self.phase.name(),
            })
        }
    }
}
