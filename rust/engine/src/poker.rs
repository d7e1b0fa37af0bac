//! Texas Hold'em hand sequencing for up to nine seats.
//!
//! The manager deals hole cards, posts blinds, tracks whose turn it is and
//! walks the hand through its betting phases. Hand strength is not ranked
//! here: at showdown the caller names the winners via
//! [`PokerGame::award_pot`]. A hand that ends because everyone else folded is
//! settled automatically through [`GameEndRule`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::event::{Event, Recorder};
use crate::hand::Hand;
use crate::player::{Controller, GameKind, Player, PlayerAction};
use crate::rules::{
    validate_action, FoldTracking, GameEndMatch, GameEndRule, GameRule, HasFoldState, RuleSet,
    ValidatedAction,
};

/// Phase of a single hand.
///
/// ```
/// use cardtable_engine::poker::BettingPhase;
///
/// assert_eq!(BettingPhase::Preflop.next(), BettingPhase::FlopBet);
/// assert!(BettingPhase::RiverBet.is_betting());
/// assert!(!BettingPhase::FlopBet.checks_fold_out());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BettingPhase {
    Waiting,
    Preflop,
    FlopBet,
    TurnBet,
    RiverBet,
    Showdown,
    Finished,
}

impl BettingPhase {
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            BettingPhase::Preflop
                | BettingPhase::FlopBet
                | BettingPhase::TurnBet
                | BettingPhase::RiverBet
        )
    }

    /// Phases in which a hand can end early on a fold-out.
    pub fn checks_fold_out(self) -> bool {
        matches!(
            self,
            BettingPhase::Preflop | BettingPhase::TurnBet | BettingPhase::RiverBet
        )
    }

    pub fn next(self) -> BettingPhase {
        match self {
            BettingPhase::Waiting => BettingPhase::Preflop,
            BettingPhase::Preflop => BettingPhase::FlopBet,
            BettingPhase::FlopBet => BettingPhase::TurnBet,
            BettingPhase::TurnBet => BettingPhase::RiverBet,
            BettingPhase::RiverBet => BettingPhase::Showdown,
            BettingPhase::Showdown | BettingPhase::Finished => BettingPhase::Finished,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BettingPhase::Waiting => "waiting",
            BettingPhase::Preflop => "preflop",
            BettingPhase::FlopBet => "flop",
            BettingPhase::TurnBet => "turn",
            BettingPhase::RiverBet => "river",
            BettingPhase::Showdown => "showdown",
            BettingPhase::Finished => "finished",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    Active,
    Folded,
    AllIn,
}

#[derive(Debug)]
pub struct PokerPlayer {
    base: Player,
    balance: u32,
    /// Chips put in during the current betting phase.
    bet: u32,
    /// Chips put in during the whole hand.
    committed: u32,
    state: PlayerState,
    acted: bool,
}

impl PokerPlayer {
    pub fn new(name: impl Into<String>, balance: u32, controller: Controller) -> Self {
        Self {
            base: Player::new(name, GameKind::Poker, controller),
            balance,
            bet: 0,
            committed: 0,
            state: PlayerState::Active,
            acted: false,
        }
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn controller(&self) -> Controller {
        self.base.controller()
    }

    pub fn hand(&self) -> &Hand {
        self.base.hand()
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn committed(&self) -> u32 {
        self.committed
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Move up to `amount` chips from the balance into the current bet and
    /// return how many actually moved. An emptied balance means all-in.
    fn put_in(&mut self, amount: u32) -> u32 {
        let amount = amount.min(self.balance);
        self.balance -= amount;
        self.bet += amount;
        self.committed += amount;
        if self.balance == 0 {
            self.state = PlayerState::AllIn;
        }
        amount
    }

    fn can_act(&self) -> bool {
        self.state == PlayerState::Active
    }
}

impl HasFoldState for PokerPlayer {
    fn is_folded(&self) -> bool {
        self.state == PlayerState::Folded
    }
}

/// Seats plus current phase, as seen by the poker rules.
#[derive(Debug)]
pub struct PokerTable {
    phase: BettingPhase,
    players: Vec<PokerPlayer>,
}

impl FoldTracking for PokerTable {
    type Seat = PokerPlayer;

    fn phase(&self) -> BettingPhase {
        self.phase
    }

    fn seats(&self) -> &[PokerPlayer] {
        &self.players
    }
}

/// One pot and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PokerConfig {
    pub seats: usize,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            seats: 9,
            small_blind: 50,
            big_blind: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PokerEvent {
    HandStarted { hand: u32, button: usize },
    Blind { seat: usize, amount: u32 },
    Acted { seat: usize, action: ValidatedAction },
    PhaseChanged(BettingPhase),
    BoardDealt(Vec<Card>),
    FoldOutWin { seat: usize, pot: u32 },
    PotAwarded { seat: usize, amount: u32 },
}

pub struct PokerGame {
    config: PokerConfig,
    deck: Deck,
    table: PokerTable,
    rules: RuleSet<PokerTable>,
    fold_outs: Recorder<GameEndMatch>,
    board: Hand,
    pot: u32,
    button: Option<usize>,
    to_act: Option<usize>,
    current_bet: u32,
    min_raise: u32,
    hand_number: u32,
    events: Event<PokerEvent>,
}

impl PokerGame {
    pub fn new(config: PokerConfig, seed: u64) -> Self {
        let mut game_end = GameEndRule::new();
        let fold_outs = Recorder::new();
        let sink = fold_outs.clone();
        game_end.subscribe(move |m: &GameEndMatch| sink.push(*m));

        let mut rules = RuleSet::new();
        rules.register(game_end);

        Self {
            config,
            deck: Deck::new_with_seed(seed),
            table: PokerTable {
                phase: BettingPhase::Waiting,
                players: Vec::new(),
            },
            rules,
            fold_outs,
            board: Hand::new(),
            pot: 0,
            button: None,
            to_act: None,
            current_bet: 0,
            min_raise: config.big_blind,
            hand_number: 0,
            events: Event::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&PokerEvent) + 'static,
    {
        self.events.subscribe(handler);
    }

    pub fn register_rule<R>(&mut self, rule: R)
    where
        R: GameRule<PokerTable> + 'static,
    {
        self.rules.register(rule);
    }

    pub fn config(&self) -> &PokerConfig {
        &self.config
    }

    pub fn phase(&self) -> BettingPhase {
        self.table.phase
    }

    pub fn players(&self) -> &[PokerPlayer] {
        &self.table.players
    }

    pub fn player(&self, seat: usize) -> Result<&PokerPlayer, GameError> {
        self.table
            .players
            .get(seat)
            .ok_or(GameError::UnknownSeat(seat))
    }

    pub fn board(&self) -> &[Card] {
        self.board.cards()
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn button(&self) -> Option<usize> {
        self.button
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    /// Seat expected to act next, if the betting round is still open.
    pub fn current_player(&self) -> Option<usize> {
        self.to_act
    }

    /// Chips `seat` must add to stay in.
    pub fn to_call(&self, seat: usize) -> Result<u32, GameError> {
        let player = self.player(seat)?;
        Ok(self.current_bet.saturating_sub(player.bet))
    }

    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        balance: u32,
        controller: Controller,
    ) -> Result<usize, GameError> {
        self.require_between_hands()?;
        if self.table.players.len() >= self.config.seats {
            return Err(GameError::TableFull {
                capacity: self.config.seats,
            });
        }
        self.table
            .players
            .push(PokerPlayer::new(name, balance, controller));
        Ok(self.table.players.len() - 1)
    }

    /// Start a new hand: move the button, shuffle, deal two hole cards per
    /// funded seat and post the blinds. Seats without chips sit the hand out
    /// as folded.
    pub fn deal(&mut self) -> Result<(), GameError> {
        self.require_between_hands()?;
        let funded = self
            .table
            .players
            .iter()
            .filter(|p| p.balance > 0)
            .count();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        for player in self.table.players.iter_mut() {
            player.base.hand_mut().clear();
            player.bet = 0;
            player.committed = 0;
            player.acted = false;
            player.state = if player.balance > 0 {
                PlayerState::Active
            } else {
                PlayerState::Folded
            };
        }
        self.board.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.hand_number += 1;

        let button = match self.button {
            Some(previous) => self.next_in_hand(previous),
            None => self.table.players.iter().position(|p| p.can_act()),
        }
        .ok_or(GameError::NotEnoughPlayers)?;
        self.button = Some(button);

        self.deck.shuffle();
        for _ in 0..2 {
            let mut seat = button;
            for _ in 0..funded {
                seat = self.next_in_hand(seat).ok_or(GameError::NotEnoughPlayers)?;
                let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.table.players[seat].base.hand_mut().add(card);
            }
        }

        info!(hand = self.hand_number, button, seats = funded, "hand started");
        self.events.fire(&PokerEvent::HandStarted {
            hand: self.hand_number,
            button,
        });

        let small = if funded == 2 {
            button
        } else {
            self.next_in_hand(button).ok_or(GameError::NotEnoughPlayers)?
        };
        let big = self.next_in_hand(small).ok_or(GameError::NotEnoughPlayers)?;
        self.post_blind(small, self.config.small_blind);
        self.post_blind(big, self.config.big_blind);
        self.current_bet = self.config.big_blind;

        self.set_phase(BettingPhase::Preflop);
        self.check_rules()?;
        if self.table.phase == BettingPhase::Preflop {
            self.to_act = self.next_to_act(big);
        }
        Ok(())
    }

    /// Apply `action` for `seat`. Only the seat whose turn it is may act.
    pub fn act(&mut self, seat: usize, action: PlayerAction) -> Result<ValidatedAction, GameError> {
        if !self.table.phase.is_betting() {
            return Err(self.wrong_phase());
        }
        let player = self.player(seat)?;
        match player.state {
            PlayerState::Folded => return Err(GameError::PlayerAlreadyFolded),
            PlayerState::AllIn => return Err(GameError::IllegalAction),
            PlayerState::Active => {}
        }
        match self.to_act {
            Some(expected) if expected == seat => {}
            Some(expected) => {
                return Err(GameError::NotPlayersTurn {
                    expected,
                    actual: seat,
                })
            }
            None => return Err(GameError::NoHandInProgress),
        }

        let to_call = self.current_bet.saturating_sub(player.bet);
        let validated = validate_action(player.balance, to_call, self.min_raise, action)?;
        match validated {
            ValidatedAction::Fold if self.contenders().len() <= 1 => {
                return Err(GameError::IllegalAction)
            }
            ValidatedAction::Bet(_) if self.current_bet > 0 => {
                return Err(GameError::IllegalAction)
            }
            ValidatedAction::Raise(_) if self.current_bet == 0 => {
                return Err(GameError::IllegalAction)
            }
            ValidatedAction::Bet(amount) if amount < self.config.big_blind => {
                return Err(GameError::InvalidBetAmount {
                    amount,
                    minimum: self.config.big_blind,
                })
            }
            _ => {}
        }
        // After an incomplete all-in raise, seats that already acted may only
        // call or fold.
        let raises = match validated {
            ValidatedAction::Raise(_) => true,
            ValidatedAction::AllIn(amount) => player.bet + amount > self.current_bet,
            _ => false,
        };
        if raises && player.acted {
            return Err(GameError::IllegalAction);
        }

        let mut reopened = false;
        match validated {
            ValidatedAction::Fold => self.table.players[seat].state = PlayerState::Folded,
            ValidatedAction::Check => {}
            ValidatedAction::Call(amount) => {
                self.pot += self.table.players[seat].put_in(amount);
            }
            ValidatedAction::Bet(amount) => {
                self.pot += self.table.players[seat].put_in(amount);
                self.current_bet = self.table.players[seat].bet;
                self.min_raise = amount.max(self.config.big_blind);
                reopened = true;
            }
            ValidatedAction::Raise(amount) => {
                self.pot += self.table.players[seat].put_in(to_call + amount);
                self.current_bet = self.table.players[seat].bet;
                self.min_raise = amount;
                reopened = true;
            }
            ValidatedAction::AllIn(amount) => {
                self.pot += self.table.players[seat].put_in(amount);
                let total = self.table.players[seat].bet;
                if total > self.current_bet {
                    let raise_by = total - self.current_bet;
                    if raise_by >= self.min_raise {
                        self.min_raise = raise_by;
                        reopened = true;
                    }
                    self.current_bet = total;
                }
            }
        }

        if reopened {
            for (i, other) in self.table.players.iter_mut().enumerate() {
                if i != seat && other.can_act() {
                    other.acted = false;
                }
            }
        }
        self.table.players[seat].acted = true;
        debug!(seat, action = ?validated, pot = self.pot, "acted");
        self.events.fire(&PokerEvent::Acted {
            seat,
            action: validated.clone(),
        });

        self.check_rules()?;
        if self.table.phase.is_betting() {
            self.to_act = self.next_to_act(seat);
        }
        Ok(validated)
    }

    pub fn is_betting_round_complete(&self) -> bool {
        self.table.phase.is_betting() && self.to_act.is_none()
    }

    /// Close the betting round and move on, dealing the board cards the new
    /// phase needs (burn one, then three for the flop or one for turn and
    /// river).
    pub fn advance_phase(&mut self) -> Result<BettingPhase, GameError> {
        if !self.table.phase.is_betting() {
            return Err(self.wrong_phase());
        }
        if self.to_act.is_some() {
            return Err(GameError::BettingRoundOpen);
        }

        self.return_uncalled();
        for player in self.table.players.iter_mut() {
            player.bet = 0;
            player.acted = false;
        }
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;

        let next = self.table.phase.next();
        let count = match next {
            BettingPhase::FlopBet => 3,
            BettingPhase::TurnBet | BettingPhase::RiverBet => 1,
            _ => 0,
        };
        if count > 0 {
            self.deck.burn_card();
            let mut dealt = Vec::with_capacity(count);
            for _ in 0..count {
                let card = self.deck.deal_card().ok_or(GameError::DeckExhausted)?;
                self.board.add(card);
                dealt.push(card);
            }
            self.events.fire(&PokerEvent::BoardDealt(dealt));
        }

        self.set_phase(next);
        self.check_rules()?;
        if self.table.phase.is_betting() {
            self.to_act = match self.button {
                Some(button) => self.next_to_act(button),
                None => None,
            };
        }
        Ok(self.table.phase)
    }

    /// Seats still holding cards.
    pub fn contenders(&self) -> Vec<usize> {
        self.table
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_folded())
            .map(|(i, _)| i)
            .collect()
    }

    /// The pot split into a main pot and side pots by how much each contender
    /// committed. A pot is open only to contenders who put in at least its
    /// level.
    pub fn pots(&self) -> Vec<Pot> {
        let players = &self.table.players;
        let contenders = self.contenders();
        let mut levels: Vec<u32> = contenders
            .iter()
            .map(|&seat| players[seat].committed)
            .filter(|&committed| committed > 0)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
        let mut floor = 0;
        for level in levels {
            let amount = players
                .iter()
                .map(|p| p.committed.min(level) - p.committed.min(floor))
                .sum();
            let eligible = contenders
                .iter()
                .copied()
                .filter(|&seat| players[seat].committed >= level)
                .collect();
            pots.push(Pot { amount, eligible });
            floor = level;
        }

        let counted: u32 = pots.iter().map(|p| p.amount).sum();
        if self.pot > counted {
            let rest = self.pot - counted;
            match pots.last_mut() {
                Some(last) => last.amount += rest,
                None => pots.push(Pot {
                    amount: rest,
                    eligible: contenders,
                }),
            }
        }
        pots
    }

    /// Split the pot between `winners` at showdown. Odd chips go to the first
    /// winner listed. With side pots, see [`award_ranked`](Self::award_ranked).
    pub fn award_pot(&mut self, winners: &[usize]) -> Result<(), GameError> {
        self.award_ranked(&[winners])
    }

    /// Award every pot at showdown. `ranking` lists seats best hand first,
    /// tied seats sharing a tier. Each pot goes to the best tier with a seat
    /// eligible for it; a pot no ranked seat can win goes to its only
    /// eligible seat.
    ///
    /// ```
    /// use cardtable_engine::player::{Controller, PlayerAction};
    /// use cardtable_engine::poker::{BettingPhase, PokerConfig, PokerGame};
    ///
    /// let mut game = PokerGame::new(PokerConfig::default(), 1);
    /// game.add_player("Short", 200, Controller::Human).unwrap();
    /// game.add_player("Deep", 2000, Controller::Human).unwrap();
    /// game.deal().unwrap();
    /// game.act(0, PlayerAction::AllIn).unwrap();
    /// game.act(1, PlayerAction::Call).unwrap();
    /// while game.phase() != BettingPhase::Showdown {
    ///     game.advance_phase().unwrap();
    /// }
    /// game.award_ranked(&[&[0], &[1]]).unwrap();
    /// assert_eq!(game.player(0).unwrap().balance(), 400);
    /// assert_eq!(game.player(1).unwrap().balance(), 1800);
    /// ```
    pub fn award_ranked(&mut self, ranking: &[&[usize]]) -> Result<(), GameError> {
        if self.table.phase != BettingPhase::Showdown {
            return Err(self.wrong_phase());
        }
        if ranking.iter().all(|tier| tier.is_empty()) {
            return Err(GameError::IllegalAction);
        }
        let contenders = self.contenders();
        if let Some(&outsider) = ranking
            .iter()
            .flat_map(|tier| tier.iter())
            .find(|&&w| !contenders.contains(&w))
        {
            return Err(GameError::NotAContender(outsider));
        }

        let mut balances: Vec<u32> = self.table.players.iter().map(|p| p.balance).collect();
        let mut awards = Vec::new();
        for pot in self.pots() {
            let winners: Vec<usize> = ranking
                .iter()
                .map(|tier| {
                    tier.iter()
                        .copied()
                        .filter(|seat| pot.eligible.contains(seat))
                        .collect::<Vec<_>>()
                })
                .find(|winners| !winners.is_empty())
                .or_else(|| (pot.eligible.len() == 1).then(|| pot.eligible.clone()))
                .ok_or(GameError::UnrankedPot)?;
            let count = winners.len() as u32;
            let share = pot.amount / count;
            let remainder = pot.amount % count;
            for (i, &seat) in winners.iter().enumerate() {
                let amount = if i == 0 { share + remainder } else { share };
                balances[seat] = balances[seat]
                    .checked_add(amount)
                    .ok_or(GameError::ChipOverflow)?;
                awards.push((seat, amount));
            }
        }

        for (player, balance) in self.table.players.iter_mut().zip(balances) {
            player.balance = balance;
        }
        for (seat, amount) in awards {
            self.events.fire(&PokerEvent::PotAwarded { seat, amount });
        }
        info!(hand = self.hand_number, pot = self.pot, ?ranking, "pot awarded");
        self.pot = 0;
        self.set_phase(BettingPhase::Finished);
        Ok(())
    }

    /// Run the rule set over the table and settle any fold-out it reports.
    pub fn check_rules(&mut self) -> Result<(), GameError> {
        self.rules.check_all(&self.table)?;
        for found in self.fold_outs.drain() {
            self.settle_fold_out(found.winner);
        }
        Ok(())
    }

    fn settle_fold_out(&mut self, winner: usize) {
        if !self.table.phase.is_betting() {
            return;
        }
        let pot = self.pot;
        self.table.players[winner].balance += pot;
        self.pot = 0;
        self.to_act = None;
        info!(hand = self.hand_number, winner, pot, "hand won uncontested");
        self.events.fire(&PokerEvent::FoldOutWin { seat: winner, pot });
        self.set_phase(BettingPhase::Finished);
    }

    /// Hand back the part of the largest bet nobody matched.
    fn return_uncalled(&mut self) {
        let players = &self.table.players;
        let Some(top) = (0..players.len()).max_by_key(|&i| players[i].bet) else {
            return;
        };
        let matched = players
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != top)
            .map(|(_, p)| p.bet)
            .max()
            .unwrap_or(0);
        let excess = players[top].bet.saturating_sub(matched);
        if excess == 0 || players[top].is_folded() {
            return;
        }
        let player = &mut self.table.players[top];
        player.bet -= excess;
        player.committed -= excess;
        player.balance += excess;
        if player.state == PlayerState::AllIn {
            player.state = PlayerState::Active;
        }
        self.pot -= excess;
        debug!(seat = top, excess, "uncalled bet returned");
    }

    fn post_blind(&mut self, seat: usize, amount: u32) {
        let posted = self.table.players[seat].put_in(amount);
        self.pot += posted;
        debug!(seat, posted, "blind");
        self.events.fire(&PokerEvent::Blind {
            seat,
            amount: posted,
        });
    }

    /// First seat after `from`, wrapping, that is still in the hand and has
    /// chips behind.
    fn next_in_hand(&self, from: usize) -> Option<usize> {
        let n = self.table.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&i| self.table.players[i].can_act())
    }

    /// Next seat after `from` that still owes an action this round, or `None`
    /// once the round is closed.
    fn next_to_act(&self, from: usize) -> Option<usize> {
        let players = &self.table.players;
        let open: Vec<usize> = (0..players.len())
            .filter(|&i| players[i].can_act())
            .collect();
        if let [only] = open.as_slice() {
            if players[*only].bet >= self.current_bet {
                return None;
            }
        }
        let n = players.len();
        (1..=n).map(|step| (from + step) % n).find(|&i| {
            let p = &players[i];
            p.can_act() && (!p.acted || p.bet < self.current_bet)
        })
    }

    fn set_phase(&mut self, phase: BettingPhase) {
        if self.table.phase != phase {
            self.table.phase = phase;
            debug!(phase = phase.name(), "phase");
            self.events.fire(&PokerEvent::PhaseChanged(phase));
        }
        if !phase.is_betting() {
            self.to_act = None;
        }
    }

    fn require_between_hands(&self) -> Result<(), GameError> {
        match self.table.phase {
            BettingPhase::Waiting | BettingPhase::Finished => Ok(()),
            _ => Err(self.wrong_phase()),
        }
    }

    fn wrong_phase(&self) -> GameError {
        GameError::WrongPhase {
            phase: self.table.phase.name(),
        }
    }
}
