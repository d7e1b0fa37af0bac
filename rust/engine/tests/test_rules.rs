use cardtable_engine::blackjack::HandSlot;
use cardtable_engine::cards::{Card, Rank as R, Suit as S};
use cardtable_engine::errors::GameError;
use cardtable_engine::event::Recorder;
use cardtable_engine::hand::Hand;
use cardtable_engine::poker::BettingPhase;
use cardtable_engine::rules::{
    BlackJackRule, BustRule, FoldTracking, GameEndMatch, GameEndRule, GameRule, HandMatch,
    HasFoldState, InsuranceRule, RuleSet, ScoredHands, WinRule,
};
use cardtable_engine::valuation::HandValue;

/// Minimal single-hand seat holding its own flags.
struct Seat {
    cards: Vec<Card>,
    value: HandValue,
    bust: bool,
    blackjack: bool,
}

impl Seat {
    fn new(cards: Vec<Card>) -> Self {
        let value = HandValue::of(&cards);
        Self {
            cards,
            value,
            bust: false,
            blackjack: false,
        }
    }

    fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.value = HandValue::of(&self.cards);
    }
}

impl ScoredHands for Seat {
    fn scored(&self, slot: HandSlot) -> Option<HandValue> {
        (slot == HandSlot::First).then_some(self.value)
    }

    fn is_bust(&self, _: HandSlot) -> bool {
        self.bust
    }

    fn is_blackjack(&self, _: HandSlot) -> bool {
        self.blackjack
    }
}

fn c(rank: R) -> Card {
    Card::new(S::Spades, rank)
}

#[test]
fn ace_king_is_blackjack_and_not_bust() {
    let seats = vec![Seat::new(vec![c(R::Ace), c(R::King)])];
    let mut blackjack = BlackJackRule::new();
    let found = Recorder::new();
    let sink = found.clone();
    blackjack.subscribe(move |m: &HandMatch| sink.push(*m));
    let mut bust = BustRule::new();
    let busts = Recorder::new();
    let sink = busts.clone();
    bust.subscribe(move |m: &HandMatch| sink.push(*m));

    blackjack.check(&seats).unwrap();
    bust.check(&seats).unwrap();

    assert_eq!(
        found.drain(),
        vec![HandMatch {
            seat: 0,
            slot: HandSlot::First
        }]
    );
    assert!(busts.is_empty());
}

#[test]
fn bust_fires_once_per_transition() {
    let mut seats = vec![
        Seat::new(vec![c(R::Ten), c(R::Two)]),
        Seat::new(vec![c(R::King), c(R::Queen)]),
    ];
    let mut rule = BustRule::new();
    let busts = Recorder::new();
    let sink = busts.clone();
    rule.subscribe(move |m: &HandMatch| sink.push(*m));

    rule.check(&seats).unwrap();
    assert!(busts.is_empty());

    seats[1].add(c(R::Five));
    rule.check(&seats).unwrap();
    let fired = busts.drain();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].seat, 1);
    assert_eq!(seats[1].value.hard, 25);

    // The subscriber records the transition; the rule then stays quiet.
    seats[1].bust = true;
    rule.check(&seats).unwrap();
    assert!(busts.is_empty());
}

#[test]
fn unflagged_bust_keeps_firing() {
    let seats = vec![Seat::new(vec![c(R::King), c(R::Queen), c(R::Five)])];
    let mut rule = BustRule::new();
    let busts = rule_recorder(&mut rule);
    rule.check(&seats).unwrap();
    rule.check(&seats).unwrap();
    assert_eq!(busts.len(), 2);
}

fn rule_recorder(rule: &mut BustRule) -> Recorder<HandMatch> {
    let rec = Recorder::new();
    let sink = rec.clone();
    rule.subscribe(move |m: &HandMatch| sink.push(*m));
    rec
}

#[test]
fn three_card_twenty_one_is_not_blackjack() {
    let seats = vec![Seat::new(vec![c(R::Seven), c(R::Seven), c(R::Seven)])];
    let mut rule = BlackJackRule::new();
    let found = Recorder::new();
    let sink = found.clone();
    rule.subscribe(move |m: &HandMatch| sink.push(*m));
    rule.check(&seats).unwrap();
    assert!(found.is_empty());
}

#[test]
fn insurance_fires_at_most_once_and_only_on_an_ace() {
    let mut rule = InsuranceRule::new();
    let offers = Recorder::new();
    let sink = offers.clone();
    rule.subscribe(move |_: &()| sink.push(()));

    let empty = Hand::new();
    rule.check(&empty).unwrap();
    assert!(!rule.is_done(), "no upcard yet");

    let ace_up = Hand::from_cards(vec![c(R::Ace), c(R::Six)]);
    rule.check(&ace_up).unwrap();
    rule.check(&ace_up).unwrap();
    assert_eq!(offers.drain().len(), 1);
    assert!(rule.is_done());

    GameRule::<Hand>::reset(&mut rule);
    let ten_up = Hand::from_cards(vec![c(R::Ten), c(R::Ace)]);
    rule.check(&ten_up).unwrap();
    assert!(offers.is_empty());
    assert!(rule.is_done());
}

struct PokerSeat(bool);

impl HasFoldState for PokerSeat {
    fn is_folded(&self) -> bool {
        self.0
    }
}

struct Table {
    phase: BettingPhase,
    seats: Vec<PokerSeat>,
}

impl FoldTracking for Table {
    type Seat = PokerSeat;

    fn phase(&self) -> BettingPhase {
        self.phase
    }

    fn seats(&self) -> &[PokerSeat] {
        &self.seats
    }
}

fn table(phase: BettingPhase, folded: &[bool]) -> Table {
    Table {
        phase,
        seats: folded.iter().map(|&f| PokerSeat(f)).collect(),
    }
}

#[test]
fn game_end_fires_for_the_last_seat_standing() {
    let mut rule = GameEndRule::new();
    let ends = Recorder::new();
    let sink = ends.clone();
    rule.subscribe(move |m: &GameEndMatch| sink.push(*m));

    rule.check(&table(BettingPhase::Preflop, &[false, true, true]))
        .unwrap();
    assert_eq!(ends.drain(), vec![GameEndMatch { winner: 0 }]);

    rule.check(&table(BettingPhase::RiverBet, &[false, true, false]))
        .unwrap();
    assert!(ends.is_empty());
}

#[test]
fn game_end_is_silent_outside_its_phases() {
    let mut rule = GameEndRule::new();
    let ends = Recorder::new();
    let sink = ends.clone();
    rule.subscribe(move |m: &GameEndMatch| sink.push(*m));

    for phase in [
        BettingPhase::Waiting,
        BettingPhase::FlopBet,
        BettingPhase::Showdown,
        BettingPhase::Finished,
    ] {
        rule.check(&table(phase, &[true, true, false])).unwrap();
        rule.check(&table(phase, &[true, true, true])).unwrap();
    }
    assert!(ends.is_empty());
}

#[test]
fn everyone_folded_is_fatal() {
    let mut rule = GameEndRule::new();
    assert_eq!(
        rule.check(&table(BettingPhase::TurnBet, &[true, true, true])),
        Err(GameError::AllPlayersFolded)
    );
}

#[test]
fn win_rule_needs_four_full_foundations() {
    let full = |suit: S| {
        Hand::from_cards(
            cardtable_engine::cards::all_ranks()
                .iter()
                .map(|&r| Card::new(suit, r))
                .collect(),
        )
    };
    let mut rule = WinRule::new();
    let wins = Recorder::new();
    let sink = wins.clone();
    rule.subscribe(move |_: &()| sink.push(()));

    let mut piles = [full(S::Clubs), full(S::Diamonds), full(S::Hearts), Hand::new()];
    rule.check(&piles).unwrap();
    assert!(wins.is_empty());

    piles[3] = full(S::Spades);
    rule.check(&piles).unwrap();
    assert_eq!(wins.len(), 1);
}

#[test]
fn rule_set_runs_blackjack_rules_in_order() {
    let mut set: RuleSet<Vec<Seat>> = RuleSet::new();
    set.register(BustRule::new()).register(BlackJackRule::new());
    assert_eq!(set.names(), vec!["bust", "blackjack"]);
    assert_eq!(set.len(), 2);
    set.check_all(&vec![Seat::new(vec![c(R::Ace), c(R::Ten)])])
        .unwrap();
}
