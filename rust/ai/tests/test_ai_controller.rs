use cardtable_ai::baseline::BaselineAI;
use cardtable_ai::{create_ai, AiController, AiPlayer, PlayDecision};
use cardtable_engine::blackjack::{BlackjackConfig, BlackjackGame, HandSlot};
use cardtable_engine::cards::{Card, Rank as R, Suit as S};
use cardtable_engine::deck::Deck;
use cardtable_engine::event::Recorder;
use cardtable_engine::player::Controller;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn decisions_are_announced_to_subscribers() {
    let mut ai = AiController::new(Box::new(BaselineAI::new()));
    let seen = Recorder::new();
    let sink = seen.clone();
    ai.subscribe(move |d: &PlayDecision| sink.push(*d));

    let mut game = BlackjackGame::with_deck(
        BlackjackConfig::default(),
        Deck::stacked(
            vec![
                Card::new(S::Spades, R::Ten),
                Card::new(S::Clubs, R::Nine),
                Card::new(S::Hearts, R::Five),
                Card::new(S::Diamonds, R::Eight),
            ],
            0,
        ),
    );
    game.add_player("Bot", 100, Controller::Ai).unwrap();
    game.place_bet(0, 10).unwrap();
    game.deal().unwrap();

    let player = game.player(0).unwrap();
    assert_eq!(player.first_value(), 15);
    assert_eq!(ai.ai_play_hand(player, HandSlot::First), PlayDecision::Hit);
    assert_eq!(seen.drain(), vec![PlayDecision::Hit]);
}

#[test]
fn about_a_fifth_of_bets_are_zero_with_a_deep_balance() {
    let mut ai = AiController::new(create_ai("baseline").unwrap());
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let draws = 10_000;
    let zeros = (0..draws).filter(|_| ai.ai_bet(1_000, &mut rng) == 0).count();
    let ratio = zeros as f64 / draws as f64;
    assert!((0.17..0.23).contains(&ratio), "zero ratio {ratio}");
}

#[test]
fn unaffordable_draws_become_zero_not_the_largest_affordable() {
    let ai = BaselineAI::new();
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut zeros = 0;
    for _ in 0..5_000 {
        let stake = ai.bet(99, &mut rng);
        assert!(stake <= 25);
        if stake == 0 {
            zeros += 1;
        }
    }
    // 0, 100 and 500 all end up as zero: about three in five.
    assert!((2_700..3_300).contains(&zeros), "zeros {zeros}");
}

#[test]
fn threshold_is_configurable() {
    let cautious = BaselineAI::with_threshold(13);
    let value = cardtable_engine::valuation::HandValue::of(&[
        Card::new(S::Spades, R::Ten),
        Card::new(S::Clubs, R::Three),
    ]);
    assert_eq!(cautious.play(&value), PlayDecision::Stand);
    assert_eq!(BaselineAI::new().play(&value), PlayDecision::Hit);
}
