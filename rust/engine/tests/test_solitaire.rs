use cardtable_engine::cards::{all_ranks, all_suits, Card, Rank as R, Suit as S};
use cardtable_engine::errors::GameError;
use cardtable_engine::event::Recorder;
use cardtable_engine::solitaire::{Column, Pile, Solitaire, SolitaireEvent, TABLEAU_COLUMNS};

fn c(rank: R, suit: S) -> Card {
    Card::new(suit, rank)
}

fn empty_tableau() -> [Column; TABLEAU_COLUMNS] {
    Default::default()
}

fn recorded(game: &mut Solitaire) -> Recorder<SolitaireEvent> {
    let events = Recorder::new();
    let sink = events.clone();
    game.subscribe(move |e: &SolitaireEvent| sink.push(e.clone()));
    events
}

#[test]
fn seeded_deal_lays_out_klondike() {
    let game = Solitaire::deal(11).unwrap();
    let board = game.board();
    for (i, column) in board.columns().iter().enumerate() {
        assert_eq!(column.cards().len(), i + 1);
        assert_eq!(column.face_down(), i);
        assert_eq!(column.face_up().len(), 1);
    }
    assert_eq!(board.stock().len(), 24);
    assert!(board.waste().is_empty());

    let again = Solitaire::deal(11).unwrap();
    assert_eq!(
        again.board().stock().cards(),
        game.board().stock().cards(),
        "same seed, same layout"
    );
}

#[test]
fn kings_complete_the_foundations_and_win_once() {
    let foundations = all_suits().map(|suit| {
        all_ranks()[..12]
            .iter()
            .map(|&rank| Card::new(suit, rank))
            .collect::<Vec<_>>()
    });
    let mut tableau = empty_tableau();
    for (i, suit) in all_suits().into_iter().enumerate() {
        tableau[i] = Column::new(vec![c(R::King, suit)], 0);
    }
    let mut game = Solitaire::from_piles(Vec::new(), Vec::new(), foundations, tableau);
    let events = recorded(&mut game);

    for i in 0..3 {
        game.move_to_foundation(Pile::Tableau(i)).unwrap();
        assert!(!game.is_won());
    }
    game.move_to_foundation(Pile::Tableau(3)).unwrap();
    assert!(game.is_won());

    game.check_rules().unwrap();
    let wins = events
        .drain()
        .into_iter()
        .filter(|e| *e == SolitaireEvent::Won)
        .count();
    assert_eq!(wins, 1);
}

#[test]
fn foundations_build_up_by_suit_from_the_ace() {
    let mut game = Solitaire::from_piles(
        Vec::new(),
        vec![c(R::Two, S::Hearts), c(R::Ace, S::Hearts)],
        Default::default(),
        empty_tableau(),
    );
    assert_eq!(game.move_to_foundation(Pile::Waste), Ok(Pile::Foundation(2)));
    assert_eq!(game.move_to_foundation(Pile::Waste), Ok(Pile::Foundation(2)));
    assert_eq!(game.board().foundation(S::Hearts).len(), 2);
    assert_eq!(game.move_to_foundation(Pile::Waste), Err(GameError::EmptyPile));

    let mut game = Solitaire::from_piles(
        Vec::new(),
        vec![c(R::Three, S::Clubs)],
        Default::default(),
        empty_tableau(),
    );
    assert!(matches!(
        game.move_to_foundation(Pile::Waste),
        Err(GameError::IllegalMove(_))
    ));
    assert!(matches!(
        game.move_to_foundation(Pile::Stock),
        Err(GameError::IllegalMove(_))
    ));
}

#[test]
fn tableau_alternates_colour_downwards_and_kings_fill_gaps() {
    let mut tableau = empty_tableau();
    tableau[0] = Column::new(vec![c(R::King, S::Spades)], 0);
    let mut game = Solitaire::from_piles(
        Vec::new(),
        vec![c(R::Queen, S::Clubs), c(R::Queen, S::Hearts)],
        Default::default(),
        tableau,
    );

    game.move_to_tableau(Pile::Waste, 1, 0).unwrap();
    assert_eq!(game.board().column(0).unwrap().top(), Some(c(R::Queen, S::Hearts)));
    // Black queen on a red queen: wrong rank and colour.
    assert!(matches!(
        game.move_to_tableau(Pile::Waste, 1, 0),
        Err(GameError::IllegalMove(_))
    ));
    // Only a king opens an empty column.
    assert!(matches!(
        game.move_to_tableau(Pile::Waste, 1, 1),
        Err(GameError::IllegalMove(_))
    ));
    assert!(matches!(
        game.move_to_tableau(Pile::Waste, 2, 0),
        Err(GameError::IllegalMove(_))
    ));
}

#[test]
fn moving_a_run_flips_the_exposed_card() {
    let mut tableau = empty_tableau();
    tableau[0] = Column::new(
        vec![
            c(R::Five, S::Clubs),
            c(R::King, S::Hearts),
            c(R::Queen, S::Spades),
            c(R::Jack, S::Hearts),
        ],
        1,
    );
    let mut game = Solitaire::from_piles(Vec::new(), Vec::new(), Default::default(), tableau);
    let events = recorded(&mut game);

    assert!(matches!(
        game.move_to_tableau(Pile::Tableau(0), 4, 3),
        Err(GameError::IllegalMove(_))
    ));
    game.move_to_tableau(Pile::Tableau(0), 3, 3).unwrap();

    let moved = game.board().column(3).unwrap();
    assert_eq!(moved.cards().len(), 3);
    assert_eq!(moved.top(), Some(c(R::Jack, S::Hearts)));
    let source = game.board().column(0).unwrap();
    assert_eq!(source.face_down(), 0);
    assert_eq!(source.face_up(), &[c(R::Five, S::Clubs)]);

    let seen = events.drain();
    assert_eq!(
        seen.last(),
        Some(&SolitaireEvent::Flipped {
            column: 0,
            card: c(R::Five, S::Clubs)
        })
    );
    assert_eq!(game.moves(), 1);
}

#[test]
fn drawing_recycles_the_waste_in_order() {
    let mut game = Solitaire::from_piles(
        vec![c(R::Two, S::Clubs), c(R::Three, S::Clubs)],
        Vec::new(),
        Default::default(),
        empty_tableau(),
    );
    assert_eq!(game.draw(), Ok(Some(c(R::Three, S::Clubs))));
    assert_eq!(game.draw(), Ok(Some(c(R::Two, S::Clubs))));
    assert_eq!(game.draw(), Ok(None));
    assert_eq!(game.board().stock().len(), 2);
    assert!(game.board().waste().is_empty());
    assert_eq!(game.draw(), Ok(Some(c(R::Three, S::Clubs))));

    let mut bare = Solitaire::from_piles(
        Vec::new(),
        Vec::new(),
        Default::default(),
        empty_tableau(),
    );
    assert_eq!(bare.draw(), Err(GameError::EmptyPile));
}
