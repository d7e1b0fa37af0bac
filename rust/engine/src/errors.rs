use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid bet amount: {amount}, minimum: {minimum}")]
    InvalidBetAmount { amount: u32, minimum: u32 },
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Player already folded")]
    PlayerAlreadyFolded,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: usize, actual: usize },
    #[error("Table is full ({capacity} seats)")]
    TableFull { capacity: usize },
    #[error("No player in seat {0}")]
    UnknownSeat(usize),
    #[error("Action not allowed during {phase}")]
    WrongPhase { phase: &'static str },
    #[error("Not enough funded players to deal")]
    NotEnoughPlayers,
    #[error("No bets placed for this round")]
    NoActiveBets,
    #[error("Hand cannot be split")]
    CannotSplit,
    #[error("Insurance is not available")]
    InsuranceUnavailable,
    #[error("Betting round still has players to act")]
    BettingRoundOpen,
    #[error("Action is not legal in the current betting state")]
    IllegalAction,
    #[error("Player {0} is not contesting the pot")]
    NotAContender(usize),
    #[error("Illegal move: {0}")]
    IllegalMove(&'static str),
    #[error("Pile is empty")]
    EmptyPile,
    #[error("Deck is exhausted")]
    DeckExhausted,
    #[error("Chip count overflow")]
    ChipOverflow,
    #[error("No ranked seat is eligible for a side pot")]
    UnrankedPot,
    /// Every seat folded during a betting round. The betting flow can never
    /// produce this, so seeing it means the sequencer is broken.
    #[error("All players folded: betting flow invariant violated")]
    AllPlayersFolded,
}
