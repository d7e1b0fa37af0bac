//! Command-line definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "cardtable",
    version,
    about = "Blackjack, Poker and Solitaire table engine"
)]
pub struct CardtableCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Deal one seeded game and print the table
    Deal {
        #[arg(long, value_enum, default_value_t = GameArg::Blackjack)]
        game: GameArg,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play AI seats against the dealer for a number of Blackjack rounds
    Sim {
        #[arg(long)]
        rounds: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Write one JSON line per round to this file
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GameArg {
    Blackjack,
    Poker,
    Solitaire,
}
