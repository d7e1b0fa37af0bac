//! # cardtable CLI
//!
//! Command-line front end for the card-table engine. [`run`] parses the
//! arguments and dispatches to a subcommand, writing to the given streams so
//! the whole CLI can be driven in process.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = cardtable_cli::run(
//!     ["cardtable", "deal", "--game", "solitaire", "--seed", "7"],
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Stock"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `cfg`: resolved configuration with the source of each value
//! - `deal`: deal one seeded Blackjack, Poker or Solitaire game
//! - `sim`: AI seats against the dealer, optionally logged as JSONL

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod ui;

use cli::{CardtableCli, Commands};
use commands::{handle_cfg_command, handle_deal_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["cfg", "deal", "sim"];

/// Parse `args` and run the chosen subcommand.
///
/// Help and version go to `out` with exit code 0. Parse failures print the
/// usage summary to `err`; command failures print `Error: ...`. Both return
/// [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CardtableCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { game, seed } => handle_deal_command(game, seed, out),
        Commands::Sim {
            rounds,
            seed,
            output,
        } => handle_sim_command(rounds, seed, output.as_deref(), out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, parse_error: &str) -> std::io::Result<()> {
    writeln!(err, "{}", parse_error)?;
    writeln!(err)?;
    writeln!(err, "Usage: cardtable <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: cardtable --help")
}
