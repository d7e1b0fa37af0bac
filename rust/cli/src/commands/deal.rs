//! `deal`: shuffle with a seed, deal one game and print the table.
//!
//! The same seed always prints the same table, so a seed from a bug report
//! reproduces the deal exactly.

use std::io::Write;

use cardtable_engine::blackjack::{BlackjackGame, HandSlot, RoundPhase};
use cardtable_engine::player::Controller;
use cardtable_engine::poker::{PokerConfig, PokerGame};
use cardtable_engine::solitaire::Solitaire;

use crate::cli::GameArg;
use crate::commands::resolve_seed;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::ui::format_cards;

pub fn handle_deal_command(
    game: GameArg,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = resolve_seed(seed, cfg.seed);
    writeln!(out, "Seed: {}", seed)?;
    match game {
        GameArg::Blackjack => deal_blackjack(&cfg, seed, out),
        GameArg::Poker => deal_poker(&cfg, seed, out),
        GameArg::Solitaire => deal_solitaire(seed, out),
    }
}

fn deal_blackjack(cfg: &Config, seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    let mut game = BlackjackGame::new(cfg.blackjack(), seed);
    for seat in 0..usize::from(cfg.seats) {
        game.add_player(
            format!("Seat {}", seat + 1),
            cfg.starting_balance,
            Controller::Human,
        )?;
        game.place_bet(seat, cfg.min_bet.min(cfg.starting_balance))?;
    }
    game.deal()?;

    let dealer = game.dealer().hand();
    if game.phase() == RoundPhase::Settled {
        writeln!(out, "Dealer: {}", format_cards(dealer.cards()))?;
    } else {
        let upcard = dealer.first().map(|c| c.to_string()).unwrap_or_default();
        writeln!(out, "Dealer: {} ??", upcard)?;
    }
    for player in game.players() {
        let value = player.value(HandSlot::First);
        let mut line = format!(
            "{}: {} ({})",
            player.name(),
            format_cards(player.hand().cards()),
            value.best()
        );
        if player.blackjack(HandSlot::First) {
            line.push_str(" blackjack");
        }
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "Phase: {}", game.phase().name())?;
    Ok(())
}

fn deal_poker(cfg: &Config, seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    let poker = PokerConfig::default();
    let seats = usize::from(cfg.seats).clamp(2, poker.seats);
    let mut game = PokerGame::new(poker, seed);
    for seat in 0..seats {
        game.add_player(
            format!("Seat {}", seat + 1),
            cfg.starting_balance,
            Controller::Human,
        )?;
    }
    game.deal()?;

    if let Some(button) = game.button() {
        writeln!(out, "Button: Seat {}", button + 1)?;
    }
    for player in game.players() {
        writeln!(
            out,
            "{}: {} (bet {}, stack {})",
            player.name(),
            format_cards(player.hand().cards()),
            player.bet(),
            player.balance()
        )?;
    }
    writeln!(out, "Pot: {}", game.pot())?;
    match game.current_player() {
        Some(seat) => writeln!(out, "To act: Seat {}", seat + 1)?,
        None => writeln!(out, "Phase: {}", game.phase().name())?,
    }
    Ok(())
}

fn deal_solitaire(seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    let game = Solitaire::deal(seed)?;
    let board = game.board();
    writeln!(out, "Stock: {} cards", board.stock().len())?;
    for (i, column) in board.columns().iter().enumerate() {
        let hidden = vec!["##"; column.face_down()].join(" ");
        let shown = format_cards(column.face_up());
        if hidden.is_empty() {
            writeln!(out, "Col {}: {}", i + 1, shown)?;
        } else {
            writeln!(out, "Col {}: {} {}", i + 1, hidden, shown)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(game: GameArg, seed: u64) -> String {
        let mut out = Vec::new();
        handle_deal_command(game, Some(seed), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn solitaire_shows_stock_and_seven_columns() {
        let text = deal(GameArg::Solitaire, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Seed: 3");
        assert_eq!(lines[1], "Stock: 24 cards");
        assert_eq!(lines.len(), 9);
        assert!(!lines[2].contains("##"));
        assert_eq!(lines[8].matches("##").count(), 6);
    }

    #[test]
    fn same_seed_same_table() {
        for game in [GameArg::Blackjack, GameArg::Poker, GameArg::Solitaire] {
            assert_eq!(deal(game, 99), deal(game, 99));
        }
    }
}
