//! `sim`: AI seats against the dealer for a fixed number of Blackjack rounds.
//!
//! Every seat is driven by the configured AI policy. The shoe and the AI's
//! stakes are both seeded, so a run is reproducible from its seed. With
//! `--output` each settled round is appended to a JSONL round log.

use std::io::Write;

use cardtable_ai::{AiController, PlayDecision, create_ai};
use cardtable_engine::blackjack::BlackjackGame;
use cardtable_engine::errors::GameError;
use cardtable_engine::logger::{RoundLogger, RoundRecord};
use cardtable_engine::player::Controller;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::commands::resolve_seed;
use crate::config;
use crate::error::CliError;

/// Totals for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimSummary {
    pub played: u32,
    /// Rounds where every seat sat out.
    pub skipped: u32,
    pub balances: Vec<(String, u32)>,
}

pub fn handle_sim_command(
    rounds: u32,
    seed: Option<u64>,
    output: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let seed = resolve_seed(seed, cfg.seed);
    let policy = create_ai(&cfg.ai)
        .ok_or_else(|| CliError::InvalidInput(format!("unknown ai '{}'", cfg.ai)))?;
    let mut ai = AiController::new(policy);
    let mut logger = match output {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };

    let mut game = BlackjackGame::new(cfg.blackjack(), seed);
    for seat in 0..usize::from(cfg.seats) {
        game.add_player(format!("Bot {}", seat + 1), cfg.starting_balance, Controller::Ai)?;
    }

    let summary = simulate(&mut game, &mut ai, rounds, seed, logger.as_mut())?;

    writeln!(out, "Seed: {}", seed)?;
    writeln!(
        out,
        "Rounds: {} played, {} skipped",
        summary.played, summary.skipped
    )?;
    for (name, balance) in &summary.balances {
        writeln!(out, "{}: {}", name, balance)?;
    }
    if let Some(path) = output {
        writeln!(out, "Log: {}", path)?;
    }
    Ok(())
}

/// Play `rounds` rounds at `game`, whose seats are all AI controlled.
/// Stakes are drawn from an RNG seeded with `seed`. Stops early once no seat
/// can cover the minimum bet.
pub fn simulate(
    game: &mut BlackjackGame,
    ai: &mut AiController,
    rounds: u32,
    seed: u64,
    mut logger: Option<&mut RoundLogger>,
) -> Result<SimSummary, CliError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let min_bet = game.config().min_bet;
    let mut played = 0;
    let mut skipped = 0;

    for _ in 0..rounds {
        if game.players().iter().all(|p| p.balance() < min_bet) {
            info!(played, "every seat is below the minimum bet");
            break;
        }
        for seat in 0..game.players().len() {
            let balance = game.player(seat)?.balance();
            let stake = ai.ai_bet(balance, &mut rng);
            game.place_bet(seat, if stake < min_bet { 0 } else { stake })?;
        }
        match game.deal() {
            Err(GameError::NoActiveBets) => {
                skipped += 1;
                continue;
            }
            other => other?,
        }
        while let Some((seat, slot)) = game.turn() {
            let decision = ai.ai_play_hand(game.player(seat)?, slot);
            match decision {
                PlayDecision::Hit => {
                    game.hit(seat)?;
                }
                PlayDecision::Stand => game.stand(seat)?,
            }
        }
        played += 1;
        if let Some(log) = logger.as_deref_mut() {
            let id = log.next_id();
            log.write(&RoundRecord::from_blackjack(game, id, Some(seed)))?;
        }
        game.new_round()?;
    }

    info!(played, skipped, "simulation finished");
    Ok(SimSummary {
        played,
        skipped,
        balances: game
            .players()
            .iter()
            .map(|p| (p.name().to_string(), p.balance()))
            .collect(),
    })
}
