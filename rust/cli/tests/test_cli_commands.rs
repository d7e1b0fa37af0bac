use std::fs;

use cardtable_cli::run;
use cardtable_cli::exit_code::{ERROR, SUCCESS};
use cardtable_engine::logger::RoundRecord;

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let argv = std::iter::once("cardtable").chain(args.iter().copied());
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn help_goes_to_stdout_with_success() {
    let (code, out, err) = run_cli(&["--help"]);
    assert_eq!(code, SUCCESS);
    assert!(out.contains("deal"));
    assert!(out.contains("sim"));
    assert!(err.is_empty());
}

#[test]
fn unknown_command_prints_usage() {
    let (code, out, err) = run_cli(&["shuffle"]);
    assert_eq!(code, ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Usage: cardtable <command> [options]"));
    for cmd in ["cfg", "deal", "sim"] {
        assert!(err.contains(&format!("  {cmd}")), "missing {cmd}");
    }
}

#[test]
fn unknown_game_is_a_parse_error() {
    let (code, _, err) = run_cli(&["deal", "--game", "bridge"]);
    assert_eq!(code, ERROR);
    assert!(err.contains("bridge"));
}

#[test]
fn blackjack_deal_shows_dealer_and_seats() {
    let (code, out, _) = run_cli(&["deal", "--game", "blackjack", "--seed", "42"]);
    assert_eq!(code, SUCCESS);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Seed: 42");
    assert!(lines[1].starts_with("Dealer: "));
    assert!(out.contains("Seat 1: "));
    assert!(out.contains("Seat 3: "));
    assert!(lines.last().unwrap().starts_with("Phase: "));
}

#[test]
fn poker_deal_posts_blinds() {
    let (code, out, _) = run_cli(&["deal", "--game", "poker", "--seed", "8"]);
    assert_eq!(code, SUCCESS);
    assert!(out.contains("Button: Seat 1"));
    assert!(out.contains("Pot: 150"));
    assert!(out.contains("To act: Seat 1"));
}

#[test]
fn deals_are_reproducible_from_the_seed() {
    for game in ["blackjack", "poker", "solitaire"] {
        let first = run_cli(&["deal", "--game", game, "--seed", "2024"]);
        let second = run_cli(&["deal", "--game", game, "--seed", "2024"]);
        assert_eq!(first.0, SUCCESS);
        assert_eq!(first.1, second.1, "{game} deal differs");
    }
}

#[test]
fn sim_rejects_zero_rounds() {
    let (code, _, err) = run_cli(&["sim", "--rounds", "0"]);
    assert_eq!(code, ERROR);
    assert!(err.starts_with("Error: Invalid input"));
}

#[test]
fn sim_reports_balances_and_writes_round_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("sim.jsonl");
    let path_str = path.to_str().unwrap();

    let (code, out, err) = run_cli(&["sim", "--rounds", "20", "--seed", "3", "--output", path_str]);
    assert_eq!(code, SUCCESS, "stderr: {err}");
    assert!(out.contains("Seed: 3"));
    assert!(out.contains("Bot 1: "));
    assert!(out.contains(&format!("Log: {path_str}")));

    let played: u32 = out
        .lines()
        .find_map(|l| l.strip_prefix("Rounds: "))
        .and_then(|l| l.split(' ').next())
        .and_then(|n| n.parse().ok())
        .expect("rounds line");

    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<RoundRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len() as u32, played);
    for (i, record) in records.iter().enumerate() {
        assert!(record.round_id.ends_with(&format!("-{:06}", i + 1)));
        assert_eq!(record.seed, Some(3));
        assert_eq!(record.seats.len(), 3);
        assert!(record.dealer.len() >= 2);
    }
}

#[test]
fn sim_is_reproducible() {
    let a = run_cli(&["sim", "--rounds", "40", "--seed", "11"]);
    let b = run_cli(&["sim", "--rounds", "40", "--seed", "11"]);
    assert_eq!(a.0, SUCCESS);
    assert_eq!(a.1, b.1);
}
