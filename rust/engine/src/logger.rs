use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::blackjack::{BlackjackGame, HandSlot, Settlement};
use crate::cards::Card;
use crate::player::GameKind;

/// One seat's cards and results at the end of a round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat: usize,
    pub name: String,
    pub cards: Vec<Card>,
    /// Cards of the second hand, present only after a split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_cards: Option<Vec<Card>>,
    pub settlements: Vec<Settlement>,
    pub balance: u32,
}

/// A settled round, written as one JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Format: YYYYMMDD-NNNNNN
    pub round_id: String,
    pub game: GameKind,
    pub seed: Option<u64>,
    pub dealer: Vec<Card>,
    pub seats: Vec<SeatRecord>,
    /// RFC 3339, filled in on write when missing.
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl RoundRecord {
    /// Snapshot a settled Blackjack round.
    pub fn from_blackjack(game: &BlackjackGame, round_id: String, seed: Option<u64>) -> Self {
        let settlements = game.last_settlements();
        let seats = game
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatRecord {
                seat,
                name: p.name().to_string(),
                cards: p.hand_in(HandSlot::First).cards().to_vec(),
                split_cards: p
                    .is_split()
                    .then(|| p.hand_in(HandSlot::Second).cards().to_vec()),
                settlements: settlements
                    .iter()
                    .filter(|s| s.seat == seat)
                    .cloned()
                    .collect(),
                balance: p.balance(),
            })
            .collect();
        Self {
            round_id,
            game: GameKind::Blackjack,
            seed,
            dealer: game.dealer().hand().cards().to_vec(),
            seats,
            ts: None,
            meta: None,
        }
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// JSONL writer for round history. Without a file it only hands out ids.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn without_file(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_date_plus_zero_padded_sequence() {
        let mut logger = RoundLogger::without_file("20261019");
        assert_eq!(logger.next_id(), "20261019-000001");
        assert_eq!(logger.next_id(), "20261019-000002");
    }
}
