//! Layered table configuration.
//!
//! Values start from [`Config::default`], are overridden by the TOML file named
//! in `CARDTABLE_CONFIG`, then by `CARDTABLE_*` environment variables. Every
//! resolved value remembers which layer it came from.

use std::fs;
use std::str::FromStr;

use cardtable_engine::blackjack::BlackjackConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "CARDTABLE_CONFIG";

/// Seats at a Blackjack table, dealer excluded.
pub const MAX_SEATS: u8 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_balance: u32,
    pub seats: u8,
    pub decks: u8,
    pub min_bet: u32,
    pub seed: Option<u64>,
    pub ai: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: 1_000,
            seats: 3,
            decks: 6,
            min_bet: 5,
            seed: None,
            ai: "baseline".into(),
        }
    }
}

impl Config {
    pub fn blackjack(&self) -> BlackjackConfig {
        BlackjackConfig {
            decks: self.decks,
            seats: usize::from(self.seats),
            min_bet: self.min_bet,
            ..BlackjackConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_balance: ValueSource,
    pub seats: ValueSource,
    pub decks: ValueSource,
    pub min_bet: ValueSource,
    pub seed: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_balance: ValueSource::Default,
            seats: ValueSource::Default,
            decks: ValueSource::Default,
            min_bet: ValueSource::Default,
            seed: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_balance: Option<u32>,
    #[serde(default)]
    seats: Option<u8>,
    #[serde(default)]
    decks: Option<u8>,
    #[serde(default)]
    min_bet: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let text = fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&text)?;
        if let Some(v) = file.starting_balance {
            cfg.starting_balance = v;
            sources.starting_balance = ValueSource::File;
        }
        if let Some(v) = file.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = file.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = file.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
        if let Some(v) = file.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = file.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Some(v) = env_value("CARDTABLE_STARTING_BALANCE")? {
        cfg.starting_balance = v;
        sources.starting_balance = ValueSource::Env;
    }
    if let Some(v) = env_value("CARDTABLE_SEATS")? {
        cfg.seats = v;
        sources.seats = ValueSource::Env;
    }
    if let Some(v) = env_value("CARDTABLE_DECKS")? {
        cfg.decks = v;
        sources.decks = ValueSource::Env;
    }
    if let Some(v) = env_value("CARDTABLE_MIN_BET")? {
        cfg.min_bet = v;
        sources.min_bet = ValueSource::Env;
    }
    if let Some(v) = env_value("CARDTABLE_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("CARDTABLE_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Parse a non-empty environment variable. Unset or empty means no override.
fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key}={raw} is not a valid number"))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_balance == 0 {
        return Err(ConfigError::Invalid("starting_balance must be >0".into()));
    }
    if !(1..=MAX_SEATS).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(format!(
            "seats must be between 1 and {MAX_SEATS}"
        )));
    }
    if cfg.decks == 0 {
        return Err(ConfigError::Invalid("decks must be >=1".into()));
    }
    if cfg.min_bet == 0 {
        return Err(ConfigError::Invalid("min_bet must be >0".into()));
    }
    if cardtable_ai::create_ai(&cfg.ai).is_none() {
        return Err(ConfigError::Invalid(format!("unknown ai '{}'", cfg.ai)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn seat_bounds_are_enforced() {
        let mut cfg = Config::default();
        cfg.seats = 0;
        assert!(validate(&cfg).is_err());
        cfg.seats = MAX_SEATS + 1;
        assert!(validate(&cfg).is_err());
        cfg.seats = MAX_SEATS;
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn unknown_ai_is_rejected() {
        let cfg = Config {
            ai: "oracle".into(),
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn blackjack_config_carries_table_settings() {
        let cfg = Config {
            seats: 2,
            decks: 1,
            min_bet: 25,
            ..Config::default()
        };
        let table = cfg.blackjack();
        assert_eq!(table.seats, 2);
        assert_eq!(table.decks, 1);
        assert_eq!(table.min_bet, 25);
        assert_eq!(table.dealer_stands_on, 17);
    }
}
