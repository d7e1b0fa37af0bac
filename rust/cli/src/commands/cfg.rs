//! `cfg`: print the resolved configuration as JSON.
//!
//! ```json
//! {
//!   "starting_balance": { "value": 1000, "source": "default" },
//!   "seats": { "value": 3, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config::{self, ConfigResolved};
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "starting_balance": {
            "value": config.starting_balance,
            "source": sources.starting_balance,
        },
        "seats": {
            "value": config.seats,
            "source": sources.seats,
        },
        "decks": {
            "value": config.decks,
            "source": sources.decks,
        },
        "min_bet": {
            "value": config.min_bet,
            "source": sources.min_bet,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "ai": {
            "value": config.ai,
            "source": sources.ai,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
