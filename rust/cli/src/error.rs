//! Error types for the CLI application.

use cardtable_engine::errors::GameError;
use thiserror::Error;

use crate::config::ConfigError;

/// Everything a command handler can fail with. Each variant maps to exit
/// code [`ERROR`](crate::exit_code::ERROR).
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_message() {
        let err = CliError::from(GameError::DeckExhausted);
        assert_eq!(err.to_string(), "Engine error: Deck is exhausted");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::other("disk gone");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().contains("disk gone"));
    }
}
