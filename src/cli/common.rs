//! Shared plumbing for CLI commands: error type, exit codes, and board access.

use std::fmt;
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::BoardError;
use crate::models::ButtonId;
use crate::services::{ButtonRegistry, FileStore, SessionState, SessionStore};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: unknown button, reserved key, malformed file
    Validation = 1,
    /// Filesystem or store failure
    Io = 2,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to report
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid user input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O or storage failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<BoardError> for CliError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::StorageUnavailable(_) => Self::io(err.to_string()),
            _ => Self::validation(err.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Options shared by every board command.
#[derive(Debug, Clone, Default, Args)]
pub struct BoardOptions {
    /// Store directory (overrides `storage.dir` from the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,
}

impl BoardOptions {
    /// Loads the configuration file.
    pub fn config(&self) -> CliResult<Config> {
        Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
    }

    /// Resolves the store directory from the flag or the configuration.
    pub fn store_dir(&self, config: &Config) -> CliResult<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => config
                .store_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve store directory: {e:#}"))),
        }
    }

    /// Opens the board and restores the stored session into it.
    pub fn open(&self) -> CliResult<ButtonRegistry> {
        let config = self.config()?;
        self.open_with(&config)
    }

    /// Like [`BoardOptions::open`] with an already loaded configuration.
    pub fn open_with(&self, config: &Config) -> CliResult<ButtonRegistry> {
        let dir = self.store_dir(config)?;
        let store = SessionStore::new(FileStore::new(dir));
        let mut registry = ButtonRegistry::new(config.board.engine(), store);
        registry.restore();
        Ok(registry)
    }
}

/// Maps a 1-based index from the `list` output to a button id.
pub fn button_at(registry: &ButtonRegistry, index: usize) -> CliResult<ButtonId> {
    index
        .checked_sub(1)
        .and_then(|i| registry.list().get(i))
        .map(|b| b.id)
        .ok_or_else(|| {
            CliError::validation(format!(
                "No button at index {index} (board has {} buttons)",
                registry.len()
            ))
        })
}

/// Fails when the last write-through did not reach the store.
pub fn ensure_saved(registry: &ButtonRegistry) -> CliResult<()> {
    if registry.session_state() == SessionState::Dirty {
        return Err(CliError::io("Failed to save session to the store"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("x").exit_code(), 1);
        assert_eq!(CliError::io("x").exit_code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_board_error_mapping() {
        let err: CliError = BoardError::ReservedKey("Tab".to_string()).into();
        assert_eq!(err.kind, ExitCode::Validation);

        let err: CliError = BoardError::StorageUnavailable("disk full".to_string()).into();
        assert_eq!(err.kind, ExitCode::Io);
    }
}
