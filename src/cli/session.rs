//! Session file commands: export, import, reset.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{ensure_saved, BoardOptions, CliError, CliResult};
use crate::services::session::{DEFAULT_EXPORT_FILE_NAME, SESSION_FILE_EXTENSION};

/// Write the board to a portable session file
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output file (defaults to ./soundboard-session.soundboard)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Replace the board with the contents of a session file
#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// Session file to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Delete every button and the stored session
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let registry = board.open()?;
        let bytes = registry.export_to_file()?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE_NAME));

        fs::write(&output, bytes)
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", output.display())))?;

        println!(
            "Exported {} buttons to {}",
            registry.len(),
            output.display()
        );
        Ok(())
    }
}

impl ImportArgs {
    /// Execute the import command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        if self
            .file
            .extension()
            .is_some_and(|ext| ext != SESSION_FILE_EXTENSION)
        {
            eprintln!(
                "Warning: expected a .{SESSION_FILE_EXTENSION} file, got {}",
                self.file.display()
            );
        }

        let bytes = fs::read(&self.file)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.file.display())))?;

        let mut registry = board.open()?;
        let count = registry.import_from_file(&bytes)?;
        ensure_saved(&registry)?;

        println!("Imported {count} buttons from {}", self.file.display());
        Ok(())
    }
}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut registry = board.open()?;
        let removed = registry.len();
        registry.reset()?;

        println!("Removed {removed} buttons.");
        Ok(())
    }
}
