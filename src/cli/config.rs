//! Configuration CLI commands.

use clap::{Args, Subcommand};

use crate::cli::common::{BoardOptions, CliError, CliResult};
use crate::config::Config;

/// Configuration commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(board),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to resolve config path: {e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut config = board.config()?;
        // report the directory actually in use
        config.storage.dir = Some(board.store_dir(&config)?);

        if self.json {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }
        Ok(())
    }
}

fn output_human_readable(config: &Config) {
    println!("Storage:");
    if let Some(dir) = &config.storage.dir {
        println!("  Directory:       {}", dir.display());
    }
    println!();
    println!("Board:");
    println!(
        "  Size:            {} x {}",
        config.board.width, config.board.height
    );
    println!(
        "  Button size:     {} x {}",
        config.board.button_width, config.board.button_height
    );
    println!("  Grid:            {}", config.board.grid_size);
    println!("  Snap to grid:    {}", config.board.snap_enabled);
    println!();
    println!("Autosave:");
    println!("  Interval:        {} ms", config.autosave.interval_ms);
    println!();
    println!("Upload:");
    println!("  Max bytes:       {}", config.upload.max_bytes);
}
