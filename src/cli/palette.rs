//! Palette commands: show, set, reset.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{BoardOptions, CliError, CliResult};
use crate::models::RgbColor;

/// Manage the named colors new buttons are drawn from
#[derive(Debug, Clone, Args)]
pub struct PaletteArgs {
    /// Palette subcommand
    #[command(subcommand)]
    pub command: PaletteCommand,
}

/// Palette subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum PaletteCommand {
    /// Show the current palette
    Show(PaletteShowArgs),
    /// Change the color of a named slot
    Set(PaletteSetArgs),
    /// Restore the built-in colors
    Reset,
}

/// Show the current palette
#[derive(Debug, Clone, Args)]
pub struct PaletteShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Change the color of a named slot
#[derive(Debug, Clone, Args)]
pub struct PaletteSetArgs {
    /// Slot name, e.g. `Cyan`
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Color as #RRGGBB or rgb(r, g, b)
    #[arg(value_name = "COLOR")]
    pub color: String,
}

#[derive(Debug, Serialize)]
struct PaletteItem {
    name: String,
    color: String,
}

impl PaletteArgs {
    /// Execute the palette command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        match &self.command {
            PaletteCommand::Show(args) => args.execute(board),
            PaletteCommand::Set(args) => args.execute(board),
            PaletteCommand::Reset => {
                let mut registry = board.open()?;
                registry.reset_palette()?;
                println!("Palette restored to defaults.");
                Ok(())
            }
        }
    }
}

impl PaletteShowArgs {
    /// Execute the show command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let registry = board.open()?;
        let items: Vec<PaletteItem> = registry
            .palette()
            .entries()
            .iter()
            .map(|entry| PaletteItem {
                name: entry.name.clone(),
                color: entry.color.to_hex(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string(&items)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for item in items {
                println!("  {:<12} {}", item.name, item.color);
            }
        }
        Ok(())
    }
}

impl PaletteSetArgs {
    /// Execute the set command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let color = RgbColor::parse(&self.color)
            .map_err(|e| CliError::validation(format!("Invalid color: {e}")))?;

        let mut registry = board.open()?;
        if !registry.set_palette_color(&self.name, color)? {
            let names: Vec<&str> = registry
                .palette()
                .entries()
                .iter()
                .map(|e| e.name.as_str())
                .collect();
            return Err(CliError::validation(format!(
                "Unknown palette color '{}'. Known colors: {}",
                self.name,
                names.join(", ")
            )));
        }

        println!("Palette color '{}' set to {color}.", self.name);
        Ok(())
    }
}
