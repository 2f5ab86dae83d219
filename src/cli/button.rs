//! Button commands: add, list, rename, recolor, bind, unbind, move, delete.
//!
//! Buttons are addressed by their 1-based index in `list` output because ids
//! are regenerated every time a session is loaded.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::common::{button_at, ensure_saved, BoardOptions, CliError, CliResult};
use crate::error::BoardError;
use crate::models::{NewButton, Point, Position, RgbColor, DEFAULT_BUTTON_NAME};
use crate::services::audio::load_audio_file;
use crate::services::shortcuts::is_reserved_key;

/// Add a button from an audio file
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Audio file to upload
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub audio: PathBuf,

    /// Button label (defaults to the file name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Keyboard shortcut
    #[arg(long, value_name = "KEY")]
    pub shortcut: Option<String>,

    /// Color as #RRGGBB or rgb(r, g, b) (defaults to a random palette color)
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Left edge in pixels (defaults to a random spot near the top)
    #[arg(long, value_name = "PX", requires = "top", allow_negative_numbers = true)]
    pub left: Option<f64>,

    /// Top edge in pixels
    #[arg(long, value_name = "PX", requires = "left", allow_negative_numbers = true)]
    pub top: Option<f64>,
}

/// List buttons in display order
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Rename a button
#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// New label
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Change a button's color
#[derive(Debug, Clone, Args)]
pub struct RecolorArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Color as #RRGGBB or rgb(r, g, b)
    #[arg(value_name = "COLOR")]
    pub color: String,
}

/// Bind a keyboard shortcut to a button
#[derive(Debug, Clone, Args)]
pub struct BindArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Key value, e.g. `a` or `F1`
    #[arg(value_name = "KEY")]
    pub key: String,
}

/// Remove a button's shortcut
#[derive(Debug, Clone, Args)]
pub struct UnbindArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,
}

/// Move a button as if dragged to a point on the board
#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Target left edge in pixels
    #[arg(value_name = "X", allow_negative_numbers = true)]
    pub x: f64,

    /// Target top edge in pixels
    #[arg(value_name = "Y", allow_negative_numbers = true)]
    pub y: f64,

    /// Skip grid snapping (same as holding Shift)
    #[arg(long)]
    pub free: bool,
}

/// Delete a button
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Button index from `list`
    #[arg(value_name = "INDEX")]
    pub index: usize,
}

// JSON response types
#[derive(Debug, Serialize)]
struct ButtonItem {
    index: usize,
    name: String,
    shortcut: Option<String>,
    color: String,
    left: f64,
    top: f64,
}

#[derive(Debug, Serialize)]
struct ListButtonsResponse {
    buttons: Vec<ButtonItem>,
    count: usize,
}

fn parse_color(value: &str) -> CliResult<RgbColor> {
    RgbColor::parse(value).map_err(|e| CliError::validation(format!("Invalid color: {e}")))
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let reserved = self
            .shortcut
            .as_deref()
            .filter(|k| !k.is_empty() && is_reserved_key(k));
        if let Some(key) = reserved {
            return Err(BoardError::ReservedKey(key.to_string()).into());
        }

        let config = board.config()?;
        let upload = load_audio_file(&self.audio, config.upload.max_bytes)?;
        let color = self.color.as_deref().map(parse_color).transpose()?;

        let mut registry = board.open_with(&config)?;

        let name = match &self.name {
            Some(name) => name.clone(),
            None if upload.name.trim().is_empty() => DEFAULT_BUTTON_NAME.to_string(),
            None => upload.name.clone(),
        };
        let mut request = NewButton::new(upload.data_uri).with_name(name);
        if let Some(key) = &self.shortcut {
            request = request.with_shortcut(key.clone());
        }
        if let Some(color) = color {
            request = request.with_color(color);
        }
        if let (Some(left), Some(top)) = (self.left, self.top) {
            request = request.with_position(registry.engine().clamp(Position::new(left, top)));
        }
        let id = registry.create(request).id;
        ensure_saved(&registry)?;

        let index = registry.len();
        if let Some(button) = registry.get_button(id) {
            println!("Added button {index} '{}' at {}.", button.name, button.position);
        }
        Ok(())
    }
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let registry = board.open()?;

        let buttons: Vec<ButtonItem> = registry
            .list()
            .iter()
            .enumerate()
            .map(|(i, b)| ButtonItem {
                index: i + 1,
                name: b.name.clone(),
                shortcut: b.shortcut_key.clone(),
                color: b.color.to_hex(),
                left: b.position.left,
                top: b.position.top,
            })
            .collect();
        let response = ListButtonsResponse {
            count: buttons.len(),
            buttons,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if response.count == 0 {
            println!("No buttons on the board.");
        } else {
            println!("Buttons ({}):", response.count);
            println!();
            for b in response.buttons {
                println!(
                    "  {:>3}  {:<24} {:<10} {}  {}, {}",
                    b.index,
                    b.name,
                    b.shortcut.as_deref().unwrap_or("-"),
                    b.color,
                    b.left,
                    b.top
                );
            }
        }

        Ok(())
    }
}

impl RenameArgs {
    /// Execute the rename command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut registry = board.open()?;
        let id = button_at(&registry, self.index)?;

        if !registry.rename(id, &self.name)? {
            return Err(CliError::validation("Button name must not be blank"));
        }
        ensure_saved(&registry)?;

        println!("Button {} renamed to '{}'.", self.index, self.name);
        Ok(())
    }
}

impl RecolorArgs {
    /// Execute the recolor command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let color = parse_color(&self.color)?;
        let mut registry = board.open()?;
        let id = button_at(&registry, self.index)?;

        registry.recolor(id, color)?;
        ensure_saved(&registry)?;

        println!("Button {} color set to {color}.", self.index);
        Ok(())
    }
}

impl BindArgs {
    /// Execute the bind command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut registry = board.open()?;
        let id = button_at(&registry, self.index)?;
        let previous = registry.resolve_shortcut(&self.key).filter(|owner| *owner != id);

        registry.bind_shortcut(id, &self.key)?;
        ensure_saved(&registry)?;

        println!("Button {} bound to '{}'.", self.index, self.key);
        if let Some(owner) = previous {
            if let Some(pos) = registry.list().iter().position(|b| b.id == owner) {
                println!("Shortcut removed from button {}.", pos + 1);
            }
        }
        Ok(())
    }
}

impl UnbindArgs {
    /// Execute the unbind command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut registry = board.open()?;
        let id = button_at(&registry, self.index)?;

        registry.unbind_shortcut(id)?;
        ensure_saved(&registry)?;

        println!("Button {} has no shortcut.", self.index);
        Ok(())
    }
}

impl MoveArgs {
    /// Execute the move command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let config = board.config()?;
        let mut registry = board.open_with(&config)?;
        let id = button_at(&registry, self.index)?;

        let origin = registry
            .get_button(id)
            .map(|b| b.position.as_point())
            .ok_or_else(|| CliError::validation(format!("No button at index {}", self.index)))?;

        // grabbing the button at its origin makes the pointer the new top-left corner
        registry.begin_drag(id, origin)?;
        let snap = config.board.snap_enabled && !self.free;
        let position = registry.reposition(id, Point::new(self.x, self.y), snap)?;
        registry.end_drag();
        ensure_saved(&registry)?;

        println!("Button {} moved to {position}.", self.index);
        Ok(())
    }
}

impl DeleteArgs {
    /// Execute the delete command
    pub fn execute(&self, board: &BoardOptions) -> CliResult<()> {
        let mut registry = board.open()?;
        let id = button_at(&registry, self.index)?;

        registry.delete(id);
        ensure_saved(&registry)?;

        println!("Button {} deleted.", self.index);
        Ok(())
    }
}
