//! Sound button entity and creation request.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Position, RgbColor};

/// Name given to buttons created without one.
pub const DEFAULT_BUTTON_NAME: &str = "Sound";

/// Opaque identifier of a button, unique for the registry's lifetime.
///
/// Ids are not part of session documents; replaying a session assigns fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonId(Uuid);

impl ButtonId {
    /// Generates a new random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ButtonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sound button on the board.
///
/// Owned by the registry; everything outside it sees clones or shared references.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    /// Stable identifier
    pub id: ButtonId,
    /// Display name
    pub name: String,
    /// Audio payload as a `data:` URI (treated as opaque)
    pub audio: String,
    /// Top-left corner relative to the board content origin
    pub position: Position,
    /// Background color
    pub color: RgbColor,
    /// Key that triggers playback, if bound
    pub shortcut_key: Option<String>,
}

impl Button {
    /// The bound shortcut, or an empty string.
    #[must_use]
    pub fn shortcut_label(&self) -> &str {
        self.shortcut_key.as_deref().unwrap_or("")
    }
}

/// Parameters for creating a button. Only the audio payload is required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewButton {
    /// Audio payload
    pub audio: String,
    /// Shortcut to bind after creation
    pub shortcut_key: Option<String>,
    /// Display name; defaults to [`DEFAULT_BUTTON_NAME`]
    pub name: Option<String>,
    /// Explicit position; otherwise a random cell is chosen
    pub position: Option<Position>,
    /// Explicit color; otherwise a random palette color is chosen
    pub color: Option<RgbColor>,
}

impl NewButton {
    /// Creates a request carrying just the audio payload.
    pub fn new(audio: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the shortcut key. Empty keys are treated as "no shortcut".
    pub fn with_shortcut(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.shortcut_key = (!key.is_empty()).then_some(key);
        self
    }

    /// Sets an explicit position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets an explicit color.
    #[must_use]
    pub const fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }
}
