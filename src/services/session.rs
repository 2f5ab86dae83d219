//! Session persistence: the portable document format, the durable store
//! adapter, and the autosave timer.
//!
//! A session document is the ordered list of button snapshots:
//!
//! ```json
//! { "buttons": [
//!     { "name": "Air Horn", "shortcut": "h", "audio": "data:audio/wav;base64,...",
//!       "color": "#9C27B0", "position": { "left": "104px", "top": "48px" } }
//! ]}
//! ```
//!
//! The same JSON is used for the durable store and for exported
//! `.soundboard` files.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BoardError, BoardResult};
use crate::models::{Button, ButtonPalette, Position, RgbColor, DEFAULT_BUTTON_NAME};
use crate::services::storage::{KeyValueStore, PALETTE_KEY, SESSION_KEY};

/// Extension of exported session files.
pub const SESSION_FILE_EXTENSION: &str = "soundboard";

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "soundboard-session.soundboard";

/// One button as it appears in a session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,
    /// Shortcut key, empty when unbound
    #[serde(default)]
    pub shortcut: String,
    /// Audio payload (data URI)
    pub audio: String,
    /// Button color; absent entries get a palette color on replay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
    /// Stored position; absent entries get a random cell on replay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

fn default_name() -> String {
    DEFAULT_BUTTON_NAME.to_string()
}

impl From<&Button> for ButtonSnapshot {
    fn from(button: &Button) -> Self {
        Self {
            name: button.name.clone(),
            shortcut: button.shortcut_label().to_string(),
            audio: button.audio.clone(),
            color: Some(button.color),
            position: Some(button.position),
        }
    }
}

/// External representation of a whole session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    /// Buttons in display (insertion) order
    pub buttons: Vec<ButtonSnapshot>,
}

/// Lifecycle of the persisted session.
///
/// There is no error state: a failed persist returns to `Dirty` and the next
/// trigger retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing was loaded and nothing has changed
    #[default]
    Empty,
    /// A stored session was loaded and not changed since
    Loaded,
    /// In-memory state is ahead of the store
    Dirty,
    /// The last persist succeeded
    Persisted,
}

/// Reads and writes session documents and the palette in a key-value store.
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    state: SessionState,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Wraps a key-value backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            state: SessionState::Empty,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Records that the in-memory session changed.
    pub fn mark_dirty(&mut self) {
        self.state = SessionState::Dirty;
    }

    /// Builds the document for an ordered set of buttons.
    #[must_use]
    pub fn snapshot<'a>(buttons: impl IntoIterator<Item = &'a Button>) -> SessionDocument {
        SessionDocument {
            buttons: buttons.into_iter().map(ButtonSnapshot::from).collect(),
        }
    }

    /// Overwrites the stored session with `doc`.
    ///
    /// A rejected write is logged and leaves the session `Dirty`; the error is
    /// returned for callers that want to report it.
    pub fn persist(&mut self, doc: &SessionDocument) -> BoardResult<()> {
        let result = serde_json::to_string(doc)
            .map_err(BoardError::from)
            .and_then(|json| self.backend.set(SESSION_KEY, &json));

        match result {
            Ok(()) => {
                debug!(buttons = doc.buttons.len(), "session persisted");
                self.state = SessionState::Persisted;
                Ok(())
            }
            Err(e) => {
                warn!("Session could not be saved, will retry on next change or autosave: {e}");
                self.state = SessionState::Dirty;
                Err(e)
            }
        }
    }

    /// Reads the stored session.
    ///
    /// Returns `None` when nothing is stored, the store cannot be read, or the
    /// stored text does not parse; the latter two are logged.
    pub fn load(&mut self) -> Option<SessionDocument> {
        let raw = match self.backend.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Stored session could not be read: {e}");
                return None;
            }
        };

        match parse_document(raw.as_bytes()) {
            Ok(doc) => {
                info!(buttons = doc.buttons.len(), "loaded stored session");
                self.state = SessionState::Loaded;
                Some(doc)
            }
            Err(e) => {
                warn!("Ignoring malformed stored session: {e}");
                None
            }
        }
    }

    /// Deletes the stored session. A rejected removal leaves the session `Dirty`.
    pub fn clear(&mut self) -> BoardResult<()> {
        match self.backend.remove(SESSION_KEY) {
            Ok(()) => {
                self.state = SessionState::Empty;
                Ok(())
            }
            Err(e) => {
                warn!("Stored session could not be removed: {e}");
                self.state = SessionState::Dirty;
                Err(e)
            }
        }
    }

    /// Serializes a document to the portable file format.
    pub fn export_to_file(doc: &SessionDocument) -> BoardResult<Vec<u8>> {
        Ok(serde_json::to_vec(doc)?)
    }

    /// Parses a portable session file. Nothing is applied until this succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidFormat`] if the bytes are not a session document.
    pub fn import_from_file(bytes: &[u8]) -> BoardResult<SessionDocument> {
        parse_document(bytes)
    }

    /// Loads the palette, applying any stored overrides onto the defaults.
    pub fn load_palette(&self) -> ButtonPalette {
        let mut palette = ButtonPalette::default();

        let raw = match self.backend.get(PALETTE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return palette,
            Err(e) => {
                warn!("Stored palette could not be read: {e}");
                return palette;
            }
        };

        match serde_json::from_str::<BTreeMap<String, RgbColor>>(&raw) {
            Ok(overrides) => {
                for name in palette.apply_overrides(&overrides) {
                    warn!("Ignoring unknown palette color '{name}'");
                }
            }
            Err(e) => warn!("Ignoring malformed stored palette: {e}"),
        }

        palette
    }

    /// Stores the full palette as overrides.
    pub fn persist_palette(&mut self, palette: &ButtonPalette) -> BoardResult<()> {
        let json = serde_json::to_string(&palette.to_overrides())?;
        self.backend.set(PALETTE_KEY, &json)
    }

    /// Removes the palette overrides.
    pub fn clear_palette(&mut self) -> BoardResult<()> {
        self.backend.remove(PALETTE_KEY)
    }
}

fn parse_document(bytes: &[u8]) -> BoardResult<SessionDocument> {
    serde_json::from_slice(bytes).map_err(BoardError::from)
}

/// Fixed-interval autosave trigger, polled by the event loop.
#[derive(Debug, Clone, Copy)]
pub struct AutosaveTimer {
    interval: Duration,
    last_save: Instant,
}

impl AutosaveTimer {
    /// Starts the timer at `now`.
    #[must_use]
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_save: now,
        }
    }

    /// The configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true (and restarts the interval) once per elapsed interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_save) >= self.interval {
            self.last_save = now;
            true
        } else {
            false
        }
    }
}
