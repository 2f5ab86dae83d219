//! Editor context: the interaction state around the registry.
//!
//! Edit mode, the drag in progress, the Shift free-placement modifier, the
//! recording flag, and the context-menu selection all live here instead of in
//! process-wide globals. A host UI forwards pointer, key, and timer events to
//! one `EditorSession` and renders from the registry's change notifications.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{BoardError, BoardResult};
use crate::models::{ButtonId, NewButton, Point, Position};
use crate::services::{AutosaveTimer, ButtonRegistry};

/// Key that switches to free (unsnapped) placement while held.
pub const FREE_MODE_KEY: &str = "Shift";

/// Where keyboard focus was when a key event arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The board or any non-text element
    Board,
    /// A text-entry field; shortcuts must not fire
    TextInput,
}

/// Result of pressing the primary pointer button on a sound button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Edit mode: the button is now being dragged
    DragStarted(ButtonId),
    /// Play mode: the host should play this button
    Play(ButtonId),
}

/// What a finished recording will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingTarget {
    /// Create a new button
    NewButton,
    /// Replace the audio of an existing button
    Rerecord(ButtonId),
}

/// Interaction state for a single board.
#[derive(Debug)]
pub struct EditorSession {
    registry: ButtonRegistry,
    edit_mode: bool,
    free_mode: bool,
    snap_enabled: bool,
    recording: Option<RecordingTarget>,
    selected: Option<ButtonId>,
    autosave: AutosaveTimer,
}

impl EditorSession {
    /// Wraps a registry. The autosave interval starts counting at `now`.
    pub fn new(registry: ButtonRegistry, autosave_interval: Duration, now: Instant) -> Self {
        Self {
            registry,
            edit_mode: false,
            free_mode: false,
            snap_enabled: true,
            recording: None,
            selected: None,
            autosave: AutosaveTimer::new(autosave_interval, now),
        }
    }

    /// Sets whether drags snap to the grid when Shift is not held.
    pub fn with_snap(mut self, snap_enabled: bool) -> Self {
        self.snap_enabled = snap_enabled;
        self
    }

    /// The underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &ButtonRegistry {
        &self.registry
    }

    /// Mutable access for direct registry operations.
    pub fn registry_mut(&mut self) -> &mut ButtonRegistry {
        &mut self.registry
    }

    /// Whether buttons are draggable instead of playable.
    #[must_use]
    pub const fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Flips edit mode. Leaving edit mode settles any drag in progress.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        if !self.edit_mode {
            self.registry.end_drag();
        }
        self.edit_mode
    }

    /// Whether Shift is held (free placement).
    #[must_use]
    pub const fn is_free_mode(&self) -> bool {
        self.free_mode
    }

    /// Whether a recording is in progress.
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Button targeted by context actions, if it still exists.
    #[must_use]
    pub fn selected(&self) -> Option<ButtonId> {
        self.selected
            .filter(|id| self.registry.get_button(*id).is_some())
    }

    /// Selects a button for context actions (context menu). Ignored in edit mode.
    pub fn select(&mut self, id: ButtonId) -> bool {
        if self.edit_mode || self.registry.get_button(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clears the context selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Deletes the selected button, if any.
    pub fn delete_selected(&mut self) -> bool {
        match self.selected.take() {
            Some(id) => self.registry.delete(id),
            None => false,
        }
    }

    /// Primary pointer press on a button.
    pub fn pointer_down(&mut self, id: ButtonId, pointer: Point) -> BoardResult<PointerOutcome> {
        if self.edit_mode {
            self.registry.begin_drag(id, pointer)?;
            Ok(PointerOutcome::DragStarted(id))
        } else {
            self.registry
                .get_button(id)
                .map(|_| PointerOutcome::Play(id))
                .ok_or(BoardError::NotFound(id))
        }
    }

    /// Pointer movement anywhere. Moves the dragged button, if there is one.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<Position> {
        let id = self.registry.dragged()?;
        let snap = self.snap_enabled && !self.free_mode;
        self.registry.reposition(id, pointer, snap).ok()
    }

    /// Pointer release. Ends the drag and persists once.
    pub fn pointer_up(&mut self) -> Option<ButtonId> {
        self.registry.end_drag()
    }

    /// Lost pointer capture. Settles the same way as a release.
    pub fn pointer_cancel(&mut self) -> Option<ButtonId> {
        self.registry.end_drag()
    }

    /// Global key press. Returns the button to play, if the key triggers one.
    ///
    /// Shortcuts are suppressed while recording and while a text field has focus.
    pub fn key_down(&mut self, key: &str, focus: FocusTarget) -> Option<ButtonId> {
        if key == FREE_MODE_KEY {
            self.free_mode = true;
            return None;
        }
        if self.is_recording() || focus == FocusTarget::TextInput {
            return None;
        }
        self.registry.resolve_shortcut(key)
    }

    /// Global key release.
    pub fn key_up(&mut self, key: &str) {
        if key == FREE_MODE_KEY {
            self.free_mode = false;
        }
    }

    /// Marks a recording as started. Returns false if one is already running.
    pub fn start_recording(&mut self, target: RecordingTarget) -> bool {
        if self.recording.is_some() {
            return false;
        }
        self.recording = Some(target);
        true
    }

    /// Abandons the current recording.
    pub fn cancel_recording(&mut self) {
        self.recording = None;
    }

    /// Hands the captured audio to its target.
    ///
    /// Returns the created or updated button, or `None` when no recording was running.
    pub fn finish_recording(&mut self, audio: impl Into<String>) -> BoardResult<Option<ButtonId>> {
        let Some(target) = self.recording.take() else {
            return Ok(None);
        };
        match target {
            RecordingTarget::NewButton => {
                let id = self.registry.create(NewButton::new(audio)).id;
                Ok(Some(id))
            }
            RecordingTarget::Rerecord(id) => {
                self.registry.rebind_audio(id, audio)?;
                Ok(Some(id))
            }
        }
    }

    /// Timer hook. Saves the session when the autosave interval has elapsed.
    ///
    /// Returns whether an autosave was attempted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.autosave.poll(now) {
            return false;
        }
        debug!("autosave");
        // a failed write is logged and the next tick retries
        let _ = self.registry.persist_now();
        true
    }
}
