//! The in-memory button collection and its mutation pipeline.
//!
//! Every committed mutation runs the same stages: apply the change, notify
//! change listeners, then write the session through to the store. Pointer
//! moves during a drag are the exception; they only update the position and
//! the drag's end commits once.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::error::{BoardError, BoardResult};
use crate::models::{
    BoardRect, Button, ButtonId, ButtonPalette, NewButton, Point, Position, RgbColor,
    DEFAULT_BUTTON_NAME,
};
use crate::services::position::PositionEngine;
use crate::services::session::{SessionDocument, SessionState, SessionStore};
use crate::services::shortcuts::{BindOutcome, ShortcutBinder};

/// Callback fired after every committed mutation with the current buttons.
pub type ChangeListener = Box<dyn FnMut(&[Button])>;

/// A drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    button: ButtonId,
    /// Pointer-to-button-origin delta captured at drag start
    offset: Point,
}

/// Owns every button, the shortcut map, and the session store.
pub struct ButtonRegistry {
    buttons: Vec<Button>,
    shortcuts: ShortcutBinder,
    engine: PositionEngine,
    palette: ButtonPalette,
    store: SessionStore,
    rng: StdRng,
    drag: Option<DragState>,
    listeners: Vec<ChangeListener>,
}

impl std::fmt::Debug for ButtonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonRegistry")
            .field("buttons", &self.buttons.len())
            .field("store", &self.store)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl ButtonRegistry {
    /// Creates an empty registry. The palette is read from the store; the
    /// session is not (see [`ButtonRegistry::restore`]).
    pub fn new(engine: PositionEngine, store: SessionStore) -> Self {
        let palette = store.load_palette();
        Self {
            buttons: Vec::new(),
            shortcuts: ShortcutBinder::new(),
            engine,
            palette,
            store,
            rng: StdRng::from_entropy(),
            drag: None,
            listeners: Vec::new(),
        }
    }

    /// Uses a seeded random source for placement and color picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Rebuilds the registry from the stored session, if there is one.
    ///
    /// Returns the number of buttons restored. Nothing is written back.
    pub fn restore(&mut self) -> usize {
        match self.store.load() {
            Some(doc) => {
                self.replace_buttons(&doc);
                self.notify();
                self.buttons.len()
            }
            None => 0,
        }
    }

    /// Registers a listener for committed changes.
    pub fn on_buttons_changed(&mut self, listener: impl FnMut(&[Button]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Buttons in display order.
    #[must_use]
    pub fn list(&self) -> &[Button] {
        &self.buttons
    }

    /// Number of buttons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Whether the board has no buttons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Looks up a button by id.
    #[must_use]
    pub fn get_button(&self, id: ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Button bound to `key`, for the keyboard dispatcher.
    #[must_use]
    pub fn resolve_shortcut(&self, key: &str) -> Option<ButtonId> {
        self.shortcuts.resolve(key)
    }

    /// Palette used for default colors.
    #[must_use]
    pub fn palette(&self) -> &ButtonPalette {
        &self.palette
    }

    /// Placement engine for the current board.
    #[must_use]
    pub const fn engine(&self) -> &PositionEngine {
        &self.engine
    }

    /// Lifecycle state of the persisted session.
    #[must_use]
    pub const fn session_state(&self) -> SessionState {
        self.store.state()
    }

    /// Updates the board size used for placement and clamping.
    pub fn set_board(&mut self, board: BoardRect) {
        self.engine.set_board(board);
    }

    /// Adds a button. Missing position, color, and name are filled in.
    pub fn create(&mut self, request: NewButton) -> &Button {
        let index = self.insert(request);
        debug!(id = %self.buttons[index].id, "button created");
        self.commit();
        &self.buttons[index]
    }

    /// Renames a button. Blank names are rejected and leave the old name.
    ///
    /// Returns whether the name changed.
    pub fn rename(&mut self, id: ButtonId, new_name: &str) -> BoardResult<bool> {
        let index = self.index_of(id)?;
        if new_name.trim().is_empty() {
            debug!(%id, "ignoring blank rename");
            return Ok(false);
        }
        self.buttons[index].name = new_name.to_string();
        self.commit();
        Ok(true)
    }

    /// Changes a button's color.
    pub fn recolor(&mut self, id: ButtonId, color: RgbColor) -> BoardResult<()> {
        let index = self.index_of(id)?;
        self.buttons[index].color = color;
        self.commit();
        Ok(())
    }

    /// Replaces a button's audio payload (re-recording).
    pub fn rebind_audio(&mut self, id: ButtonId, audio: impl Into<String>) -> BoardResult<()> {
        let index = self.index_of(id)?;
        self.buttons[index].audio = audio.into();
        self.commit();
        Ok(())
    }

    /// Binds `key` to a button, taking it from any other holder.
    ///
    /// An empty key unbinds. Reserved keys fail without touching any binding.
    pub fn bind_shortcut(&mut self, id: ButtonId, key: &str) -> BoardResult<()> {
        let index = self.index_of(id)?;
        if key.is_empty() {
            return self.unbind_shortcut(id);
        }
        if self.buttons[index].shortcut_key.as_deref() == Some(key) {
            return Ok(());
        }

        let outcome = self.shortcuts.bind(id, key)?;
        self.apply_bind(index, key, &outcome);
        self.commit();
        Ok(())
    }

    /// Removes a button's shortcut. Calling it again changes nothing.
    pub fn unbind_shortcut(&mut self, id: ButtonId) -> BoardResult<()> {
        let index = self.index_of(id)?;
        self.shortcuts.unbind(id);
        self.buttons[index].shortcut_key = None;
        self.commit();
        Ok(())
    }

    /// Deletes a button and releases its shortcut.
    ///
    /// Unknown ids are a no-op; returns whether a button was removed.
    pub fn delete(&mut self, id: ButtonId) -> bool {
        let Ok(index) = self.index_of(id) else {
            return false;
        };
        self.shortcuts.unbind(id);
        self.buttons.remove(index);
        if self.drag.is_some_and(|d| d.button == id) {
            self.drag = None;
        }
        debug!(%id, "button deleted");
        self.commit();
        true
    }

    /// Starts dragging a button grabbed at `pointer`.
    pub fn begin_drag(&mut self, id: ButtonId, pointer: Point) -> BoardResult<()> {
        let index = self.index_of(id)?;
        let origin = self.buttons[index].position.as_point();
        let pointer = pointer.sanitized();
        self.drag = Some(DragState {
            button: id,
            offset: Point::new(pointer.x - origin.x, pointer.y - origin.y),
        });
        Ok(())
    }

    /// Moves a button to follow the pointer. Does not persist.
    pub fn reposition(
        &mut self,
        id: ButtonId,
        raw_pointer: Point,
        snap_enabled: bool,
    ) -> BoardResult<Position> {
        let index = self.index_of(id)?;
        let offset = self
            .drag
            .filter(|d| d.button == id)
            .map_or(Point::default(), |d| d.offset);

        let position = self.engine.compute_position(raw_pointer, offset, snap_enabled);
        self.buttons[index].position = position;
        self.store.mark_dirty();
        Ok(position)
    }

    /// Button currently being dragged.
    #[must_use]
    pub fn dragged(&self) -> Option<ButtonId> {
        self.drag.map(|d| d.button)
    }

    /// Ends the current drag and commits the final position once.
    pub fn end_drag(&mut self) -> Option<ButtonId> {
        let drag = self.drag.take()?;
        self.commit();
        Some(drag.button)
    }

    /// Removes every button and the stored session.
    pub fn reset(&mut self) -> BoardResult<()> {
        self.buttons.clear();
        self.shortcuts.clear();
        self.drag = None;
        // stays dirty until the stored session is actually gone
        self.store.mark_dirty();
        self.notify();
        info!("soundboard reset");
        self.store.clear()
    }

    /// Current session document.
    #[must_use]
    pub fn snapshot(&self) -> SessionDocument {
        SessionStore::snapshot(&self.buttons)
    }

    /// Writes the current session unconditionally (autosave).
    pub fn persist_now(&mut self) -> BoardResult<()> {
        let doc = self.snapshot();
        self.store.persist(&doc)
    }

    /// Serializes the current session to the portable file format.
    pub fn export_to_file(&self) -> BoardResult<Vec<u8>> {
        SessionStore::export_to_file(&self.snapshot())
    }

    /// Replaces the whole board with an imported session file.
    ///
    /// The file is parsed completely before anything changes; on
    /// [`BoardError::InvalidFormat`] the registry is untouched.
    pub fn import_from_file(&mut self, bytes: &[u8]) -> BoardResult<usize> {
        let doc = SessionStore::import_from_file(bytes)?;
        self.replace_buttons(&doc);
        info!(buttons = self.buttons.len(), "session imported");
        self.commit();
        Ok(self.buttons.len())
    }

    /// Changes a named palette color and persists the palette.
    ///
    /// Returns false for names not in the palette.
    pub fn set_palette_color(&mut self, name: &str, color: RgbColor) -> BoardResult<bool> {
        if !self.palette.set(name, color) {
            return Ok(false);
        }
        self.store.persist_palette(&self.palette)?;
        Ok(true)
    }

    /// Restores the default palette and drops stored overrides.
    pub fn reset_palette(&mut self) -> BoardResult<()> {
        self.palette = ButtonPalette::default();
        self.store.clear_palette()
    }

    fn index_of(&self, id: ButtonId) -> BoardResult<usize> {
        self.buttons
            .iter()
            .position(|b| b.id == id)
            .ok_or(BoardError::NotFound(id))
    }

    /// Adds a button without committing. Returns its index.
    fn insert(&mut self, request: NewButton) -> usize {
        let id = ButtonId::new();
        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BUTTON_NAME.to_string());
        let position = request
            .position
            .unwrap_or_else(|| self.engine.initial_position(&mut self.rng));
        let color = request
            .color
            .unwrap_or_else(|| self.palette.random_color(&mut self.rng));

        self.buttons.push(Button {
            id,
            name,
            audio: request.audio,
            position,
            color,
            shortcut_key: None,
        });
        let index = self.buttons.len() - 1;

        if let Some(key) = request.shortcut_key.filter(|k| !k.is_empty()) {
            match self.shortcuts.bind(id, &key) {
                Ok(outcome) => self.apply_bind(index, &key, &outcome),
                Err(e) => warn!(%id, "Button created without shortcut: {e}"),
            }
        }

        index
    }

    fn apply_bind(&mut self, index: usize, key: &str, outcome: &BindOutcome) {
        if let Some(displaced) = outcome.displaced {
            if let Some(other) = self.buttons.iter_mut().find(|b| b.id == displaced) {
                debug!(key, from = %displaced, "shortcut taken over");
                other.shortcut_key = None;
            }
        }
        self.buttons[index].shortcut_key = Some(key.to_string());
    }

    fn replace_buttons(&mut self, doc: &SessionDocument) {
        self.buttons.clear();
        self.shortcuts.clear();
        self.drag = None;

        for snapshot in &doc.buttons {
            let mut request = NewButton::new(snapshot.audio.clone())
                .with_name(snapshot.name.clone())
                .with_shortcut(snapshot.shortcut.clone());
            request.position = snapshot.position;
            request.color = snapshot.color;
            self.insert(request);
        }
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.buttons);
        }
    }

    fn commit(&mut self) {
        self.store.mark_dirty();
        self.notify();
        let doc = self.snapshot();
        // failures are logged by the store and retried on the next trigger
        let _ = self.store.persist(&doc);
    }
}
