//! Keyboard shortcut ownership.
//!
//! Each key belongs to at most one button. Binding a key that another button
//! holds takes it over; the displaced button is reported so its entity can be
//! updated. A single key listener resolves keys through this map instead of
//! every button carrying its own handler.

use std::collections::HashMap;

use crate::error::{BoardError, BoardResult};
use crate::models::ButtonId;

/// Control keys that can never trigger playback.
pub const RESERVED_KEYS: &[&str] = &["Shift", "Control", "Alt", "Meta", "Tab", "CapsLock", "Escape"];

/// Whether a key identifier names a reserved control key (or is empty).
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    key.is_empty() || RESERVED_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// What a successful bind changed besides the new mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOutcome {
    /// Button that held the key before and no longer has a shortcut
    pub displaced: Option<ButtonId>,
}

/// Two-way map between keys and buttons.
#[derive(Debug, Clone, Default)]
pub struct ShortcutBinder {
    by_key: HashMap<String, ButtonId>,
    by_button: HashMap<ButtonId, String>,
}

impl ShortcutBinder {
    /// Creates an empty binder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `button`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ReservedKey`] for control keys; existing bindings are untouched.
    pub fn bind(&mut self, button: ButtonId, key: &str) -> BoardResult<BindOutcome> {
        if is_reserved_key(key) {
            return Err(BoardError::ReservedKey(key.to_string()));
        }

        if self.by_key.get(key) == Some(&button) {
            return Ok(BindOutcome::default());
        }

        let mut outcome = BindOutcome::default();

        if let Some(previous_owner) = self.by_key.remove(key) {
            self.by_button.remove(&previous_owner);
            outcome.displaced = Some(previous_owner);
        }

        if let Some(old_key) = self.by_button.remove(&button) {
            self.by_key.remove(&old_key);
        }

        self.by_key.insert(key.to_string(), button);
        self.by_button.insert(button, key.to_string());

        Ok(outcome)
    }

    /// Removes whatever key `button` holds. Returns the released key, if any.
    pub fn unbind(&mut self, button: ButtonId) -> Option<String> {
        let key = self.by_button.remove(&button)?;
        self.by_key.remove(&key);
        Some(key)
    }

    /// Button that owns `key`.
    ///
    /// Callers check the suppression rules (recording in progress, text-entry
    /// focus) before dispatching.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<ButtonId> {
        self.by_key.get(key).copied()
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_button.clear();
    }
}
