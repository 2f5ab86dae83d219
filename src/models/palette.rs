//! Named button color palette.
//!
//! New buttons pick a color at random from this palette. Users can edit the
//! color behind each name; the edited palette is persisted separately from the
//! session under its own storage key.

use std::collections::BTreeMap;

use rand::Rng;

use super::RgbColor;

/// The built-in palette, in display order.
pub const DEFAULT_BUTTON_COLORS: [(&str, RgbColor); 8] = [
    ("Background", RgbColor::new(0xFF, 0xFF, 0xFF)),
    ("Foreground", RgbColor::new(0x00, 0x00, 0x00)),
    ("Button", RgbColor::new(0x9C, 0x27, 0xB0)),
    ("Foreground2", RgbColor::new(0xFF, 0x98, 0x00)),
    ("Cyan", RgbColor::new(0x00, 0xBC, 0xD4)),
    ("Indigo", RgbColor::new(0x3F, 0x51, 0xB5)),
    ("Pink", RgbColor::new(0xFF, 0x40, 0x81)),
    ("Teal", RgbColor::new(0x00, 0x96, 0x88)),
];

/// A single named palette slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Slot name (e.g., "Cyan")
    pub name: String,
    /// Current color of the slot
    pub color: RgbColor,
}

/// Ordered set of named colors. The set of names is fixed; only colors change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPalette {
    entries: Vec<PaletteEntry>,
}

impl ButtonPalette {
    /// All entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Looks up a slot by name (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RgbColor> {
        self.find(name).map(|entry| entry.color)
    }

    /// Whether the palette currently offers this color.
    #[must_use]
    pub fn contains_color(&self, color: RgbColor) -> bool {
        self.entries.iter().any(|entry| entry.color == color)
    }

    /// Changes the color of a named slot. Returns false for unknown names.
    pub fn set(&mut self, name: &str, color: RgbColor) -> bool {
        match self.entries.iter_mut().find(|e| e.name.eq_ignore_ascii_case(name)) {
            Some(entry) => {
                entry.color = color;
                true
            }
            None => false,
        }
    }

    /// Picks a color uniformly at random.
    pub fn random_color<R: Rng + ?Sized>(&self, rng: &mut R) -> RgbColor {
        if self.entries.is_empty() {
            return RgbColor::default();
        }
        self.entries[rng.gen_range(0..self.entries.len())].color
    }

    /// Applies stored overrides onto the known slots.
    ///
    /// Names that are not part of the palette are ignored and returned so the
    /// caller can report them.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, RgbColor>) -> Vec<String> {
        overrides
            .iter()
            .filter(|(name, color)| !self.set(name, **color))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// The full palette as a name -> color map, suitable for persisting.
    #[must_use]
    pub fn to_overrides(&self) -> BTreeMap<String, RgbColor> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.color))
            .collect()
    }

    fn find(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_BUTTON_COLORS
                .iter()
                .map(|(name, color)| PaletteEntry {
                    name: (*name).to_string(),
                    color: *color,
                })
                .collect(),
        }
    }
}
