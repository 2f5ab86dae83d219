//! Data models for sound buttons, board geometry, and colors.
//!
//! Models are independent of storage and UI; services own the behavior.

pub mod button;
pub mod palette;
pub mod position;
pub mod rgb;

// Re-export all model types
pub use button::{Button, ButtonId, NewButton, DEFAULT_BUTTON_NAME};
pub use palette::{ButtonPalette, PaletteEntry, DEFAULT_BUTTON_COLORS};
pub use position::{BoardRect, Point, Position, Size};
pub use rgb::RgbColor;
