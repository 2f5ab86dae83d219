//! Soundboard Library
//!
//! Core of a sound button editor: an ordered set of buttons carrying audio,
//! position, color, and an optional keyboard shortcut, with grid-snapped drag
//! placement, exclusive shortcut ownership, and write-through persistence to a
//! durable key-value store and portable `.soundboard` files.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use error::{BoardError, BoardResult};
