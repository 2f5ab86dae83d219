//! Service layer for board behavior.
//!
//! Placement, shortcut ownership, storage, and the registry that ties them
//! together. Nothing here depends on a rendering technology.

pub mod audio;
pub mod position;
pub mod registry;
pub mod session;
pub mod shortcuts;
pub mod storage;

// Re-export commonly used types and functions
pub use position::PositionEngine;
pub use registry::ButtonRegistry;
pub use session::{AutosaveTimer, ButtonSnapshot, SessionDocument, SessionState, SessionStore};
pub use shortcuts::ShortcutBinder;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
