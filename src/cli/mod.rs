//! CLI command handlers.
//!
//! Scriptable access to a board stored on disk. Each invocation restores the
//! stored session, applies one operation, and lets the registry write the
//! result back through.

pub mod button;
pub mod common;
pub mod config;
pub mod palette;
pub mod session;

// Re-export types used by main.rs and tests
pub use button::{
    AddArgs, BindArgs, DeleteArgs, ListArgs, MoveArgs, RecolorArgs, RenameArgs, UnbindArgs,
};
pub use common::{BoardOptions, CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use palette::PaletteArgs;
pub use session::{ExportArgs, ImportArgs, ResetArgs};
