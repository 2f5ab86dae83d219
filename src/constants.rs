//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the binary name and filesystem locations.

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "soundboard";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "Soundboard";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "SOUNDBOARD_CONFIG_DIR";
