//! Shared test fixtures for integration and CLI tests.
#![allow(dead_code)] // not every test binary uses every fixture

use soundboard::models::{BoardRect, Size};
use soundboard::services::{ButtonRegistry, FileStore, PositionEngine, SessionStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A tiny WAV-looking payload as a data URI.
pub const SAMPLE_AUDIO: &str = "data:audio/wav;base64,UklGRiQAAABXQVZF";

/// The 800 x 600 board with 64 x 64 buttons on an 8 px grid.
pub fn standard_engine() -> PositionEngine {
    PositionEngine::new(BoardRect::new(800.0, 600.0), Size::new(64.0, 64.0), 8.0)
}

/// Registry over a file store in `dir`, with a fixed random seed.
pub fn file_registry(dir: &Path) -> ButtonRegistry {
    ButtonRegistry::new(standard_engine(), SessionStore::new(FileStore::new(dir))).with_seed(42)
}

/// Writes a small audio file into `dir` and returns its path.
pub fn write_audio_file(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, b"RIFF\x24\x00\x00\x00WAVEfmt ").expect("write audio fixture");
    path
}

/// Writes a session file with the given JSON body.
pub fn write_session_file(dir: &Path, file_name: &str, json: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, json).expect("write session fixture");
    path
}

/// Path to the soundboard binary.
pub fn soundboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_soundboard")
}

/// Isolated environment for running the binary: its own config dir and store.
pub struct CliEnv {
    /// Holds config, store, and scratch files
    pub temp: TempDir,
}

impl CliEnv {
    /// Creates a fresh environment.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp dir"),
        }
    }

    /// Root of the scratch directory.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Config directory handed to the binary.
    pub fn config_dir(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    /// Store directory used when no `--store-dir` is given.
    pub fn default_store_dir(&self) -> PathBuf {
        self.config_dir().join("store")
    }

    /// Command with the isolated config directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(soundboard_bin());
        cmd.env("SOUNDBOARD_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.current_dir(self.temp.path());
        cmd.args(args);
        cmd
    }

    /// Runs the binary and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute command")
    }

    /// Runs the binary and asserts it exits 0.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "{args:?} should succeed. stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
