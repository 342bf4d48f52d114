//! Error types for the readout application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ReadoutError`].
pub type Result<T> = std::result::Result<T, ReadoutError>;

/// Errors outside the line parser. The parser itself never fails.
#[derive(Error, Debug)]
pub enum ReadoutError {
    /// I/O error (settings file, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Settings file could not be (de)serialized.
    #[error("Settings format error: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    /// The configured sigrok-cli executable does not exist.
    #[error("sigrok-cli not found at {0:?}; select a valid executable in Settings")]
    ToolNotFound(PathBuf),

    /// No serial port selected.
    #[error("No serial port selected")]
    NoPort,

    /// The acquisition process could not be started.
    #[error("Failed to start {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The acquisition process exited with a failure code.
    #[error("sigrok-cli exited with code {code}; check that the meter interface is connected and the correct port is selected")]
    ToolExited { code: i32 },

    /// The recording file could not be opened.
    #[error("Failed to open CSV file {path:?}: {source}")]
    RecorderOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
