//! Error type shared by the configuration, engine and terminal layers.
//!
//! The console itself never fails: a view that has not been sized yet
//! simply defers appends, and unknown font sizes fall back to a default.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the application shell.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::ConsoleConfig`].
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A color string was not of the form `#rrggbb`.
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    /// The engine program could not be started.
    #[error("failed to start engine `{program}`: {source}")]
    EngineSpawn {
        /// Program that was launched.
        program: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A message was sent before the engine was started or after it stopped.
    #[error("engine is not running")]
    EngineNotRunning,

    /// Terminal or pipe IO failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
