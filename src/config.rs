//! Configuration loaded from `chess-console.toml`.
//!
//! Every field has a default, so a partial file (or none at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::console::MAX_LINES;
use crate::error::{Error, Result};
use crate::surface::Rgb;

/// File name looked up by [`ConsoleConfig::discover`].
pub const CONFIG_FILE: &str = "chess-console.toml";

/// Console and engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Console background.
    pub background: Rgb,
    /// Console text color.
    pub foreground: Rgb,
    /// Text size in pixels: 12, 16 or 20. Anything else means 12.
    pub text_size: i32,
    /// Lines kept in the console before the oldest are dropped.
    pub max_lines: usize,
    /// Physical display height in pixels; bounds lines drawn per frame.
    pub display_height: u32,
    /// Follow new output while scrolled to the bottom.
    pub auto_scroll: bool,
    /// Engine program and its fixed arguments.
    pub engine: EngineConfig,
}

/// How to launch the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Program to run.
    pub program: String,
    /// Arguments placed before the `logpath=` argument.
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "crafty".to_string(),
            args: Vec::new(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            background: Rgb::from_argb(0xFF00_0000),
            foreground: Rgb::from_argb(0xFFFF_FFFF),
            text_size: 12,
            max_lines: MAX_LINES,
            display_height: 480,
            auto_scroll: true,
            engine: EngineConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(Error::ConfigRead { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load config: {e}");
                Self::default()
            }
        }
    }

    /// The first existing config: current directory, then the user config
    /// directory.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("chess-console").join(CONFIG_FILE))
            .filter(|path| path.is_file())
    }
}
