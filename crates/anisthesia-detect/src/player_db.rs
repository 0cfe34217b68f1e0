use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{ConfigLoader, LoadError};
use crate::model::{PlayerType, Strategy};

/// Definition of a media player and which strategies apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDescriptor {
    /// Display name (e.g., "mpv", "Mozilla Firefox").
    pub name: String,
    #[serde(rename = "type", default)]
    pub player_type: PlayerType,
    /// Strategies in evaluation order.
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    /// Executable names to match against process names.
    #[serde(default)]
    pub executables: Vec<String>,
    /// Window class names.
    #[serde(default)]
    pub windows: Vec<String>,
    /// Regex with capture group 1 around the media title, if the window title carries one.
    #[serde(default)]
    pub window_title_format: Option<String>,
}

impl PlayerDescriptor {
    pub fn new(name: impl Into<String>, player_type: PlayerType, strategies: Vec<Strategy>) -> Self {
        Self {
            name: name.into(),
            player_type,
            strategies,
            executables: Vec::new(),
            windows: Vec::new(),
            window_title_format: None,
        }
    }

    pub fn is_browser(&self) -> bool {
        self.player_type == PlayerType::WebBrowser
    }
}

/// Wrapper for TOML deserialization.
#[derive(Debug, Deserialize)]
struct PlayerFile {
    #[serde(rename = "player", default)]
    players: Vec<PlayerDescriptor>,
}

/// Parse player definitions from a TOML string, keeping file order.
pub fn from_toml(toml_str: &str) -> Result<Vec<PlayerDescriptor>, toml::de::Error> {
    let file: PlayerFile = toml::from_str(toml_str)?;
    Ok(file.players)
}

/// Split definitions into (default players, web browsers), each in file order.
pub fn partition_by_type(
    players: &[PlayerDescriptor],
) -> (Vec<&PlayerDescriptor>, Vec<&PlayerDescriptor>) {
    players.iter().partition(|p| !p.is_browser())
}

/// Reads `[[player]]` tables from a TOML file on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlPlayerLoader;

impl ConfigLoader for TomlPlayerLoader {
    fn load(&self, path: &Path) -> Result<Vec<PlayerDescriptor>, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let players = from_toml(&content)?;
        tracing::debug!(path = %path.display(), count = players.len(), "Loaded player definitions");
        Ok(players)
    }
}
