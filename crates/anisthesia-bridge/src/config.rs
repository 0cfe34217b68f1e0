use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Workspace root holding the bundled `data/` directory.
const BUNDLED_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../..");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read bridge config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse bridge config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Player-definition file used when `listPlayers` gets no path.
    /// Relative paths are anchored at the bundled data root, not the working directory.
    pub players_path: PathBuf,
}

impl BridgeConfig {
    /// Load config: user file if it exists, otherwise built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit file, falling back to defaults when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded bridge config");
        Ok(config)
    }

    /// `players_path` with relative paths joined onto the bundled data root.
    pub fn resolved_players_path(&self) -> PathBuf {
        if self.players_path.is_absolute() {
            self.players_path.clone()
        } else {
            Path::new(BUNDLED_ROOT).join(&self.players_path)
        }
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "anisthesia")
            .map(|d| d.config_dir().join("bridge.toml"))
            .unwrap_or_else(|| PathBuf::from("bridge.toml"))
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = BridgeConfig::default();
        assert_eq!(config.players_path, Path::new("data/players.toml"));
    }

    #[test]
    fn test_default_players_path_is_anchored() {
        let resolved = BridgeConfig::default().resolved_players_path();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("data/players.toml"));
        assert!(resolved.exists());
    }

    #[test]
    fn test_absolute_players_path_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig {
            players_path: dir.path().join("players.toml"),
        };
        assert_eq!(config.resolved_players_path(), dir.path().join("players.toml"));
    }

    #[test]
    fn test_missing_user_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BridgeConfig::load_from(&dir.path().join("bridge.toml")).unwrap();
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn test_user_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(&path, "players_path = \"/opt/players.toml\"\n").unwrap();
        let config = BridgeConfig::load_from(&path).unwrap();
        assert_eq!(config.players_path, Path::new("/opt/players.toml"));
    }

    #[test]
    fn test_malformed_user_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(&path, "players_path = ").unwrap();
        assert!(matches!(
            BridgeConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
