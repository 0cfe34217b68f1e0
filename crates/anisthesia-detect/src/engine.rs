use std::path::Path;

use thiserror::Error;

use crate::model::{DetectionResult, MediaInfo};
use crate::player_db::PlayerDescriptor;

/// Predicate deciding which extracted media info the engine keeps.
pub type MediaFilter = dyn Fn(&MediaInfo) -> bool + Send + Sync;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read player definitions: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse player definitions: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure inside a detection pass. The engine reports no structured cause.
#[derive(Debug, Error)]
#[error("detection pass failed")]
pub struct EngineError;

/// Turns a player-definition file into descriptors.
pub trait ConfigLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Vec<PlayerDescriptor>, LoadError>;
}

/// Enumerates live processes and windows and extracts media for the given players.
///
/// Implementations may block for a long time (UI automation queries).
/// Results must be self-contained: no handle or buffer in them may be
/// revisited after `detect` returns.
pub trait DetectionEngine: Send + Sync {
    fn detect(
        &self,
        players: &[PlayerDescriptor],
        accept: &MediaFilter,
    ) -> Result<Vec<DetectionResult>, EngineError>;
}

/// Filter that keeps every media info item.
pub fn accept_all(_: &MediaInfo) -> bool {
    true
}
