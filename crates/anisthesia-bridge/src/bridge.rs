use std::path::Path;
use std::sync::Arc;

use anisthesia_detect::{
    accept_all, ConfigLoader, DetectionEngine, PlayerDescriptor, TomlPlayerLoader,
};
use serde_json::Value;
use tokio::task::JoinError;

use crate::args;
use crate::config::BridgeConfig;
use crate::error::{guard, to_host, BridgeError, HostError};
use crate::translate;

/// Host-facing entry points for the detection engine.
///
/// Every call is independent: the player file is re-read and the engine
/// re-run each time, nothing is cached between calls.
#[derive(Clone)]
pub struct Bridge {
    loader: Arc<dyn ConfigLoader>,
    engine: Arc<dyn DetectionEngine>,
    config: BridgeConfig,
}

impl Bridge {
    /// Bridge over `engine`, reading TOML player files, with default settings.
    pub fn new(engine: impl DetectionEngine + 'static) -> Self {
        Self {
            loader: Arc::new(TomlPlayerLoader),
            engine: Arc::new(engine),
            config: BridgeConfig::default(),
        }
    }

    pub fn with_loader(mut self, loader: impl ConfigLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// `listPlayers([configPath])`: player names in file order.
    pub fn list_players(&self, args: &[Value]) -> Result<Value, HostError> {
        let path = args::player_list_path(args, &self.config.resolved_players_path())
            .map_err(|e| to_host("listPlayers", e))?;
        list_players(self.loader.as_ref(), &path).map_err(|e| to_host("listPlayers", e))
    }

    /// `listPlayersByType([configPath])`: `{ players, browsers }`.
    pub fn list_players_by_type(&self, args: &[Value]) -> Result<Value, HostError> {
        let path = args::player_list_path(args, &self.config.resolved_players_path())
            .map_err(|e| to_host("listPlayersByType", e))?;
        load_players(self.loader.as_ref(), &path)
            .map(|players| translate::translate_players_by_type(&players))
            .map_err(|e| to_host("listPlayersByType", e))
    }

    /// `detectMedia(playersConfigPath)`: one object per detected player window.
    ///
    /// Blocks for the whole detection pass.
    pub fn detect_media(&self, args: &[Value]) -> Result<Value, HostError> {
        let path = args::detection_path(args).map_err(|e| to_host("detectMedia", e))?;
        detect_media(self.loader.as_ref(), self.engine.as_ref(), &path)
            .map_err(|e| to_host("detectMedia", e))
    }

    /// Non-blocking `listPlayers`. Arguments are checked before anything is scheduled.
    pub async fn list_players_async(&self, args: &[Value]) -> Result<Value, HostError> {
        let path = args::player_list_path(args, &self.config.resolved_players_path())
            .map_err(|e| to_host("listPlayersAsync", e))?;
        let loader = Arc::clone(&self.loader);
        let outcome =
            tokio::task::spawn_blocking(move || list_players(loader.as_ref(), &path)).await;
        joined(outcome).map_err(|e| to_host("listPlayersAsync", e))
    }

    /// Non-blocking `detectMedia`: the same steps on a blocking worker thread.
    pub async fn detect_media_async(&self, args: &[Value]) -> Result<Value, HostError> {
        let path = args::detection_path(args).map_err(|e| to_host("detectMediaAsync", e))?;
        let loader = Arc::clone(&self.loader);
        let engine = Arc::clone(&self.engine);
        let outcome = tokio::task::spawn_blocking(move || {
            detect_media(loader.as_ref(), engine.as_ref(), &path)
        })
        .await;
        joined(outcome).map_err(|e| to_host("detectMediaAsync", e))
    }
}

fn load_players(
    loader: &dyn ConfigLoader,
    path: &Path,
) -> Result<Vec<PlayerDescriptor>, BridgeError> {
    guard("config loader", || {
        loader.load(path).map_err(|source| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    })
}

fn list_players(loader: &dyn ConfigLoader, path: &Path) -> Result<Value, BridgeError> {
    tracing::debug!(path = %path.display(), "Listing players");
    let players = load_players(loader, path)?;
    tracing::info!(count = players.len(), "Listed players");
    Ok(translate::translate_player_names(&players))
}

fn detect_media(
    loader: &dyn ConfigLoader,
    engine: &dyn DetectionEngine,
    path: &Path,
) -> Result<Value, BridgeError> {
    tracing::debug!(path = %path.display(), "Detecting media");
    let players = load_players(loader, path)?;
    let results = guard("detection engine", || {
        engine
            .detect(&players, &accept_all)
            .map_err(BridgeError::Detection)
    })?;
    tracing::info!(
        players = players.len(),
        results = results.len(),
        "Detection pass complete"
    );
    translate::translate_results(&results)
}

fn joined(outcome: Result<Result<Value, BridgeError>, JoinError>) -> Result<Value, BridgeError> {
    outcome.unwrap_or_else(|e| {
        Err(BridgeError::UnknownNative(format!(
            "detection worker failed: {e}"
        )))
    })
}
