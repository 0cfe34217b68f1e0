//! Run with: cargo run -p anisthesia-bridge --example list_players [-- path/to/players.toml]
//!
//! Prints the `listPlayers` and `detectMedia` value trees as JSON.

use anisthesia_bridge::{Bridge, BridgeConfig};
use anisthesia_detect::{DetectionEngine, DetectionResult, EngineError, MediaFilter, PlayerDescriptor};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// No native engine is linked into this demo, so detection always fails.
struct Unlinked;

impl DetectionEngine for Unlinked {
    fn detect(
        &self,
        _players: &[PlayerDescriptor],
        _accept: &MediaFilter,
    ) -> Result<Vec<DetectionResult>, EngineError> {
        Err(EngineError)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match BridgeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            BridgeConfig::default()
        }
    };
    let bridge = Bridge::new(Unlinked).with_config(config);
    let args: Vec<Value> = std::env::args().skip(1).take(1).map(Value::String).collect();

    match bridge.list_players_by_type(&args) {
        Ok(players) => println!("{players:#}"),
        Err(e) => eprintln!("{}: {e}", e.name()),
    }

    let detect_args = if args.is_empty() {
        vec![Value::String(
            bridge.config().resolved_players_path().to_string_lossy().into_owned(),
        )]
    } else {
        args
    };
    match bridge.detect_media(&detect_args) {
        Ok(results) => println!("{results:#}"),
        Err(e) => eprintln!("{}: {e}", e.name()),
    }
}
