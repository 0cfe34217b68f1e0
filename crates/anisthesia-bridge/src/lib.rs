//! Host-facing boundary over the media detection engine.
//!
//! Host arguments and return values are [`serde_json::Value`] trees. Two
//! operations are exposed, `listPlayers` and `detectMedia`, each in a
//! blocking and an async form; every failure reaches the host as a
//! [`HostError`].

pub mod args;
pub mod bridge;
pub mod config;
pub mod error;
pub mod translate;

pub use bridge::Bridge;
pub use config::{BridgeConfig, ConfigError};
pub use error::{BridgeError, ErrorKind, HostError};
