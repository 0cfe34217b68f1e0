use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anisthesia_detect::{EngineError, LoadError};
use serde::Serialize;
use thiserror::Error;

/// Classification of failures crossing the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidArgument,
    ConfigParse,
    Detection,
    UnknownNative,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("failed to parse players configuration file: {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("detection engine failed to get results")]
    Detection(#[source] EngineError),

    #[error("an unknown error occurred in the native layer: {0}")]
    UnknownNative(String),
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ConfigParse { .. } => ErrorKind::ConfigParse,
            Self::Detection(_) => ErrorKind::Detection,
            Self::UnknownNative(_) => ErrorKind::UnknownNative,
        }
    }
}

/// The one error type the host ever sees: a name and a message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct HostError {
    #[serde(skip)]
    kind: ErrorKind,
    name: &'static str,
    message: String,
}

impl HostError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Host error class: `TypeError` for argument violations, `Error` otherwise.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<BridgeError> for HostError {
    fn from(err: BridgeError) -> Self {
        let kind = err.kind();
        let name = match kind {
            ErrorKind::InvalidArgument => "TypeError",
            _ => "Error",
        };
        Self {
            kind,
            name,
            message: err.to_string(),
        }
    }
}

/// Convert a failure into its host form, logging it on the way out.
pub(crate) fn to_host(operation: &'static str, err: BridgeError) -> HostError {
    tracing::warn!(operation, kind = ?err.kind(), error = %err, "Operation failed");
    HostError::from(err)
}

/// Run a native stage, turning a panic into `UnknownNative` instead of unwinding into the host.
pub(crate) fn guard<T>(
    stage: &'static str,
    f: impl FnOnce() -> Result<T, BridgeError>,
) -> Result<T, BridgeError> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(BridgeError::UnknownNative(format!(
            "{stage} panicked: {}",
            panic_message(&*payload)
        )))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
