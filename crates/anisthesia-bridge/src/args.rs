//! Host argument validation. Nothing here touches the filesystem or the engine.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::BridgeError;

/// Resolve the config path for `listPlayers`.
///
/// Accepts no argument, a single null (both mean `default`), or a single
/// string. An empty string is passed through and fails at load time.
pub fn player_list_path(args: &[Value], default: &Path) -> Result<PathBuf, BridgeError> {
    match args {
        [] | [Value::Null] => Ok(default.to_path_buf()),
        [Value::String(path)] => Ok(PathBuf::from(path)),
        [other] => Err(BridgeError::InvalidArgument(format!(
            "Optional argument configPath must be a string, null, or undefined (got {})",
            type_name(other)
        ))),
        _ => Err(BridgeError::InvalidArgument(format!(
            "Expected 0 or 1 argument (optional configPath: string), got {}",
            args.len()
        ))),
    }
}

/// Resolve the config path for `detectMedia`. Exactly one string, no default.
pub fn detection_path(args: &[Value]) -> Result<PathBuf, BridgeError> {
    match args {
        [Value::String(path)] => Ok(PathBuf::from(path)),
        [other] => Err(BridgeError::InvalidArgument(format!(
            "Expected 1 string argument: playersConfigPath (got {})",
            type_name(other)
        ))),
        _ => Err(BridgeError::InvalidArgument(format!(
            "Expected 1 string argument: playersConfigPath, got {} arguments",
            args.len()
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
