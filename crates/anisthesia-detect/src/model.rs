use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player_db::PlayerDescriptor;

/// Kind of application a player definition describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerType {
    WebBrowser,
    #[default]
    #[serde(other)]
    Default,
}

impl PlayerType {
    /// Map a raw engine discriminant. Unknown codes fall back to `Default`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::WebBrowser,
            _ => Self::Default,
        }
    }
}

/// Technique the engine uses to pull media info out of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    WindowTitle,
    OpenFiles,
    UiAutomation,
    #[serde(other)]
    Unknown,
}

impl Strategy {
    /// Map a raw engine discriminant. Unknown codes fall back to `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::WindowTitle,
            1 => Self::OpenFiles,
            2 => Self::UiAutomation,
            _ => Self::Unknown,
        }
    }
}

/// What a piece of extracted media information refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaInfoType {
    File,
    Tab,
    Title,
    Url,
    #[serde(other)]
    Unknown,
}

impl MediaInfoType {
    /// Map a raw engine discriminant. Unknown codes fall back to `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::File,
            1 => Self::Tab,
            2 => Self::Title,
            3 => Self::Url,
            _ => Self::Unknown,
        }
    }
}

/// Text in the OS-native wide-character encoding (UTF-16 code units).
///
/// Kept as raw units until [`WideString::to_string_lossy`] re-encodes it at
/// the host boundary. Unpaired surrogates survive until then.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    pub fn units(&self) -> &[u16] {
        &self.0
    }

    /// Re-encode as UTF-8. Malformed sequences become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl fmt::Debug for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

/// Opaque numeric identity of an OS window.
///
/// Deliberately has no way back to the underlying OS object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    /// OS process identifier.
    pub id: u32,
    /// Executable name as reported by the OS.
    pub name: WideString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub class_name: WideString,
    /// Window title text.
    pub text: WideString,
}

/// A single typed value extracted from a player (file path, tab title, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub info_type: MediaInfoType,
    pub value: String,
}

impl MediaInfo {
    pub fn new(info_type: MediaInfoType, value: impl Into<String>) -> Self {
        Self {
            info_type,
            value: value.into(),
        }
    }
}

/// Media found inside one player window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaItem {
    pub duration: Duration,
    pub position: Duration,
    pub information: Vec<MediaInfo>,
}

/// One matched player/process/window with whatever media the engine found.
///
/// `media` is empty when the process matched but nothing could be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub player: PlayerDescriptor,
    pub process: ProcessInfo,
    pub window: WindowInfo,
    pub media: Vec<MediaItem>,
}
