//! Native result graph → host value tree.
//!
//! Every enum is mapped to a fixed tag string, wide strings are re-encoded
//! exactly once here, and numeric identities are widened to host numbers.
//! Nothing produced by this module borrows from engine memory.

use std::time::Duration;

use anisthesia_detect::{
    partition_by_type, DetectionResult, MediaInfo, MediaInfoType, MediaItem, PlayerDescriptor,
    PlayerType, ProcessInfo, Strategy, WindowInfo,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::BridgeError;

/// The engine never reports playback state, so every media item carries this tag.
pub const MEDIA_STATE_UNKNOWN: &str = "Unknown";

pub fn player_type_tag(player_type: PlayerType) -> &'static str {
    match player_type {
        PlayerType::WebBrowser => "WebBrowser",
        PlayerType::Default => "Default",
    }
}

pub fn strategy_tag(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::WindowTitle => "WindowTitle",
        Strategy::OpenFiles => "OpenFiles",
        Strategy::UiAutomation => "UiAutomation",
        Strategy::Unknown => "Unknown",
    }
}

pub fn media_info_type_tag(info_type: MediaInfoType) -> &'static str {
    match info_type {
        MediaInfoType::File => "File",
        MediaInfoType::Tab => "Tab",
        MediaInfoType::Title => "Title",
        MediaInfoType::Url => "Url",
        MediaInfoType::Unknown => "Unknown",
    }
}

/// Host numbers are doubles; values above 2^53 lose precision.
fn widen(n: u64) -> f64 {
    n as f64
}

/// Raw millisecond count, the engine's native time unit.
fn time_units(d: Duration) -> f64 {
    d.as_millis() as f64
}

#[derive(Debug, Serialize)]
struct HostResult<'a> {
    player: HostPlayer<'a>,
    process: HostProcess,
    window: HostWindow,
    media: Vec<HostMedia<'a>>,
}

#[derive(Debug, Serialize)]
struct HostPlayer<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    player_type: &'static str,
    strategies: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct HostProcess {
    id: f64,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HostWindow {
    handle: f64,
    class_name: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct HostMedia<'a> {
    state: &'static str,
    duration: f64,
    position: f64,
    information: Vec<HostMediaInfo<'a>>,
}

#[derive(Debug, Serialize)]
struct HostMediaInfo<'a> {
    #[serde(rename = "type")]
    info_type: &'static str,
    value: &'a str,
}

impl<'a> From<&'a PlayerDescriptor> for HostPlayer<'a> {
    fn from(player: &'a PlayerDescriptor) -> Self {
        Self {
            name: &player.name,
            player_type: player_type_tag(player.player_type),
            strategies: player.strategies.iter().copied().map(strategy_tag).collect(),
        }
    }
}

impl From<&ProcessInfo> for HostProcess {
    fn from(process: &ProcessInfo) -> Self {
        Self {
            id: widen(u64::from(process.id)),
            name: process.name.to_string_lossy(),
        }
    }
}

impl From<&WindowInfo> for HostWindow {
    fn from(window: &WindowInfo) -> Self {
        Self {
            handle: widen(window.handle.as_u64()),
            class_name: window.class_name.to_string_lossy(),
            text: window.text.to_string_lossy(),
        }
    }
}

impl<'a> From<&'a MediaItem> for HostMedia<'a> {
    fn from(media: &'a MediaItem) -> Self {
        Self {
            state: MEDIA_STATE_UNKNOWN,
            duration: time_units(media.duration),
            position: time_units(media.position),
            information: media.information.iter().map(HostMediaInfo::from).collect(),
        }
    }
}

impl<'a> From<&'a MediaInfo> for HostMediaInfo<'a> {
    fn from(info: &'a MediaInfo) -> Self {
        Self {
            info_type: media_info_type_tag(info.info_type),
            value: &info.value,
        }
    }
}

impl<'a> From<&'a DetectionResult> for HostResult<'a> {
    fn from(result: &'a DetectionResult) -> Self {
        Self {
            player: HostPlayer::from(&result.player),
            process: HostProcess::from(&result.process),
            window: HostWindow::from(&result.window),
            media: result.media.iter().map(HostMedia::from).collect(),
        }
    }
}

/// Translate a full detection pass. Either every result converts or the call fails.
pub fn translate_results(results: &[DetectionResult]) -> Result<Value, BridgeError> {
    let host: Vec<HostResult<'_>> = results.iter().map(HostResult::from).collect();
    serde_json::to_value(&host)
        .map_err(|e| BridgeError::UnknownNative(format!("failed to translate results: {e}")))
}

/// Player names in file order, duplicates kept.
pub fn translate_player_names(players: &[PlayerDescriptor]) -> Value {
    Value::Array(
        players
            .iter()
            .map(|p| Value::String(p.name.clone()))
            .collect(),
    )
}

/// `{ players, browsers }`: names split by player type, each in file order.
pub fn translate_players_by_type(players: &[PlayerDescriptor]) -> Value {
    let (default, browsers) = partition_by_type(players);
    let names = |list: Vec<&PlayerDescriptor>| -> Value {
        list.into_iter()
            .map(|p| Value::String(p.name.clone()))
            .collect()
    };
    serde_json::json!({
        "players": names(default),
        "browsers": names(browsers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anisthesia_detect::{WideString, WindowHandle};
    use serde_json::json;

    fn sample_result() -> DetectionResult {
        DetectionResult {
            player: PlayerDescriptor::new(
                "mpv",
                PlayerType::Default,
                vec![Strategy::WindowTitle, Strategy::UiAutomation],
            ),
            process: ProcessInfo {
                id: 4242,
                name: WideString::from("mpv.exe"),
            },
            window: WindowInfo {
                handle: WindowHandle::new(0x0001_0A2C),
                class_name: WideString::from("mpv"),
                text: WideString::from("日本語タイトル"),
            },
            media: vec![MediaItem {
                duration: Duration::from_millis(1_440_000),
                position: Duration::from_millis(61_500),
                information: vec![
                    MediaInfo::new(MediaInfoType::File, "C:\\anime\\ep05.mkv"),
                    MediaInfo::new(MediaInfoType::Title, "Episode 5"),
                ],
            }],
        }
    }

    #[test]
    fn test_full_shape() {
        let value = translate_results(&[sample_result()]).unwrap();
        assert_eq!(
            value,
            json!([{
                "player": {
                    "name": "mpv",
                    "type": "Default",
                    "strategies": ["WindowTitle", "UiAutomation"],
                },
                "process": { "id": 4242.0, "name": "mpv.exe" },
                "window": {
                    "handle": 68140.0,
                    "className": "mpv",
                    "text": "日本語タイトル",
                },
                "media": [{
                    "state": "Unknown",
                    "duration": 1440000.0,
                    "position": 61500.0,
                    "information": [
                        { "type": "File", "value": "C:\\anime\\ep05.mkv" },
                        { "type": "Title", "value": "Episode 5" },
                    ],
                }],
            }])
        );
    }

    #[test]
    fn test_unknown_strategy_is_tagged() {
        let mut result = sample_result();
        result.player.strategies = vec![Strategy::OpenFiles, Strategy::from_raw(77)];
        let value = translate_results(&[result]).unwrap();
        assert_eq!(
            value[0]["player"]["strategies"],
            json!(["OpenFiles", "Unknown"])
        );
    }

    #[test]
    fn test_browser_and_unknown_info_tags() {
        let mut result = sample_result();
        result.player.player_type = PlayerType::WebBrowser;
        result.media[0].information = vec![
            MediaInfo::new(MediaInfoType::Tab, "Frieren - Crunchyroll"),
            MediaInfo::new(MediaInfoType::Url, "https://crunchyroll.com/watch/x"),
            MediaInfo::new(MediaInfoType::from_raw(12), "?"),
        ];
        let value = translate_results(&[result]).unwrap();
        assert_eq!(value[0]["player"]["type"], "WebBrowser");
        let types: Vec<_> = value[0]["media"][0]["information"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["type"].as_str().unwrap())
            .collect();
        assert_eq!(types, ["Tab", "Url", "Unknown"]);
    }

    #[test]
    fn test_max_process_id_exact() {
        let mut result = sample_result();
        result.process.id = u32::MAX;
        let value = translate_results(&[result]).unwrap();
        assert_eq!(value[0]["process"]["id"].as_f64(), Some(4294967295.0));
    }

    #[test]
    fn test_empty_media_is_empty_array() {
        let mut result = sample_result();
        result.media.clear();
        let value = translate_results(&[result]).unwrap();
        assert_eq!(value[0]["media"], json!([]));
    }

    #[test]
    fn test_malformed_wide_text_is_best_effort() {
        let mut result = sample_result();
        result.window.text = WideString::from_units(vec![0x0045, 0xDC00, 0x0070]);
        let value = translate_results(&[result]).unwrap();
        assert_eq!(value[0]["window"]["text"], "E\u{FFFD}p");
    }

    #[test]
    fn test_no_results() {
        assert_eq!(translate_results(&[]).unwrap(), json!([]));
    }

    #[test]
    fn test_player_names_keep_duplicates() {
        let players = vec![
            PlayerDescriptor::new("mpv", PlayerType::Default, vec![]),
            PlayerDescriptor::new("Mozilla Firefox", PlayerType::WebBrowser, vec![]),
            PlayerDescriptor::new("mpv", PlayerType::Default, vec![]),
        ];
        assert_eq!(
            translate_player_names(&players),
            json!(["mpv", "Mozilla Firefox", "mpv"])
        );
        assert_eq!(
            translate_players_by_type(&players),
            json!({ "players": ["mpv", "mpv"], "browsers": ["Mozilla Firefox"] })
        );
    }
}
