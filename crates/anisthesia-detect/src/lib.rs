pub mod engine;
pub mod model;
pub mod player_db;

pub use engine::{accept_all, ConfigLoader, DetectionEngine, EngineError, LoadError, MediaFilter};
pub use model::{
    DetectionResult, MediaInfo, MediaInfoType, MediaItem, PlayerType, ProcessInfo, Strategy,
    WideString, WindowHandle, WindowInfo,
};
pub use player_db::{partition_by_type, PlayerDescriptor, TomlPlayerLoader};
