//! Newsdesk engine: server IO and effect execution.
mod api;
mod download;
mod engine;
mod sse;
mod tail;
mod types;

pub use api::{ApiSettings, Backend, ReqwestBackend, EXPORT_PATH, LOG_STREAM_PATH, RUN_PATH};
pub use download::{
    export_filename, save_atomically, utc_today, DateClock, DownloadWriter, SaveError,
};
pub use engine::{EngineConfig, EngineEvents, EngineHandle};
pub use sse::{SseEvent, SseParser};
pub use tail::{ChannelEventSink, EventSink, LogTailer, DEFAULT_RETRY};
pub use types::{ApiError, EngineEvent, FailureKind};
