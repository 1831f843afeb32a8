pub mod audio;
pub mod backend;
pub mod config;
pub mod http;
pub mod live;
pub mod session;
pub mod tools;

pub use audio::{
    AudioFrame, CaptureBackend, CaptureBackendFactory, CaptureConfig, CaptureError,
    CaptureSource, DiscardSink, PcmBuffer, PlaybackScheduler, PlaybackSink,
};
pub use backend::{
    generate_video_and_wait, AdScript, AdStyle, GenAiClient, MediaBackend, VideoOperation,
};
pub use config::Config;
pub use http::{create_router, AppSettings, AppState};
pub use live::{ClientEvent, LiveBackend, LiveConfig, ServerEvent, WsLiveClient};
pub use session::{
    Fragment, SessionConfig, SessionState, SessionStats, Speaker, Transcript, TranscriptEntry,
    VoiceSession,
};
