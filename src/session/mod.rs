//! Voice session management
//!
//! This module provides the `VoiceSession` abstraction that manages:
//! - Microphone (or file) capture and fixed-point PCM encoding
//! - The bidirectional stream to the live voice backend
//! - Transcript reconciliation from partial/final fragments
//! - Gapless playback scheduling of synthesized audio
//! - Session state and idempotent teardown

mod config;
mod session;
mod stats;
mod transcript;

pub use config::SessionConfig;
pub use session::{SessionState, VoiceSession};
pub use stats::SessionStats;
pub use transcript::{Fragment, Speaker, Transcript, TranscriptEntry};
