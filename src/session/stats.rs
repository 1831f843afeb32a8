use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::SessionState;

/// Snapshot of a voice session's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Current lifecycle state
    pub state: SessionState,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// Total duration in seconds
    pub duration_secs: f64,

    /// Number of audio chunks sent upstream
    pub chunks_sent: usize,

    /// Number of transcript entries accumulated
    pub transcript_entries: usize,

    /// Number of playback buffers currently queued or playing
    pub live_buffers: usize,

    /// Last error message, if the session failed
    pub error: Option<String>,
}
