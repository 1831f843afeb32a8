use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::backend::MediaBackend;
use crate::live::LiveBackend;
use crate::session::VoiceSession;

/// Service-level knobs shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Fixed interval between video operation polls
    pub video_poll_interval: Duration,
    /// Model name for the live voice backend
    pub copilot_model: String,
    /// System instruction for co-pilot sessions
    pub copilot_instruction: String,
    pub input_sample_rate: u32,
    pub output_sample_rate: u32,
    pub channels: u16,
    pub block_size: usize,
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Active voice sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<VoiceSession>>>>,
    /// Request/response generative backend
    pub media: Arc<dyn MediaBackend>,
    /// Bidirectional voice backend
    pub live: Arc<dyn LiveBackend>,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    pub fn new(
        media: Arc<dyn MediaBackend>,
        live: Arc<dyn LiveBackend>,
        settings: AppSettings,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            media,
            live,
            settings: Arc::new(settings),
        }
    }
}
