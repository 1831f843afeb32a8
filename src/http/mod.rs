//! HTTP API for the creative tools and the voice co-pilot
//!
//! Tool endpoints are thin request → backend call → response loops:
//! - GET  /tools - Tool catalog
//! - POST /tools/image/prompt, /tools/image/generate, /tools/image/edit,
//!        /tools/image/describe
//! - POST /tools/video/prompt, /tools/video/generate
//! - POST /tools/ad-script, /tools/avatar, /tools/voiceover
//!
//! Co-pilot session control:
//! - POST /copilot/start - Start a voice session
//! - POST /copilot/stop/:id - Stop a session
//! - GET  /copilot/:id/status - Query session state
//! - GET  /copilot/:id/transcript - Get accumulated transcript
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::{AppSettings, AppState};
