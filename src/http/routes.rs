use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Tool catalog
        .route("/tools", get(handlers::list_tools))
        // Image suite
        .route("/tools/image/prompt", post(handlers::image_prompt))
        .route("/tools/image/generate", post(handlers::generate_image))
        .route("/tools/image/edit", post(handlers::edit_image))
        .route("/tools/image/describe", post(handlers::describe_image))
        // Video suite
        .route("/tools/video/prompt", post(handlers::video_prompt))
        .route("/tools/video/generate", post(handlers::generate_video))
        // Ad factory and avatar studio
        .route("/tools/ad-script", post(handlers::ad_script))
        .route("/tools/avatar", post(handlers::generate_avatar))
        .route("/tools/voiceover", post(handlers::voiceover_script))
        // Co-pilot session control
        .route("/copilot/start", post(handlers::start_session))
        .route("/copilot/stop/:session_id", post(handlers::stop_session))
        .route("/copilot/:session_id/status", get(handlers::session_status))
        .route(
            "/copilot/:session_id/transcript",
            get(handlers::session_transcript),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
