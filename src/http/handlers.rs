use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::state::AppState;
use crate::audio::{CaptureBackendFactory, CaptureConfig, CaptureSource, DiscardSink};
use crate::backend::{generate_video_and_wait, AdScript, AdStyle, InlineImage, TextRequest};
use crate::session::{SessionConfig, SessionState, SessionStats, TranscriptEntry, VoiceSession};
use crate::tools::{media, prompts, ToolKind};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub key: ToolKind,
    pub name: &'static str,
    pub category: crate::tools::ToolCategory,
}

#[derive(Debug, Deserialize)]
pub struct PromptToolRequest {
    /// Keywords or free text driving the prompt
    #[serde(default)]
    pub keywords: String,
    /// Optional reference image
    pub image: Option<InlineImage>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedImageResponse {
    /// Base64-encoded image bytes
    pub image: String,
    pub mime_type: String,
    /// Suggested download name, a sanitized slug of the prompt
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct EditImageRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

#[derive(Debug, Serialize)]
pub struct EditedImageResponse {
    pub text: String,
    pub image: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DescribeImageRequest {
    pub image: Option<InlineImage>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateVideoRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedVideoResponse {
    /// Base64-encoded video bytes
    pub video: String,
    pub mime_type: String,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdScriptRequest {
    pub prompt: String,
    pub style: AdStyle,
    pub image: Option<InlineImage>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceoverRequest {
    pub topic: String,
}

/// Capture source requested for a co-pilot session.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaptureRequest {
    Microphone,
    Silence,
    File { path: String },
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,
    /// Capture source (default: microphone)
    pub capture: Option<CaptureRequest>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub stats: SessionStats,
}

// ============================================================================
// Helpers
// ============================================================================

fn validation_error(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Remote failures surface as a short retry-suggesting message; the caller
/// retries by re-submitting. No automatic retry happens here.
fn backend_error(context: &str, err: anyhow::Error) -> axum::response::Response {
    error!("{}: {:#}", context, err);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: format!("{}. Please try again.", context),
        }),
    )
        .into_response()
}

fn encode_bytes(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

// ============================================================================
// Tool handlers
// ============================================================================

/// GET /tools
pub async fn list_tools() -> impl IntoResponse {
    let tools: Vec<ToolInfo> = ToolKind::all()
        .iter()
        .map(|kind| ToolInfo {
            key: *kind,
            name: kind.name(),
            category: kind.category(),
        })
        .collect();
    Json(tools)
}

/// POST /tools/image/prompt
pub async fn image_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptToolRequest>,
) -> impl IntoResponse {
    let keywords = req.keywords.trim();
    if keywords.is_empty() && req.image.is_none() {
        return validation_error("Please enter some keywords or attach an image.");
    }

    let request = match (&req.image, keywords.is_empty()) {
        (Some(image), false) => TextRequest::prompt(prompts::image_prompt_from_text_and_image(
            keywords,
        ))
        .with_image(image.clone()),
        (Some(image), true) => {
            TextRequest::prompt(prompts::image_prompt_from_image()).with_image(image.clone())
        }
        (None, _) => TextRequest::prompt(prompts::image_prompt_from_keywords(keywords)).creative(),
    };

    match state.media.generate_text(request).await {
        Ok(text) => Json(TextResponse { text }).into_response(),
        Err(e) => backend_error("Prompt generation failed", e),
    }
}

/// POST /tools/image/generate
pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> impl IntoResponse {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return validation_error("Please enter a prompt.");
    }

    match state.media.generate_image(prompt).await {
        Ok(bytes) => Json(GeneratedImageResponse {
            image: encode_bytes(&bytes),
            mime_type: "image/jpeg".to_string(),
            file_name: media::file_name_for(prompt, "jpeg"),
        })
        .into_response(),
        Err(e) => backend_error("Image generation failed", e),
    }
}

/// POST /tools/image/edit
pub async fn edit_image(
    State(state): State<AppState>,
    Json(req): Json<EditImageRequest>,
) -> impl IntoResponse {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return validation_error("Please enter a prompt.");
    }
    let image = match req.image {
        Some(image) => image,
        None => return validation_error("Please attach an image to edit."),
    };

    match state.media.edit_image(prompt, image).await {
        Ok(edited) => Json(EditedImageResponse {
            text: edited.text,
            image: encode_bytes(&edited.image),
            file_name: media::file_name_for(prompt, "png"),
        })
        .into_response(),
        Err(e) => backend_error("Image editing failed", e),
    }
}

/// POST /tools/image/describe
pub async fn describe_image(
    State(state): State<AppState>,
    Json(req): Json<DescribeImageRequest>,
) -> impl IntoResponse {
    let image = match req.image {
        Some(image) => image,
        None => return validation_error("Please attach an image to describe."),
    };

    let request = TextRequest::prompt(prompts::describe_image()).with_image(image);
    match state.media.generate_text(request).await {
        Ok(text) => Json(TextResponse { text }).into_response(),
        Err(e) => backend_error("Image description failed", e),
    }
}

/// POST /tools/video/prompt
pub async fn video_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptToolRequest>,
) -> impl IntoResponse {
    let keywords = req.keywords.trim();
    if keywords.is_empty() && req.image.is_none() {
        return validation_error("Please enter some keywords or attach an image.");
    }

    let request = match (&req.image, keywords.is_empty()) {
        (Some(image), false) => TextRequest::prompt(prompts::video_prompt_from_text_and_image(
            keywords,
        ))
        .with_image(image.clone()),
        (Some(image), true) => {
            TextRequest::prompt(prompts::video_prompt_from_image()).with_image(image.clone())
        }
        (None, _) => TextRequest::prompt(prompts::video_prompt_from_keywords(keywords)).creative(),
    };

    match state.media.generate_text(request).await {
        Ok(text) => Json(TextResponse { text }).into_response(),
        Err(e) => backend_error("Prompt generation failed", e),
    }
}

/// POST /tools/video/generate
///
/// Long-running: submits, polls on the configured fixed interval, then
/// fetches the media by URI.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(req): Json<GenerateVideoRequest>,
) -> impl IntoResponse {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return validation_error("Please enter a prompt.");
    }

    let result = generate_video_and_wait(
        state.media.as_ref(),
        prompt,
        req.image,
        state.settings.video_poll_interval,
    )
    .await;

    match result {
        Ok(bytes) => Json(GeneratedVideoResponse {
            video: encode_bytes(&bytes),
            mime_type: "video/mp4".to_string(),
            file_name: media::file_name_for(prompt, "mp4"),
        })
        .into_response(),
        Err(e) => backend_error("Video generation failed", e),
    }
}

/// POST /tools/ad-script
pub async fn ad_script(
    State(state): State<AppState>,
    Json(req): Json<AdScriptRequest>,
) -> impl IntoResponse {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return validation_error("Please describe the product or idea for the ad.");
    }

    match state
        .media
        .generate_ad_script(prompt, req.style, req.image)
        .await
    {
        Ok(script) => Json::<AdScript>(script).into_response(),
        Err(e) => backend_error("Ad script generation failed", e),
    }
}

/// POST /tools/avatar
pub async fn generate_avatar(
    State(state): State<AppState>,
    Json(req): Json<AvatarRequest>,
) -> impl IntoResponse {
    let description = req.description.trim();
    if description.is_empty() {
        return validation_error("Please describe the avatar.");
    }

    let prompt = prompts::avatar_prompt(description);
    match state.media.generate_image(&prompt).await {
        Ok(bytes) => Json(GeneratedImageResponse {
            image: encode_bytes(&bytes),
            mime_type: "image/jpeg".to_string(),
            file_name: media::file_name_for(description, "jpeg"),
        })
        .into_response(),
        Err(e) => backend_error("Avatar generation failed", e),
    }
}

/// POST /tools/voiceover
///
/// Produces the script only; speech synthesis happens on the client via the
/// platform's text-to-speech facility.
pub async fn voiceover_script(
    State(state): State<AppState>,
    Json(req): Json<VoiceoverRequest>,
) -> impl IntoResponse {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return validation_error("Please enter a topic for the voiceover.");
    }

    let request = TextRequest::prompt(prompts::voiceover_script(topic));
    match state.media.generate_text(request).await {
        Ok(text) => Json(TextResponse { text }).into_response(),
        Err(e) => backend_error("Voiceover script generation failed", e),
    }
}

// ============================================================================
// Co-pilot session handlers
// ============================================================================

/// POST /copilot/start
/// Start a new voice session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("copilot-{}", uuid::Uuid::new_v4()));

    info!("Starting co-pilot session: {}", session_id);

    let capture_config = CaptureConfig {
        sample_rate: state.settings.input_sample_rate,
        channels: state.settings.channels,
        block_size: state.settings.block_size,
    };
    let source = match req.capture {
        Some(CaptureRequest::Silence) => CaptureSource::Silence,
        Some(CaptureRequest::File { path }) => CaptureSource::File(path),
        Some(CaptureRequest::Microphone) | None => CaptureSource::Microphone,
    };

    // The map lock is held from the duplicate check through insert and
    // start, so two concurrent starts with the same id cannot both pass the
    // check or overwrite each other's running session. Double-start of an
    // active session is rejected, not queued.
    let mut sessions = state.sessions.write().await;
    if let Some(existing) = sessions.get(&session_id) {
        let st = existing.state().await;
        if st == SessionState::Connecting || st == SessionState::Connected {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} is already active", session_id),
                }),
            )
                .into_response();
        }
    }

    let capture = match CaptureBackendFactory::create(source, capture_config) {
        Ok(c) => c,
        Err(cause) => {
            // Device acquisition failures carry their own user-facing text.
            error!("Capture setup failed: {}", cause);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: cause.to_string(),
                }),
            )
                .into_response();
        }
    };

    let session_config = SessionConfig {
        session_id: session_id.clone(),
        model: state.settings.copilot_model.clone(),
        system_instruction: state.settings.copilot_instruction.clone(),
        input_sample_rate: state.settings.input_sample_rate,
        output_sample_rate: state.settings.output_sample_rate,
        channels: state.settings.channels,
        block_size: state.settings.block_size,
    };

    let session = Arc::new(VoiceSession::new(
        session_config,
        Arc::clone(&state.live),
        capture,
        Arc::new(DiscardSink::new()),
    ));

    // The session is stored even if start fails, so status queries can see
    // the error state and message.
    sessions.insert(session_id.clone(), Arc::clone(&session));

    if let Err(e) = session.start().await {
        error!("Failed to start session {}: {:#}", session_id, e);
    }
    drop(sessions);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id,
            state: session.state().await,
            error: session.last_error().await,
        }),
    )
        .into_response()
}

/// POST /copilot/stop/:session_id
/// Stop a voice session
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping co-pilot session: {}", session_id);

    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(stats) => (
                StatusCode::OK,
                Json(StopSessionResponse { session_id, stats }),
            )
                .into_response(),
            Err(e) => {
                error!("Failed to stop session: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /copilot/:session_id/status
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => match session.stats().await {
            Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
            Err(e) => {
                error!("Failed to get stats: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to get stats: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /copilot/:session_id/transcript
pub async fn session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            let transcript: Vec<TranscriptEntry> = session.transcript().await;
            (StatusCode::OK, Json(transcript)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
