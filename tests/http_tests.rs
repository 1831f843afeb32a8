// Tests for the HTTP surface: start conflicts (including concurrent
// duplicates), input validation, and not-found responses.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use creative_copilot::backend::{
    AdScript, AdStyle, EditedImage, InlineImage, MediaBackend, TextRequest, VideoOperation,
};
use creative_copilot::live::{ClientEvent, LiveBackend, LiveConfig, LiveConnection, ServerEvent};
use creative_copilot::{create_router, AppSettings, AppState};
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Media backend stub; these tests never reach a generation call.
struct StubMedia;

#[async_trait::async_trait]
impl MediaBackend for StubMedia {
    async fn generate_text(&self, _request: TextRequest) -> Result<String> {
        Err(anyhow!("backend not exercised"))
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>> {
        Err(anyhow!("backend not exercised"))
    }

    async fn edit_image(&self, _prompt: &str, _image: InlineImage) -> Result<EditedImage> {
        Err(anyhow!("backend not exercised"))
    }

    async fn generate_ad_script(
        &self,
        _prompt: &str,
        _style: AdStyle,
        _image: Option<InlineImage>,
    ) -> Result<AdScript> {
        Err(anyhow!("backend not exercised"))
    }

    async fn submit_video(
        &self,
        _prompt: &str,
        _image: Option<InlineImage>,
    ) -> Result<VideoOperation> {
        Err(anyhow!("backend not exercised"))
    }

    async fn poll_video(&self, _operation: &VideoOperation) -> Result<VideoOperation> {
        Err(anyhow!("backend not exercised"))
    }

    async fn fetch_media(&self, _uri: &str) -> Result<Vec<u8>> {
        Err(anyhow!("backend not exercised"))
    }
}

/// Live backend that confirms the stream after a short delay, widening the
/// window in which a second start could race the first.
struct SlowLive;

#[async_trait::async_trait]
impl LiveBackend for SlowLive {
    async fn connect(&self, _config: LiveConfig) -> Result<LiveConnection> {
        tokio::time::sleep(Duration::from_millis(20)).await;

        let (out_tx, mut out_rx) = mpsc::channel::<ClientEvent>(64);
        let (in_tx, in_rx) = mpsc::channel::<ServerEvent>(64);
        tokio::spawn(async move {
            if in_tx.send(ServerEvent::Opened).await.is_err() {
                return;
            }
            while out_rx.recv().await.is_some() {}
        });

        Ok(LiveConnection {
            sender: out_tx,
            events: in_rx,
        })
    }
}

fn test_app() -> axum::Router {
    let settings = AppSettings {
        video_poll_interval: Duration::from_millis(1),
        copilot_model: "live-voice-preview".to_string(),
        copilot_instruction: "Be concise.".to_string(),
        input_sample_rate: 16000,
        output_sample_rate: 24000,
        channels: 1,
        block_size: 256,
    };
    create_router(AppState::new(
        Arc::new(StubMedia),
        Arc::new(SlowLive),
        settings,
    ))
}

fn start_request(session_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/copilot/start")
        .header("content-type", "application/json")
        .body(Body::from(format!(
            r#"{{"session_id":"{}","capture":{{"kind":"silence"}}}}"#,
            session_id
        )))
        .unwrap()
}

#[tokio::test]
async fn test_health_is_ok() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_second_start_of_active_session_conflicts() {
    let app = test_app();

    let first = app.clone().oneshot(start_request("dup")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(start_request("dup")).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_starts_yield_exactly_one_session() {
    let app = test_app();

    let (a, b) = tokio::join!(
        app.clone().oneshot(start_request("race")),
        app.clone().oneshot(start_request("race"))
    );
    let statuses = [a.unwrap().status(), b.unwrap().status()];

    assert!(
        statuses.contains(&StatusCode::OK),
        "one start succeeds: {:?}",
        statuses
    );
    assert!(
        statuses.contains(&StatusCode::CONFLICT),
        "the duplicate is rejected, not overwritten: {:?}",
        statuses
    );
}

#[tokio::test]
async fn test_stop_unknown_session_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/copilot/stop/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_prompt_is_rejected_before_any_backend_call() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tools/image/generate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt":"   "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    // StubMedia would return 502; the 400 proves validation ran first
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
