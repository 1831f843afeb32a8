use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::{AdScript, AdStyle, EditedImage, InlineImage, TextRequest, VideoOperation};

/// Generative media/text backend.
///
/// Thin call-and-response surface; long-running video generation is
/// submit-then-poll-then-fetch. Implementations do not retry: failures are
/// surfaced to the caller, and all retries are user-initiated.
#[async_trait::async_trait]
pub trait MediaBackend: Send + Sync {
    async fn generate_text(&self, request: TextRequest) -> Result<String>;

    /// Prompt → encoded image bytes.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;

    /// Prompt + reference image → revised image with commentary.
    async fn edit_image(&self, prompt: &str, image: InlineImage) -> Result<EditedImage>;

    /// Prompt (+ optional reference image) → structured ad script.
    async fn generate_ad_script(
        &self,
        prompt: &str,
        style: AdStyle,
        image: Option<InlineImage>,
    ) -> Result<AdScript>;

    /// Kick off video generation; returns a pollable operation handle.
    async fn submit_video(&self, prompt: &str, image: Option<InlineImage>)
        -> Result<VideoOperation>;

    /// Refresh an operation handle. "Not done yet" is normal.
    async fn poll_video(&self, operation: &VideoOperation) -> Result<VideoOperation>;

    /// Download generated media by URI.
    async fn fetch_media(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Run a video generation to completion: submit, poll on a fixed interval
/// treating "not done" as normal, then fetch the media by URI.
pub async fn generate_video_and_wait(
    backend: &dyn MediaBackend,
    prompt: &str,
    image: Option<InlineImage>,
    poll_interval: Duration,
) -> Result<Vec<u8>> {
    let mut operation = backend.submit_video(prompt, image).await?;
    info!("Video generation submitted: {}", operation.id);

    while !operation.done {
        tokio::time::sleep(poll_interval).await;
        operation = backend.poll_video(&operation).await?;
        debug!("Video operation {}: done={}", operation.id, operation.done);
    }

    let uri = operation
        .uri
        .ok_or_else(|| anyhow!("Video generation finished but returned no media URI"))?;
    backend.fetch_media(&uri).await
}

// ----------------------------------------------------------------------------
// HTTP client
// ----------------------------------------------------------------------------

/// Model names used for each kind of generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendModels {
    pub text: String,
    pub image: String,
    pub image_edit: String,
    pub video: String,
}

impl Default for BackendModels {
    fn default() -> Self {
        Self {
            text: "flash-text-001".to_string(),
            image: "imagine-4.0-001".to_string(),
            image_edit: "flash-image-001".to_string(),
            video: "motion-2.0-001".to_string(),
        }
    }
}

/// HTTP client for the generative backend.
pub struct GenAiClient {
    base_url: String,
    api_key: String,
    models: BackendModels,
    client: Client,
}

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a TextRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TextGenerationResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    number_of_images: u32,
    output_mime_type: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    /// Base64-encoded images
    images: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ImageEditRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    image: &'a InlineImage,
}

#[derive(Debug, Deserialize)]
struct ImageEditResponse {
    #[serde(default)]
    text: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Serialize)]
struct VideoGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    number_of_videos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a InlineImage>,
}

impl GenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        models: BackendModels,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            models,
            client: Client::new(),
        }
    }

    async fn post_json<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("Backend returned {} for {}: {}", status, path, detail));
        }

        response
            .json::<Resp>()
            .await
            .with_context(|| format!("Malformed response from {}", path))
    }
}

#[async_trait::async_trait]
impl MediaBackend for GenAiClient {
    async fn generate_text(&self, request: TextRequest) -> Result<String> {
        let body = TextGenerationRequest {
            model: &self.models.text,
            request: &request,
            response_mime_type: None,
            response_schema: None,
        };
        let response: TextGenerationResponse = self.post_json("/v1/text:generate", &body).await?;
        Ok(response.text)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let body = ImageGenerationRequest {
            model: &self.models.image,
            prompt,
            number_of_images: 1,
            output_mime_type: "image/jpeg",
            aspect_ratio: "1:1",
        };
        let response: ImageGenerationResponse =
            self.post_json("/v1/images:generate", &body).await?;
        let first = response
            .images
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Image generation returned no images"))?;
        base64::engine::general_purpose::STANDARD
            .decode(first)
            .context("Image payload was not valid base64")
    }

    async fn edit_image(&self, prompt: &str, image: InlineImage) -> Result<EditedImage> {
        let body = ImageEditRequest {
            model: &self.models.image_edit,
            prompt,
            image: &image,
        };
        let response: ImageEditResponse = self.post_json("/v1/images:edit", &body).await?;
        let encoded = response
            .image
            .ok_or_else(|| anyhow!("Image edit produced no image"))?;
        Ok(EditedImage {
            text: response
                .text
                .unwrap_or_else(|| "No text response from model.".to_string()),
            image: base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .context("Image payload was not valid base64")?,
        })
    }

    async fn generate_ad_script(
        &self,
        prompt: &str,
        style: AdStyle,
        image: Option<InlineImage>,
    ) -> Result<AdScript> {
        let system_instruction = crate::tools::prompts::ad_script_instruction(style);
        let mut request = TextRequest::prompt(prompt);
        request.system_instruction = Some(system_instruction);
        request.image = image;

        let body = TextGenerationRequest {
            model: &self.models.text,
            request: &request,
            response_mime_type: Some("application/json"),
            response_schema: Some(ad_script_schema()),
        };
        let response: TextGenerationResponse = self.post_json("/v1/text:generate", &body).await?;
        serde_json::from_str(&response.text).context("Ad script did not match the declared schema")
    }

    async fn submit_video(
        &self,
        prompt: &str,
        image: Option<InlineImage>,
    ) -> Result<VideoOperation> {
        let body = VideoGenerationRequest {
            model: &self.models.video,
            prompt,
            number_of_videos: 1,
            image: image.as_ref(),
        };
        self.post_json("/v1/videos:generate", &body).await
    }

    async fn poll_video(&self, operation: &VideoOperation) -> Result<VideoOperation> {
        let url = format!("{}/v1/operations/{}", self.base_url, operation.id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to poll video operation")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Operation poll returned {}", status));
        }
        response
            .json::<VideoOperation>()
            .await
            .context("Malformed operation status")
    }

    async fn fetch_media(&self, uri: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(uri)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Failed to fetch generated media")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Failed to fetch generated file: {}", status));
        }
        Ok(response.bytes().await.context("Media download failed")?.to_vec())
    }
}

/// JSON schema declared for structured ad-script output.
fn ad_script_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "A catchy title for the ad." },
            "hook": { "type": "string", "description": "A 3-second hook to grab attention." },
            "scenes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "scene": { "type": "integer" },
                        "visual": { "type": "string", "description": "Description of the visuals for this scene." },
                        "voiceover": { "type": "string", "description": "The voiceover or dialogue for this scene." }
                    },
                    "required": ["scene", "visual", "voiceover"]
                }
            },
            "cta": { "type": "string", "description": "A clear call to action." }
        },
        "required": ["title", "hook", "scenes", "cta"]
    })
}
