use serde::{Deserialize, Serialize};

/// A base64-wrapped image payload with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

/// Request for a text generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl TextRequest {
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn creative(mut self) -> Self {
        self.temperature = Some(1.0);
        self.top_p = Some(0.95);
        self
    }
}

/// Result of an image edit: the revised image plus the model's commentary.
#[derive(Debug, Clone)]
pub struct EditedImage {
    pub text: String,
    pub image: Vec<u8>,
}

/// Handle for a long-running video generation.
///
/// Returned by submit, refreshed by poll; `done == false` is the normal
/// in-progress case, not an error. Once done, `uri` points at the media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOperation {
    pub id: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Requested ad style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStyle {
    Ugc,
    Cgi,
    Promotional,
}

impl std::fmt::Display for AdStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdStyle::Ugc => write!(f, "UGC"),
            AdStyle::Cgi => write!(f, "CGI"),
            AdStyle::Promotional => write!(f, "Promotional"),
        }
    }
}

/// One scene of a generated ad script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdScriptScene {
    pub scene: u32,
    /// Description of the visuals for this scene
    pub visual: String,
    /// The voiceover or dialogue for this scene
    pub voiceover: String,
}

/// Structured ad script matching the declared response schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdScript {
    /// A catchy title for the ad
    pub title: String,
    /// A 3-second hook to grab attention
    pub hook: String,
    pub scenes: Vec<AdScriptScene>,
    /// A clear call to action
    pub cta: String,
}
