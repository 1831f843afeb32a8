use serde::{Deserialize, Serialize};

/// Settings sent to the live backend when opening a stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Model name
    pub model: String,
    /// System instruction for the conversation
    pub system_instruction: String,
    /// Requested response modality ("audio")
    pub response_modality: String,
    /// Request transcription of the user's speech
    pub input_transcription: bool,
    /// Request transcription of the model's speech
    pub output_transcription: bool,
}

/// Messages sent to the live backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Opens the stream with model and conversation settings
    Setup(LiveConfig),

    /// One capture block: base64-wrapped 16-bit PCM
    Audio { data: String, mime_type: String },

    /// Explicit end of the stream
    Close,
}

/// Messages received from the live backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Stream confirmed open; safe to start sending audio
    Opened,

    /// Transcription fragment of the user's speech
    InputTranscription { text: String, is_final: bool },

    /// Transcription fragment of the model's speech
    OutputTranscription { text: String, is_final: bool },

    /// Synthesized audio: base64-wrapped 16-bit PCM at the output rate
    Audio { data: String },

    /// Stream-level failure; the session must tear down
    Error { message: String },

    /// Stream closed by the remote end
    Closed,
}
