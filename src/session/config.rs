use serde::{Deserialize, Serialize};

/// Configuration for a voice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "copilot-7f3a...")
    pub session_id: String,

    /// Model name for the live voice backend
    pub model: String,

    /// System instruction sent when the stream opens
    pub system_instruction: String,

    /// Capture sample rate in Hz (the model's expected input rate)
    pub input_sample_rate: u32,

    /// Playback sample rate in Hz (the model's output rate)
    pub output_sample_rate: u32,

    /// Number of audio channels (1 = mono)
    pub channels: u16,

    /// Samples per capture block
    pub block_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("copilot-{}", uuid::Uuid::new_v4()),
            model: "live-voice-preview".to_string(),
            system_instruction: "You are a creative co-pilot. Your goal is to help users \
                                 brainstorm and refine ideas into detailed prompts for \
                                 generating images and videos. Be encouraging and \
                                 imaginative. Keep your spoken responses concise."
                .to_string(),
            input_sample_rate: 16000,
            output_sample_rate: 24000,
            channels: 1,
            block_size: 4096,
        }
    }
}
