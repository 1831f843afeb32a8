use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub audio: AudioConfig,
    pub copilot: CopilotConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the generative backend
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Seconds between polls of a long-running video operation
    pub video_poll_interval_secs: u64,
    pub models: ModelsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ModelsConfig {
    pub text: String,
    pub image: String,
    pub image_edit: String,
    pub video: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Capture rate expected by the live model (deployment configuration,
    /// not a constant of the design)
    pub input_sample_rate: u32,
    /// Playback rate of the live model's audio
    pub output_sample_rate: u32,
    pub channels: u16,
    /// Samples per capture block
    pub block_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct CopilotConfig {
    /// WebSocket URL of the live voice backend
    pub live_url: String,
    pub model: String,
    pub system_instruction: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the audio pipeline divide by zero or
    /// produce empty capture blocks.
    fn validate(&self) -> Result<()> {
        if self.audio.input_sample_rate == 0 || self.audio.output_sample_rate == 0 {
            anyhow::bail!("audio sample rates must be greater than zero");
        }
        if self.audio.channels == 0 {
            anyhow::bail!("audio channel count must be greater than zero");
        }
        if self.audio.block_size == 0 {
            anyhow::bail!("audio block size must be greater than zero");
        }
        Ok(())
    }

    /// Resolve the backend API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.backend.api_key_env).map_err(|_| {
            anyhow::anyhow!(
                "{} environment variable not set",
                self.backend.api_key_env
            )
        })
    }
}
