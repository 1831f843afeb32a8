// Tests for configuration loading and validation.

use creative_copilot::Config;

const VALID: &str = r#"
[service]
name = "creative-copilot"

[service.http]
bind = "127.0.0.1"
port = 8090

[backend]
base_url = "https://generativeapi.example.com"
api_key_env = "GENAI_API_KEY"
video_poll_interval_secs = 10

[backend.models]
text = "flash-text-001"
image = "imagine-4.0-001"
image_edit = "flash-image-001"
video = "motion-2.0-001"

[audio]
input_sample_rate = 16000
output_sample_rate = 24000
channels = 1
block_size = 4096

[copilot]
live_url = "wss://generativeapi.example.com/v1/live"
model = "live-voice-preview"
system_instruction = "Be concise."
"#;

fn load_from(body: &str) -> anyhow::Result<Config> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.toml");
    std::fs::write(&path, body).unwrap();
    Config::load(path.to_str().unwrap())
}

#[test]
fn test_valid_config_loads() {
    let cfg = load_from(VALID).unwrap();
    assert_eq!(cfg.service.http.port, 8090);
    assert_eq!(cfg.audio.input_sample_rate, 16000);
    assert_eq!(cfg.audio.output_sample_rate, 24000);
    assert_eq!(cfg.backend.video_poll_interval_secs, 10);
}

#[test]
fn test_zero_input_sample_rate_is_rejected() {
    let body = VALID.replace("input_sample_rate = 16000", "input_sample_rate = 0");
    let err = load_from(&body).unwrap_err();
    assert!(err.to_string().contains("sample rate"));
}

#[test]
fn test_zero_output_sample_rate_is_rejected() {
    let body = VALID.replace("output_sample_rate = 24000", "output_sample_rate = 0");
    assert!(load_from(&body).is_err());
}

#[test]
fn test_zero_channels_is_rejected() {
    let body = VALID.replace("channels = 1", "channels = 0");
    assert!(load_from(&body).is_err());
}

#[test]
fn test_zero_block_size_is_rejected() {
    let body = VALID.replace("block_size = 4096", "block_size = 0");
    assert!(load_from(&body).is_err());
}

#[test]
fn test_missing_section_is_rejected() {
    let body = VALID.replace("[copilot]", "[copilot_settings]");
    assert!(load_from(&body).is_err());
}
