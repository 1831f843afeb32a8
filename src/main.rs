use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use creative_copilot::backend::BackendModels;
use creative_copilot::{create_router, AppSettings, AppState, Config, GenAiClient, WsLiveClient};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "creative-copilot", about = "Creative tools and voice co-pilot service")]
struct Cli {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/creative-copilot")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;
    let api_key = cfg.api_key()?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let media = Arc::new(GenAiClient::new(
        cfg.backend.base_url.clone(),
        api_key,
        BackendModels {
            text: cfg.backend.models.text.clone(),
            image: cfg.backend.models.image.clone(),
            image_edit: cfg.backend.models.image_edit.clone(),
            video: cfg.backend.models.video.clone(),
        },
    ));
    let live = Arc::new(WsLiveClient::new(cfg.copilot.live_url.clone()));

    let settings = AppSettings {
        video_poll_interval: Duration::from_secs(cfg.backend.video_poll_interval_secs),
        copilot_model: cfg.copilot.model.clone(),
        copilot_instruction: cfg.copilot.system_instruction.clone(),
        input_sample_rate: cfg.audio.input_sample_rate,
        output_sample_rate: cfg.audio.output_sample_rate,
        channels: cfg.audio.channels,
        block_size: cfg.audio.block_size,
    };

    let state = AppState::new(media, live, settings);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
