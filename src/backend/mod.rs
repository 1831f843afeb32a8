pub mod client;
pub mod types;

pub use client::{generate_video_and_wait, BackendModels, GenAiClient, MediaBackend};
pub use types::{AdScript, AdScriptScene, AdStyle, EditedImage, InlineImage, TextRequest, VideoOperation};
