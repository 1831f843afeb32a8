pub mod media;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// Tool categories shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCategory {
    Image,
    Video,
    Ads,
    Avatars,
    Utility,
}

/// The tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    // Image suite
    ImagePromptGenerator,
    AiImageGenerator,
    ImageToImageGenerator,
    BatchImageToPrompt,
    ImageToPrompt,

    // Video suite
    VideoPromptGenerator,
    AiVideoGenerator,
    ImageToVideoPrompt,
    VideoToPrompt,
    ImageToVideo,

    // Ad factory
    AiProductPhotoshoot,
    AiVideoScriptwriter,
    UgcAdsGenerator,
    CgiAdsGenerator,
    PromotionalAdsGenerator,
    ThreeDUgcAd,

    // Avatar studio
    AvatarGenerator,
    AvatarToUgc,
    ImageToAvatar,

    // Utility
    CreativeCoPilot,
    AiDescribeImage,
    AiVoiceoverGenerator,
}

impl ToolKind {
    pub fn all() -> &'static [ToolKind] {
        use ToolKind::*;
        &[
            ImagePromptGenerator,
            AiImageGenerator,
            ImageToImageGenerator,
            BatchImageToPrompt,
            ImageToPrompt,
            VideoPromptGenerator,
            AiVideoGenerator,
            ImageToVideoPrompt,
            VideoToPrompt,
            ImageToVideo,
            AiProductPhotoshoot,
            AiVideoScriptwriter,
            UgcAdsGenerator,
            CgiAdsGenerator,
            PromotionalAdsGenerator,
            ThreeDUgcAd,
            AvatarGenerator,
            AvatarToUgc,
            ImageToAvatar,
            CreativeCoPilot,
            AiDescribeImage,
            AiVoiceoverGenerator,
        ]
    }

    pub fn name(&self) -> &'static str {
        use ToolKind::*;
        match self {
            ImagePromptGenerator => "Image Prompt Generator",
            AiImageGenerator => "AI Image Generator",
            ImageToImageGenerator => "Image to Image Generator",
            BatchImageToPrompt => "Batch Image to Prompt",
            ImageToPrompt => "Image to Prompt",
            VideoPromptGenerator => "Video Prompt Generator",
            AiVideoGenerator => "AI Video Generator",
            ImageToVideoPrompt => "Image to Video Prompt",
            VideoToPrompt => "Video to Prompt",
            ImageToVideo => "Image to Video",
            AiProductPhotoshoot => "AI Product Photoshoot",
            AiVideoScriptwriter => "AI Video Scriptwriter",
            UgcAdsGenerator => "UGC Ads Generator",
            CgiAdsGenerator => "CGI Ads Generator",
            PromotionalAdsGenerator => "Promotional Ads Generator",
            ThreeDUgcAd => "3D UGC Ad",
            AvatarGenerator => "Avatar Generator",
            AvatarToUgc => "Avatar to UGC",
            ImageToAvatar => "Image to Avatar",
            CreativeCoPilot => "Creative Co-Pilot",
            AiDescribeImage => "AI Describe Image",
            AiVoiceoverGenerator => "AI Voiceover Generator",
        }
    }

    pub fn category(&self) -> ToolCategory {
        use ToolKind::*;
        match self {
            ImagePromptGenerator | AiImageGenerator | ImageToImageGenerator
            | BatchImageToPrompt | ImageToPrompt => ToolCategory::Image,
            VideoPromptGenerator | AiVideoGenerator | ImageToVideoPrompt | VideoToPrompt
            | ImageToVideo => ToolCategory::Video,
            AiProductPhotoshoot | AiVideoScriptwriter | UgcAdsGenerator | CgiAdsGenerator
            | PromotionalAdsGenerator | ThreeDUgcAd => ToolCategory::Ads,
            AvatarGenerator | AvatarToUgc | ImageToAvatar => ToolCategory::Avatars,
            CreativeCoPilot | AiDescribeImage | AiVoiceoverGenerator => ToolCategory::Utility,
        }
    }
}
