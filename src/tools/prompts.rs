//! Instruction templates for the thin generator tools.

use crate::backend::AdStyle;

pub fn image_prompt_from_keywords(keywords: &str) -> String {
    format!(
        "Generate a highly detailed, creative, and evocative prompt for an AI image \
         generator. The prompt should be based on these keywords: \"{}\". Include details \
         about art style, lighting, composition, colors, and mood.",
        keywords
    )
}

pub fn image_prompt_from_image() -> &'static str {
    "Generate a detailed and creative prompt for an AI image generator based on this \
     image. Focus on style, composition, lighting, and key subjects."
}

pub fn image_prompt_from_text_and_image(keywords: &str) -> String {
    format!(
        "Generate a highly detailed and creative prompt for an AI image generator. The \
         prompt should be inspired by the provided image, but incorporate these specific \
         keywords: \"{}\". Focus on blending the image's style, composition, and mood with \
         the new keywords.",
        keywords
    )
}

pub fn describe_image() -> &'static str {
    "Describe this image in a detailed and narrative way. Cover the mood, setting, \
     subjects, and potential story behind the scene."
}

pub fn video_prompt_from_keywords(keywords: &str) -> String {
    format!(
        "Create a cinematic and detailed prompt for an AI video generator based on the \
         following themes: \"{}\". Describe the scene, camera movement, lighting, color \
         grading, and overall mood.",
        keywords
    )
}

pub fn video_prompt_from_image() -> &'static str {
    "Based on this image, create a cinematic prompt for an AI video generator. Describe \
     what happens before, during, and after the moment captured in the image. Include \
     details on camera angles, movement, and sound design."
}

pub fn video_prompt_from_text_and_image(keywords: &str) -> String {
    format!(
        "Based on the provided image and the following keywords: \"{}\", create a \
         cinematic prompt for an AI video generator. Describe what happens before, during, \
         and after the moment captured in the image, incorporating the keywords. Include \
         details on camera angles, movement, and sound design.",
        keywords
    )
}

pub fn ad_script_instruction(style: AdStyle) -> String {
    format!(
        "You are an expert copywriter and video director. Generate a short, engaging \
         video ad script based on the user's request. The style should be {}. The script \
         must be concise and suitable for social media (e.g., TikTok, Instagram Reels). \
         If an image is provided, use it as the primary context for the product or subject.",
        style
    )
}

pub fn voiceover_script(topic: &str) -> String {
    format!(
        "Write a short, natural-sounding voiceover script about: \"{}\". Keep it under \
         60 seconds when read aloud, with a warm and engaging tone.",
        topic
    )
}

pub fn avatar_prompt(description: &str) -> String {
    format!(
        "Generate a detailed prompt for an AI image generator to create a realistic \
         digital avatar portrait based on this description: \"{}\". Specify framing, \
         lighting, expression, and background.",
        description
    )
}
