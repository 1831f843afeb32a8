use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Build a filesystem-safe slug from a prompt: first 30 characters,
/// non-alphanumerics mapped to '_', lowercased. Empty prompts fall back to
/// "generated".
pub fn sanitize_slug(prompt: &str) -> String {
    let slug: String = prompt
        .chars()
        .take(30)
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if slug.is_empty() {
        "generated".to_string()
    } else {
        slug
    }
}

/// Download file name for a generated artifact.
pub fn file_name_for(prompt: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_slug(prompt), extension)
}

/// Save generated media under a name derived from the prompt. Returns the
/// written path.
pub fn save_media(dir: &Path, prompt: &str, extension: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).context("Failed to create output directory")?;
    let path = dir.join(file_name_for(prompt, extension));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write media to {:?}", path))?;
    Ok(path)
}
