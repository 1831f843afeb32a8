use base64::Engine;

/// Convert float samples in [-1.0, 1.0] to 16-bit signed PCM.
///
/// Scaling is `round(sample * 32768)` clamped to the i16 range; the remote
/// model expects exactly this fixed-point format.
pub fn pcm_f32_to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            let scaled = (s as f64 * 32768.0).round();
            scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}

/// Convert 16-bit signed PCM back to float samples via `sample / 32768`.
pub fn pcm_i16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

/// Pack i16 samples as little-endian bytes.
pub fn pcm_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Unpack little-endian bytes into i16 samples.
///
/// A trailing odd byte is ignored; the transport always sends whole samples.
pub fn bytes_to_pcm(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Encode a float sample block for transport: fixed-point i16, then base64.
pub fn encode_chunk(samples: &[f32]) -> String {
    let pcm = pcm_f32_to_i16(samples);
    base64::engine::general_purpose::STANDARD.encode(pcm_to_bytes(&pcm))
}

/// Decode a transport chunk back to float samples.
pub fn decode_chunk(data: &str) -> anyhow::Result<Vec<f32>> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;
    Ok(pcm_i16_to_f32(&bytes_to_pcm(&bytes)))
}

/// MIME type advertised for a PCM chunk at the given rate.
pub fn pcm_mime_type(sample_rate: u32) -> String {
    format!("audio/pcm;rate={}", sample_rate)
}
