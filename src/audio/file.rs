use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::capture::{AudioFrame, CaptureBackend, CaptureConfig, CaptureError};

/// Capture backend that streams a WAV file as timed frames.
///
/// Frames are paced at the file's real-time rate so downstream code sees the
/// same cadence a live device would produce.
pub struct FileCapture {
    path: String,
    config: CaptureConfig,
    running: Arc<AtomicBool>,
}

impl FileCapture {
    pub fn new(path: String, config: CaptureConfig) -> Self {
        Self {
            path,
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    fn read_samples(&self) -> Result<(Vec<f32>, u32, u16), CaptureError> {
        let reader = hound::WavReader::open(&self.path).map_err(|e| match e {
            hound::Error::IoError(ref io) if io.kind() == std::io::ErrorKind::NotFound => {
                CaptureError::DeviceNotFound
            }
            hound::Error::IoError(ref io)
                if io.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                CaptureError::PermissionDenied
            }
            other => CaptureError::Unknown(other.to_string()),
        })?;

        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return Err(CaptureError::Unknown(
                "WAV file declares a zero sample rate".to_string(),
            ));
        }
        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Int => reader
                .into_samples::<i16>()
                .filter_map(|s| s.ok())
                .map(|s| s as f32 / 32768.0)
                .collect(),
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .filter_map(|s| s.ok())
                .collect(),
        };

        Ok((samples, spec.sample_rate, spec.channels))
    }
}

#[async_trait::async_trait]
impl CaptureBackend for FileCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        let (samples, sample_rate, channels) = self.read_samples()?;

        info!(
            "File capture started: {} ({} samples @ {} Hz, {} ch)",
            self.path,
            samples.len(),
            sample_rate,
            channels
        );

        self.running.store(true, Ordering::SeqCst);

        let (tx, rx) = mpsc::channel(32);
        let running = self.running.clone();
        let block = self.config.block_size * channels as usize;
        let frame_ms = (self.config.block_size as u64 * 1000 / sample_rate as u64).max(1);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_millis(frame_ms));
            let mut timestamp_ms = 0u64;

            for chunk in samples.chunks(block) {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                ticker.tick().await;

                let frame = AudioFrame {
                    samples: chunk.to_vec(),
                    sample_rate,
                    channels,
                    timestamp_ms,
                };
                timestamp_ms += frame_ms;

                if tx.send(frame).await.is_err() {
                    warn!("File capture consumer dropped, stopping");
                    break;
                }
            }

            running.store(false, Ordering::SeqCst);
            info!("File capture finished");
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "file"
    }
}
