use anyhow::Result;
use tokio::sync::mpsc;

/// A fixed-size block of captured audio (float PCM in [-1.0, 1.0]).
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Samples, interleaved if multichannel
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for a capture backend
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Target sample rate (the remote model's input rate)
    pub sample_rate: u32,
    /// Target channel count (1 = mono)
    pub channels: u16,
    /// Samples per frame delivered to the consumer
    pub block_size: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            block_size: 4096,
        }
    }
}

/// Why acquiring the capture device failed.
///
/// Each cause carries its own user-facing message; the session surfaces
/// these distinctly rather than collapsing them into one string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    #[error("No microphone found. Please ensure a microphone is connected and enabled.")]
    DeviceNotFound,

    #[error("Microphone access was denied. Please allow microphone permissions and try again.")]
    PermissionDenied,

    #[error("Your microphone might be in use by another application. Please close it and try again.")]
    DeviceBusy,

    #[error("An unexpected error occurred: {0}. Please check your microphone connection and permissions.")]
    Unknown(String),
}

/// Audio capture backend trait
///
/// Implementations:
/// - File: stream a WAV file as timed frames (testing/batch processing)
/// - Silence: frames of zeros (wiring demos)
/// - Microphone: platform capture bridge, where available
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Acquire the device and start capturing.
    ///
    /// Returns a channel receiver that will receive audio frames. Failure
    /// to acquire the device maps to a specific [`CaptureError`].
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError>;

    /// Stop capturing and release the device. Idempotent.
    async fn stop(&mut self) -> Result<()>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Capture source type
#[derive(Debug, Clone)]
pub enum CaptureSource {
    /// Microphone input (requires a platform capture bridge)
    Microphone,
    /// WAV file input (for testing/batch processing)
    File(String),
    /// Silent frames at the configured rate
    Silence,
}

/// Capture backend factory
pub struct CaptureBackendFactory;

impl CaptureBackendFactory {
    /// Create a capture backend for the requested source.
    pub fn create(
        source: CaptureSource,
        config: CaptureConfig,
    ) -> Result<Box<dyn CaptureBackend>, CaptureError> {
        if config.sample_rate == 0 || config.channels == 0 || config.block_size == 0 {
            return Err(CaptureError::Unknown(
                "capture configuration has a zero sample rate, channel count, or block size"
                    .to_string(),
            ));
        }
        match source {
            CaptureSource::Microphone => {
                // No capture bridge is linked in this build; surface it as a
                // missing device rather than a generic failure.
                Err(CaptureError::DeviceNotFound)
            }
            CaptureSource::File(path) => {
                let backend = super::file::FileCapture::new(path, config);
                Ok(Box::new(backend))
            }
            CaptureSource::Silence => Ok(Box::new(SilenceCapture::new(config))),
        }
    }
}

/// Capture backend that produces frames of zeros at the configured rate.
pub struct SilenceCapture {
    config: CaptureConfig,
    running: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl SilenceCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            running: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)),
        }
    }
}

#[async_trait::async_trait]
impl CaptureBackend for SilenceCapture {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        use std::sync::atomic::Ordering;

        let (tx, rx) = mpsc::channel(32);
        self.running.store(true, Ordering::SeqCst);

        let running = self.running.clone();
        let config = self.config.clone();
        let frame_ms = config.block_size as u64 * 1000 / config.sample_rate as u64;

        tokio::spawn(async move {
            let mut timestamp_ms = 0u64;
            let mut ticker =
                tokio::time::interval(std::time::Duration::from_millis(frame_ms.max(1)));

            while running.load(Ordering::SeqCst) {
                ticker.tick().await;
                let frame = AudioFrame {
                    samples: vec![0.0; config.block_size * config.channels as usize],
                    sample_rate: config.sample_rate,
                    channels: config.channels,
                    timestamp_ms,
                };
                timestamp_ms += frame_ms;
                if tx.send(frame).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.running
            .store(false, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.running.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "silence"
    }
}
