pub mod capture;
pub mod codec;
pub mod file;
pub mod playback;

pub use capture::{
    AudioFrame, CaptureBackend, CaptureBackendFactory, CaptureConfig, CaptureError,
    CaptureSource, SilenceCapture,
};
pub use file::FileCapture;
pub use playback::{BufferId, DiscardSink, PcmBuffer, PlaybackScheduler, PlaybackSink};
