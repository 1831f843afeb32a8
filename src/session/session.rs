use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::config::SessionConfig;
use super::stats::SessionStats;
use super::transcript::{Fragment, Speaker, Transcript, TranscriptEntry};
use crate::audio::{codec, CaptureBackend, PcmBuffer, PlaybackScheduler, PlaybackSink};
use crate::live::{ClientEvent, LiveBackend, LiveConfig, ServerEvent};

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Connecting,
    Connected,
    Error,
}

/// One end-to-end connection to the live voice backend.
///
/// Owns the capture backend, the open stream handle, the transcript, and the
/// playback scheduler. `start` walks Idle → Connecting → Connected; `stop`
/// tears everything down in order and is safe to call from any state, any
/// number of times. A stream-level error performs the same teardown before
/// surfacing the message. There is no reconnection and no stall watchdog: a
/// stalled stream is only detected through the transport's error event.
pub struct VoiceSession {
    config: SessionConfig,
    live: Arc<dyn LiveBackend>,
    started_at: chrono::DateTime<chrono::Utc>,

    state: Arc<Mutex<SessionState>>,
    last_error: Arc<Mutex<Option<String>>>,
    transcript: Arc<Mutex<Transcript>>,
    scheduler: Arc<Mutex<PlaybackScheduler>>,

    /// Capture backend; the device is held only between start and teardown
    capture: Arc<Mutex<Option<Box<dyn CaptureBackend>>>>,
    /// Outgoing half of the open stream; present only while connected
    live_sender: Arc<Mutex<Option<mpsc::Sender<ClientEvent>>>>,

    /// Set once the remote confirms the stream is open
    opened: Arc<AtomicBool>,
    chunks_sent: Arc<AtomicUsize>,

    uplink_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
    downlink_handle: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl VoiceSession {
    pub fn new(
        config: SessionConfig,
        live: Arc<dyn LiveBackend>,
        capture: Box<dyn CaptureBackend>,
        sink: Arc<dyn PlaybackSink>,
    ) -> Self {
        Self {
            config,
            live,
            started_at: Utc::now(),
            state: Arc::new(Mutex::new(SessionState::Idle)),
            last_error: Arc::new(Mutex::new(None)),
            transcript: Arc::new(Mutex::new(Transcript::new())),
            scheduler: Arc::new(Mutex::new(PlaybackScheduler::new(sink))),
            capture: Arc::new(Mutex::new(Some(capture))),
            live_sender: Arc::new(Mutex::new(None)),
            opened: Arc::new(AtomicBool::new(false)),
            chunks_sent: Arc::new(AtomicUsize::new(0)),
            uplink_handle: Arc::new(Mutex::new(None)),
            downlink_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the session: acquire the capture device, open the stream, and
    /// wire the uplink and downlink pumps.
    ///
    /// Starting while connecting or connected is rejected; this is the guard
    /// behind the UI's disabled start action, not a queued retry.
    pub async fn start(&self) -> Result<()> {
        {
            let mut state = self.state.lock().await;
            match *state {
                SessionState::Connecting | SessionState::Connected => {
                    warn!("Session {} already active", self.config.session_id);
                    return Err(anyhow!("session is already active"));
                }
                SessionState::Idle | SessionState::Error => {
                    *state = SessionState::Connecting;
                }
            }
        }
        *self.last_error.lock().await = None;
        self.transcript.lock().await.clear();
        self.opened.store(false, Ordering::SeqCst);

        info!("Starting voice session: {}", self.config.session_id);

        // Acquire the capture device first; each failure cause carries its
        // own user-facing message. The lock guard is dropped before any
        // failure handling, which re-locks for teardown.
        let acquired = {
            let mut capture = self.capture.lock().await;
            match capture.as_mut() {
                Some(backend) => backend.start().await.map_err(Some),
                None => Err(None),
            }
        };
        let frames = match acquired {
            Ok(rx) => rx,
            Err(Some(cause)) => {
                error!("Device acquisition failed: {}", cause);
                self.fail(&cause.to_string()).await;
                return Err(cause.into());
            }
            Err(None) => {
                self.fail("Capture device is no longer available.").await;
                return Err(anyhow!("capture backend consumed"));
            }
        };

        // Open the bidirectional stream.
        let live_config = LiveConfig {
            model: self.config.model.clone(),
            system_instruction: self.config.system_instruction.clone(),
            response_modality: "audio".to_string(),
            input_transcription: true,
            output_transcription: true,
        };
        let connection = match self.live.connect(live_config).await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to open live stream: {}", e);
                self.fail("A connection error occurred. Please try again.")
                    .await;
                return Err(e);
            }
        };

        let sender = connection.sender;
        let mut events = connection.events;
        *self.live_sender.lock().await = Some(sender.clone());

        // Uplink: encode capture blocks and push them onto the stream. The
        // mpsc hop decouples encoding/send from the capture callback, so the
        // capture side never waits on the network. Audio arriving before the
        // remote confirms open is discarded, matching the capture tap being
        // wired only at open.
        let opened = Arc::clone(&self.opened);
        let chunks_sent = Arc::clone(&self.chunks_sent);
        let input_rate = self.config.input_sample_rate;
        let uplink = tokio::spawn(async move {
            let mut frames = frames;
            let mime_type = codec::pcm_mime_type(input_rate);
            while let Some(frame) = frames.recv().await {
                if !opened.load(Ordering::SeqCst) {
                    continue;
                }
                let event = ClientEvent::Audio {
                    data: codec::encode_chunk(&frame.samples),
                    mime_type: mime_type.clone(),
                };
                if sender.send(event).await.is_err() {
                    break;
                }
                chunks_sent.fetch_add(1, Ordering::SeqCst);
            }
            info!("Uplink task stopped");
        });
        *self.uplink_handle.lock().await = Some(uplink);

        // Downlink: apply transcript fragments in arrival order, schedule
        // synthesized audio gaplessly, and tear down on stream errors.
        let state = Arc::clone(&self.state);
        let last_error = Arc::clone(&self.last_error);
        let transcript = Arc::clone(&self.transcript);
        let scheduler = Arc::clone(&self.scheduler);
        let capture = Arc::clone(&self.capture);
        let live_sender = Arc::clone(&self.live_sender);
        let opened = Arc::clone(&self.opened);
        let output_rate = self.config.output_sample_rate;
        let channels = self.config.channels;
        let session_id = self.config.session_id.clone();

        let downlink = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    ServerEvent::Opened => {
                        let mut st = state.lock().await;
                        if *st == SessionState::Connecting {
                            *st = SessionState::Connected;
                            opened.store(true, Ordering::SeqCst);
                            info!("Session {} connected", session_id);
                        }
                    }
                    ServerEvent::InputTranscription { text, is_final } => {
                        transcript.lock().await.apply(Fragment {
                            speaker: Speaker::User,
                            text,
                            is_final,
                        });
                    }
                    ServerEvent::OutputTranscription { text, is_final } => {
                        transcript.lock().await.apply(Fragment {
                            speaker: Speaker::Model,
                            text,
                            is_final,
                        });
                    }
                    ServerEvent::Audio { data } => match codec::decode_chunk(&data) {
                        Ok(samples) => {
                            scheduler.lock().await.schedule(PcmBuffer {
                                samples,
                                sample_rate: output_rate,
                                channels,
                            });
                        }
                        Err(e) => warn!("Dropping undecodable audio chunk: {}", e),
                    },
                    ServerEvent::Error { message } => {
                        error!("Stream error on session {}: {}", session_id, message);
                        Self::release(&live_sender, &capture, &scheduler).await;
                        *last_error.lock().await =
                            Some("A connection error occurred. Please try again.".to_string());
                        *state.lock().await = SessionState::Error;
                        break;
                    }
                    ServerEvent::Closed => {
                        info!("Session {} closed by remote", session_id);
                        break;
                    }
                }
            }
            info!("Downlink task stopped");
        });
        *self.downlink_handle.lock().await = Some(downlink);

        Ok(())
    }

    /// Stop the session and release everything it holds.
    ///
    /// Idempotent and safe from any state: every teardown step checks that
    /// the resource is still held before releasing it.
    pub async fn stop(&self) -> Result<SessionStats> {
        info!("Stopping voice session: {}", self.config.session_id);

        self.release_resources().await;

        if let Some(handle) = self.uplink_handle.lock().await.take() {
            handle.abort();
        }
        if let Some(handle) = self.downlink_handle.lock().await.take() {
            handle.abort();
        }

        self.opened.store(false, Ordering::SeqCst);
        *self.state.lock().await = SessionState::Idle;

        self.stats().await
    }

    /// Ordered teardown: stop sending, release the capture device, halt
    /// playback, close the stream.
    async fn release_resources(&self) {
        Self::release(&self.live_sender, &self.capture, &self.scheduler).await;
    }

    async fn release(
        live_sender: &Arc<Mutex<Option<mpsc::Sender<ClientEvent>>>>,
        capture: &Arc<Mutex<Option<Box<dyn CaptureBackend>>>>,
        scheduler: &Arc<Mutex<PlaybackScheduler>>,
    ) {
        // 1. Stop sending and close the remote stream. Dropping the sender
        //    ends the uplink; the explicit close lets the remote finish
        //    cleanly.
        if let Some(sender) = live_sender.lock().await.take() {
            let _ = sender.try_send(ClientEvent::Close);
        }

        // 2. Release the capture device.
        if let Some(backend) = capture.lock().await.as_mut() {
            if backend.is_capturing() {
                if let Err(e) = backend.stop().await {
                    warn!("Failed to stop capture backend: {}", e);
                }
            }
        }

        // 3. Halt all queued/playing buffers.
        scheduler.lock().await.stop_all();
    }

    /// Record a failure: release resources and move to the error state with
    /// a user-facing message.
    async fn fail(&self, message: &str) {
        self.release_resources().await;
        *self.last_error.lock().await = Some(message.to_string());
        *self.state.lock().await = SessionState::Error;
    }

    pub async fn state(&self) -> SessionState {
        *self.state.lock().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.last_error.lock().await.clone()
    }

    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().await.to_vec()
    }

    /// Snapshot of the session for status queries.
    pub async fn stats(&self) -> Result<SessionStats> {
        let duration = Utc::now().signed_duration_since(self.started_at);
        Ok(SessionStats {
            state: *self.state.lock().await,
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            chunks_sent: self.chunks_sent.load(Ordering::SeqCst),
            transcript_entries: self.transcript.lock().await.len(),
            live_buffers: self.scheduler.lock().await.live_count(),
            error: self.last_error.lock().await.clone(),
        })
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }
}
