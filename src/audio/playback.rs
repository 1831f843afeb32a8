use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

/// A decoded audio buffer ready for playback (float PCM).
#[derive(Debug, Clone)]
pub struct PcmBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmBuffer {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Identifier for a scheduled buffer, used to track the live set.
pub type BufferId = u64;

/// Output device abstraction.
///
/// `now` is the device clock in seconds; `play` must start the buffer at
/// `start_at` on that clock and send its id on `ended` once playback
/// finishes, so the scheduler can drop it from the live set.
pub trait PlaybackSink: Send + Sync {
    fn now(&self) -> f64;

    fn play(
        &self,
        id: BufferId,
        buffer: PcmBuffer,
        start_at: f64,
        ended: mpsc::UnboundedSender<BufferId>,
    );

    /// Halt everything queued or playing. Idempotent.
    fn stop_all(&self);
}

/// Sink for headless deployments: buffers are accepted and dropped.
pub struct DiscardSink {
    started: std::time::Instant,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

impl Default for DiscardSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSink for DiscardSink {
    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn play(
        &self,
        id: BufferId,
        _buffer: PcmBuffer,
        _start_at: f64,
        ended: mpsc::UnboundedSender<BufferId>,
    ) {
        // A dropped buffer finishes instantly.
        let _ = ended.send(id);
    }

    fn stop_all(&self) {}
}

/// Gapless playback scheduler.
///
/// Each buffer starts at `max(device_now, next_start)` and the cursor
/// advances by the buffer's duration at scheduling time, not at playback
/// completion, so buffers queue back-to-back even though decode calls arrive
/// asynchronously relative to actual playback. Scheduled buffers stay in a
/// live set until they end, so a forced stop can halt all of them at once.
pub struct PlaybackScheduler {
    sink: Arc<dyn PlaybackSink>,
    next_start: f64,
    live: HashSet<BufferId>,
    next_id: BufferId,
    ended_tx: mpsc::UnboundedSender<BufferId>,
    ended_rx: mpsc::UnboundedReceiver<BufferId>,
}

impl PlaybackScheduler {
    pub fn new(sink: Arc<dyn PlaybackSink>) -> Self {
        let (ended_tx, ended_rx) = mpsc::unbounded_channel();
        Self {
            sink,
            next_start: 0.0,
            live: HashSet::new(),
            next_id: 0,
            ended_tx,
            ended_rx,
        }
    }

    /// Queue a buffer for gapless playback. Returns its id.
    pub fn schedule(&mut self, buffer: PcmBuffer) -> BufferId {
        self.drain_ended();
        let now = self.sink.now();
        let start_at = now.max(self.next_start);
        self.next_start = start_at + buffer.duration_secs();

        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id);

        debug!(
            "Scheduled buffer {} at {:.3}s ({:.3}s long, cursor now {:.3}s)",
            id,
            start_at,
            buffer.duration_secs(),
            self.next_start
        );

        self.sink.play(id, buffer, start_at, self.ended_tx.clone());
        id
    }

    /// Playback-ended callback: drop the buffer from the live set.
    pub fn on_ended(&mut self, id: BufferId) {
        self.live.remove(&id);
    }

    /// Fold sink-reported completions into the live set.
    fn drain_ended(&mut self) {
        while let Ok(id) = self.ended_rx.try_recv() {
            self.live.remove(&id);
        }
    }

    /// Halt all queued/playing buffers and reset the cursor. Idempotent.
    pub fn stop_all(&mut self) {
        self.drain_ended();
        if !self.live.is_empty() {
            debug!("Stopping {} live buffer(s)", self.live.len());
        }
        self.sink.stop_all();
        self.live.clear();
        self.next_start = 0.0;
    }

    /// Number of buffers currently queued or playing.
    pub fn live_count(&mut self) -> usize {
        self.drain_ended();
        self.live.len()
    }

    /// Device-clock time at which the last scheduled buffer will end.
    pub fn scheduled_until(&self) -> f64 {
        self.next_start
    }
}
