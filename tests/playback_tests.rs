// Tests for the gapless playback scheduler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use creative_copilot::audio::{BufferId, DiscardSink, PcmBuffer, PlaybackScheduler, PlaybackSink};
use tokio::sync::mpsc;

/// Sink with a manually advanced clock, recording every play call. Buffers
/// never end on their own; tests report completion through `complete`.
struct TestSink {
    now: Mutex<f64>,
    plays: Mutex<Vec<(BufferId, f64, f64)>>,
    ended: Mutex<Option<mpsc::UnboundedSender<BufferId>>>,
    stop_calls: AtomicUsize,
}

impl TestSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(0.0),
            plays: Mutex::new(Vec::new()),
            ended: Mutex::new(None),
            stop_calls: AtomicUsize::new(0),
        })
    }

    fn set_now(&self, t: f64) {
        *self.now.lock().unwrap() = t;
    }

    fn plays(&self) -> Vec<(BufferId, f64, f64)> {
        self.plays.lock().unwrap().clone()
    }

    /// Report that a buffer finished playing, as a real device would.
    fn complete(&self, id: BufferId) {
        if let Some(tx) = self.ended.lock().unwrap().as_ref() {
            let _ = tx.send(id);
        }
    }
}

impl PlaybackSink for TestSink {
    fn now(&self) -> f64 {
        *self.now.lock().unwrap()
    }

    fn play(
        &self,
        id: BufferId,
        buffer: PcmBuffer,
        start_at: f64,
        ended: mpsc::UnboundedSender<BufferId>,
    ) {
        self.plays
            .lock()
            .unwrap()
            .push((id, start_at, buffer.duration_secs()));
        *self.ended.lock().unwrap() = Some(ended);
    }

    fn stop_all(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn buffer_of(duration_secs: f64) -> PcmBuffer {
    let sample_rate = 24000u32;
    PcmBuffer {
        samples: vec![0.0; (duration_secs * sample_rate as f64) as usize],
        sample_rate,
        channels: 1,
    }
}

#[test]
fn test_buffers_queue_back_to_back() {
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    let durations = [0.5, 0.25, 1.0, 0.125];
    for &d in &durations {
        scheduler.schedule(buffer_of(d));
    }

    let plays = sink.plays();
    assert_eq!(plays.len(), durations.len());

    // Each buffer starts exactly where the previous one ends
    let first_start = plays[0].1;
    let mut expected_start = first_start;
    for (i, (_, start, dur)) in plays.iter().enumerate() {
        assert!(
            (start - expected_start).abs() < 1e-9,
            "buffer {} started at {} expected {}",
            i,
            start,
            expected_start
        );
        expected_start += dur;
    }

    // Total scheduled span is exactly the sum of durations
    let total: f64 = durations.iter().sum();
    assert!((scheduler.scheduled_until() - (first_start + total)).abs() < 1e-9);
}

#[test]
fn test_span_is_sum_regardless_of_arrival_timing() {
    // Decode callbacks arrive at arbitrary wall-clock times; as long as the
    // device clock has not overtaken the cursor, the span stays gapless.
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    scheduler.schedule(buffer_of(1.0));
    sink.set_now(0.3); // playback in progress when the next chunk decodes
    scheduler.schedule(buffer_of(0.5));
    sink.set_now(0.9);
    scheduler.schedule(buffer_of(0.25));

    assert!((scheduler.scheduled_until() - 1.75).abs() < 1e-9);
}

#[test]
fn test_cursor_catches_up_to_device_clock_after_gap() {
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    scheduler.schedule(buffer_of(0.5));
    // Everything played out and the clock moved past the cursor
    sink.set_now(2.0);
    scheduler.schedule(buffer_of(0.5));

    let plays = sink.plays();
    assert!((plays[1].1 - 2.0).abs() < 1e-9, "late buffer starts at now");
    assert!((scheduler.scheduled_until() - 2.5).abs() < 1e-9);
}

#[test]
fn test_live_set_tracks_until_ended() {
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    let a = scheduler.schedule(buffer_of(0.1));
    let b = scheduler.schedule(buffer_of(0.1));
    assert_eq!(scheduler.live_count(), 2);

    scheduler.on_ended(a);
    assert_eq!(scheduler.live_count(), 1);

    // Ending the same buffer twice is harmless
    scheduler.on_ended(a);
    assert_eq!(scheduler.live_count(), 1);

    scheduler.on_ended(b);
    assert_eq!(scheduler.live_count(), 0);
}

#[test]
fn test_stop_all_drains_live_set_and_resets_cursor() {
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    scheduler.schedule(buffer_of(1.0));
    scheduler.schedule(buffer_of(1.0));
    assert_eq!(scheduler.live_count(), 2);

    scheduler.stop_all();
    assert_eq!(scheduler.live_count(), 0);
    assert_eq!(scheduler.scheduled_until(), 0.0);
    assert_eq!(sink.stop_calls.load(Ordering::SeqCst), 1);

    // Idempotent
    scheduler.stop_all();
    assert_eq!(scheduler.live_count(), 0);
}

#[test]
fn test_sink_reported_completion_drains_live_set() {
    let sink = TestSink::new();
    let mut scheduler = PlaybackScheduler::new(sink.clone());

    let a = scheduler.schedule(buffer_of(0.1));
    let _b = scheduler.schedule(buffer_of(0.1));
    assert_eq!(scheduler.live_count(), 2);

    sink.complete(a);
    assert_eq!(scheduler.live_count(), 1, "ended buffer leaves the live set");
}

#[test]
fn test_discarded_buffers_end_immediately() {
    let mut scheduler = PlaybackScheduler::new(Arc::new(DiscardSink::new()));

    scheduler.schedule(buffer_of(0.1));
    scheduler.schedule(buffer_of(0.1));

    assert_eq!(scheduler.live_count(), 0);
    // The cursor still advanced by both durations
    assert!(scheduler.scheduled_until() >= 0.2);
}

#[test]
fn test_empty_buffer_has_zero_duration() {
    let buffer = PcmBuffer {
        samples: vec![],
        sample_rate: 24000,
        channels: 1,
    };
    assert_eq!(buffer.duration_secs(), 0.0);
}
