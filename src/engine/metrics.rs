use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Characters per standardized "word".
pub const CHARS_PER_WORD: f64 = 5.0;

/// One per-second recording of the live metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elapsed_ms: u64,
    pub wpm: u32,
    pub accuracy: u32,
}

/// WPM over the elapsed part of the countdown, rounded to the nearest integer.
///
/// Returns 0 before any time has elapsed.
pub fn compute_wpm(correct: u32, duration_secs: u32, remaining_secs: u32) -> u32 {
    let elapsed = duration_secs.saturating_sub(remaining_secs);
    if elapsed == 0 {
        return 0;
    }
    let minutes = elapsed as f64 / 60.0;
    (correct as f64 / CHARS_PER_WORD / minutes).round() as u32
}

/// Percentage of correct keystrokes, rounded. 100 when nothing was typed.
pub fn compute_accuracy(correct: u32, incorrect: u32) -> u32 {
    let total = correct + incorrect;
    if total == 0 {
        return 100;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Append-only record of snapshots for one session.
#[derive(Clone, Debug, Default)]
pub struct MetricsEngine {
    snapshots: Vec<Snapshot>,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current metrics and appends them to the sequence.
    pub fn snapshot(
        &mut self,
        started_at: Instant,
        now: Instant,
        correct: u32,
        incorrect: u32,
        duration_secs: u32,
        remaining_secs: u32,
    ) -> Snapshot {
        let snapshot = Snapshot {
            elapsed_ms: now.saturating_duration_since(started_at).as_millis() as u64,
            wpm: compute_wpm(correct, duration_secs, remaining_secs),
            accuracy: compute_accuracy(correct, incorrect),
        };
        self.snapshots.push(snapshot);
        snapshot
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
