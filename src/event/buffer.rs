//! Time-ordered motion sample buffer
//!
//! One buffer exists per pipeline instance and holds the samples of all
//! gesture kinds for the currently active burst. Samples are append-only and
//! strictly non-decreasing in timestamp; an out-of-order sample is dropped
//! silently rather than rejected with an error. Detectors consume the buffer
//! through cycle views ([`GestureBuffer::since_last_begin`]) and the
//! pipeline discards a kind on `end`/`cancelled` once distance accounting is
//! done.

use crate::event::types::{GestureKind, MotionSample, Phase};
use tracing::trace;

/// Number of trailing update samples used for the short-horizon rate
pub const RATE_WINDOW: usize = 10;

/// Scale factor applied to the windowed rate estimate
pub const RATE_SCALE: f64 = 100.0;

/// Append-only, time-ordered store of motion samples
#[derive(Debug, Default)]
pub struct GestureBuffer {
    samples: Vec<MotionSample>,
}

impl GestureBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, ignoring it if its timestamp regresses
    pub fn append(&mut self, sample: MotionSample) {
        if let Some(last) = self.samples.last() {
            if sample.timestamp < last.timestamp {
                trace!(
                    ts = sample.timestamp,
                    last = last.timestamp,
                    "dropping out-of-order sample"
                );
                return;
            }
        }
        self.samples.push(sample);
    }

    /// All samples of `kind` from the most recent `begin` (inclusive) to the
    /// end; the full sequence of that kind if no `begin` exists
    pub fn since_last_begin(&self, kind: GestureKind) -> Vec<&MotionSample> {
        let of_kind: Vec<&MotionSample> = self.samples.iter().filter(|s| s.kind == kind).collect();
        match of_kind.iter().rposition(|s| s.phase == Phase::Begin) {
            Some(idx) => of_kind[idx..].to_vec(),
            None => of_kind,
        }
    }

    /// Discard all samples of one kind
    pub fn clear_kind(&mut self, kind: GestureKind) {
        self.samples.retain(|s| s.kind != kind);
    }

    /// Discard everything
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of buffered samples across all kinds
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Subsequence of a cycle whose phase is `update`
pub fn updating<'a>(cycle: &[&'a MotionSample]) -> Vec<&'a MotionSample> {
    cycle.iter().filter(|s| s.is_update()).copied().collect()
}

/// Sum of `attr` over the last [`RATE_WINDOW`] update samples (or all of
/// them if fewer exist)
pub fn windowed_sum(updates: &[&MotionSample], attr: impl Fn(&MotionSample) -> f64) -> f64 {
    let start = updates.len().saturating_sub(RATE_WINDOW);
    updates[start..].iter().map(|s| attr(s)).sum()
}

/// Short-horizon rate estimate: `RATE_SCALE * windowed_sum(attr) / elapsed`
/// where `elapsed` spans the latest and the window-th-from-latest update
/// sample (or the first if fewer exist).
///
/// A zero elapsed yields an infinite (or NaN, when the sum is also zero)
/// rate; callers compare against thresholds, so both degrade safely.
pub fn window_rate(updates: &[&MotionSample], attr: impl Fn(&MotionSample) -> f64) -> f64 {
    let Some(last) = updates.last() else {
        return 0.0;
    };
    let anchor = if updates.len() >= RATE_WINDOW {
        updates[updates.len() - RATE_WINDOW]
    } else {
        updates[0]
    };
    let elapsed = last.timestamp - anchor.timestamp;
    RATE_SCALE * windowed_sum(updates, attr) / elapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::types::Delta;

    fn sample(kind: GestureKind, phase: Phase, dx: f64, ts: f64) -> MotionSample {
        MotionSample::new(kind, phase, 3, Delta::motion(dx, 0.0, dx, 0.0), ts)
    }

    #[test]
    fn test_append_keeps_order() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 1.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 2.0));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_append_drops_out_of_order_timestamp() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 2.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 1.0));
        assert_eq!(buffer.len(), 1);

        // Equal timestamps are non-decreasing and kept
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 2.0));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_since_last_begin_slices_cycle() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 1.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 2.0));
        buffer.append(sample(GestureKind::Swipe, Phase::End, 0.0, 3.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 4.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 7.0, 5.0));

        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle[0].phase, Phase::Begin);
        assert_eq!(cycle[0].timestamp, 4.0);
        assert_eq!(cycle[1].delta.dx, 7.0);
    }

    #[test]
    fn test_since_last_begin_without_begin_returns_all() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 1.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 6.0, 2.0));

        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        assert_eq!(cycle.len(), 2);
    }

    #[test]
    fn test_since_last_begin_filters_kind() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 1.0));
        buffer.append(sample(GestureKind::Pinch, Phase::Begin, 0.0, 1.5));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 2.0));

        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        assert_eq!(cycle.len(), 2);
        assert!(cycle.iter().all(|s| s.kind == GestureKind::Swipe));
    }

    #[test]
    fn test_updating_subsequence() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 1.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 5.0, 2.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 6.0, 3.0));
        buffer.append(sample(GestureKind::Swipe, Phase::End, 0.0, 4.0));

        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        let updates = updating(&cycle);
        assert_eq!(updates.len(), 2);
    }

    #[test]
    fn test_windowed_sum_uses_trailing_window() {
        let mut buffer = GestureBuffer::new();
        for i in 0..15 {
            buffer.append(sample(GestureKind::Swipe, Phase::Update, 1.0, i as f64));
        }
        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        let updates = updating(&cycle);
        // Only the last 10 of 15 unit deltas are summed
        let sum = windowed_sum(&updates, |s| s.delta.dx);
        assert_eq!(sum, 10.0);
    }

    #[test]
    fn test_windowed_sum_short_sequence() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 2.0, 0.0));
        buffer.append(sample(GestureKind::Swipe, Phase::Update, 3.0, 1.0));
        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        let updates = updating(&cycle);
        assert_eq!(windowed_sum(&updates, |s| s.delta.dx), 5.0);
    }

    #[test]
    fn test_window_rate() {
        let mut buffer = GestureBuffer::new();
        // 4 updates, 1 unit of dx each, spread over 2 seconds
        for i in 0..4 {
            buffer.append(sample(GestureKind::Swipe, Phase::Update, 1.0, i as f64 * 0.5));
        }
        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        let updates = updating(&cycle);
        // 100 * 4 / 1.5
        let rate = window_rate(&updates, |s| s.delta.dx);
        assert!((rate - 266.666).abs() < 0.01);
    }

    #[test]
    fn test_window_rate_empty_is_zero() {
        let updates: Vec<&MotionSample> = vec![];
        assert_eq!(window_rate(&updates, |s| s.delta.dx), 0.0);
    }

    #[test]
    fn test_window_rate_zero_elapsed_is_infinite() {
        let a = sample(GestureKind::Swipe, Phase::Update, 10.0, 1.0);
        let b = sample(GestureKind::Swipe, Phase::Update, 10.0, 1.0);
        let updates = vec![&a, &b];
        assert!(window_rate(&updates, |s| s.delta.dx).is_infinite());
    }

    #[test]
    fn test_clear_kind() {
        let mut buffer = GestureBuffer::new();
        buffer.append(sample(GestureKind::Swipe, Phase::Begin, 0.0, 1.0));
        buffer.append(sample(GestureKind::Pinch, Phase::Begin, 0.0, 2.0));
        buffer.clear_kind(GestureKind::Swipe);
        assert_eq!(buffer.len(), 1);
        assert!(buffer.since_last_begin(GestureKind::Swipe).is_empty());
        assert_eq!(buffer.since_last_begin(GestureKind::Pinch).len(), 1);
    }
}
