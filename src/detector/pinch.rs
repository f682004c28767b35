//! Pinch classification
//!
//! Same contract as the swipe classifier, operating on the absolute zoom
//! scale instead of the motion vector. Direction is the zoom ratio between
//! consecutive updates (`in` when fingers spread, `out` when they close);
//! magnitudes are ratio distances from 1.0, so the base threshold and jitter
//! floor sit two orders of magnitude below the swipe ones.

use crate::config::{ConfigSnapshot, RuleKey, RulePath, Searcher};
use crate::detector::{ClassifiedEvent, Detector, Direction, Trigger};
use crate::event::buffer::{self, GestureBuffer, RATE_SCALE, RATE_WINDOW};
use crate::event::types::{GestureKind, Phase};
use tracing::debug;

/// Base unit of the pinch oneshot threshold
pub const BASE_THRESHOLD: f64 = 0.3;

/// Zoom-ratio distance from 1.0 below which an update never classifies
pub const ZOOM_JITTER_FLOOR: f64 = 0.004;

/// Stateful pinch classifier, one per pipeline
#[derive(Debug, Default)]
pub struct PinchDetector {
    searcher: Searcher,
}

impl PinchDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn repeat_path(finger: u8, direction: Direction, phase: Phase) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Pinch.as_str()),
            RuleKey::new(finger),
            RuleKey::skippable(direction.as_str()),
            RuleKey::new(phase.as_str()),
        ])
    }

    fn oneshot_path(finger: u8, direction: Direction) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Pinch.as_str()),
            RuleKey::new(finger),
            RuleKey::new(direction.as_str()),
        ])
    }

    fn threshold(&mut self, path: &RulePath, config: &ConfigSnapshot) -> f64 {
        let specific = path.extended("threshold");
        let global: RulePath = ["threshold", GestureKind::Pinch.as_str()]
            .into_iter()
            .collect();
        let multiplier = self
            .searcher
            .search(&specific, config.generation, config.primary())
            .or_else(|| self.searcher.search(&global, config.generation, config.primary()))
            .and_then(|t| t.as_f64())
            .unwrap_or(1.0);
        BASE_THRESHOLD * multiplier
    }

    /// Short-horizon rate of zoom change over the trailing window
    fn zoom_rate(updates: &[&crate::event::types::MotionSample]) -> f64 {
        let Some(last) = updates.last() else {
            return 0.0;
        };
        let anchor = if updates.len() >= RATE_WINDOW {
            updates[updates.len() - RATE_WINDOW]
        } else {
            updates[0]
        };
        let elapsed = last.timestamp - anchor.timestamp;
        RATE_SCALE * (last.delta.zoom - anchor.delta.zoom) / elapsed
    }
}

impl Detector for PinchDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Pinch
    }

    fn detect(&mut self, buffer: &GestureBuffer, config: &ConfigSnapshot) -> Vec<ClassifiedEvent> {
        let cycle = buffer.since_last_begin(GestureKind::Pinch);
        let updates = buffer::updating(&cycle);
        if updates.is_empty() {
            return Vec::new();
        }

        let last = cycle[cycle.len() - 1];
        let finger = last.finger_count;

        let phase = match last.phase {
            Phase::Update if updates.len() == 1 => Phase::Begin,
            other => other,
        };

        let delta = if phase == Phase::End {
            cycle[cycle.len() - 2].delta
        } else {
            last.delta
        };

        // Ratio against the previous update; the first update compares
        // against the neutral scale
        let prev_zoom = if updates.len() >= 2 {
            updates[updates.len() - 2].delta.zoom
        } else {
            1.0
        };
        let ratio = if prev_zoom != 0.0 {
            delta.zoom / prev_zoom
        } else {
            1.0
        };
        let direction = if ratio >= 1.0 {
            Direction::In
        } else {
            Direction::Out
        };

        let repeat_path = Self::repeat_path(finger, direction, phase);
        let repeat_event = ClassifiedEvent {
            path: repeat_path,
            trigger: Trigger::Repeat,
            kind: GestureKind::Pinch,
            direction: Some(direction),
            payload: delta,
            timestamp: last.timestamp,
        };

        if phase != Phase::Update {
            return vec![repeat_event];
        }

        if (ratio - 1.0).abs() <= ZOOM_JITTER_FLOOR {
            return Vec::new();
        }

        let oneshot_magnitude = Self::zoom_rate(&updates).abs();
        let oneshot_path = Self::oneshot_path(finger, direction);
        let threshold = self.threshold(&oneshot_path, config);

        if oneshot_magnitude > threshold {
            debug!(
                path = %oneshot_path,
                rate = oneshot_magnitude,
                threshold,
                "pinch oneshot threshold crossed"
            );
            let oneshot_event = ClassifiedEvent {
                path: oneshot_path,
                trigger: Trigger::Oneshot,
                kind: GestureKind::Pinch,
                direction: Some(direction),
                payload: delta,
                timestamp: last.timestamp,
            };
            vec![oneshot_event, repeat_event]
        } else {
            Vec::new()
        }
    }
}
