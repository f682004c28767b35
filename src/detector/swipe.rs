//! Swipe classification
//!
//! Classifies buffered swipe samples into directional, fingered, phased
//! events. An update must clear the jitter floor and the short-horizon rate
//! must cross the configured oneshot threshold before anything fires; once
//! it does, the classifier emits an oneshot/repeat pair for the cycle.

use crate::config::{ConfigSnapshot, RuleKey, RulePath, Searcher};
use crate::detector::{magnitude, ClassifiedEvent, Detector, Direction, Trigger, JITTER_FLOOR};
use crate::event::buffer::{self, GestureBuffer};
use crate::event::types::{GestureKind, Phase};
use tracing::debug;

/// Base unit of the oneshot rate threshold; the configured per-path value
/// (default 1) scales it
pub const BASE_THRESHOLD: f64 = 25.0;

/// Stateful swipe classifier, one per pipeline
#[derive(Debug, Default)]
pub struct SwipeDetector {
    searcher: Searcher,
}

impl SwipeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeat path: `[swipe, finger, direction (skippable), phase]`
    fn repeat_path(finger: u8, direction: Direction, phase: Phase) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Swipe.as_str()),
            RuleKey::new(finger),
            RuleKey::skippable(direction.as_str()),
            RuleKey::new(phase.as_str()),
        ])
    }

    /// Oneshot path: `[swipe, finger, direction]`
    fn oneshot_path(finger: u8, direction: Direction) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Swipe.as_str()),
            RuleKey::new(finger),
            RuleKey::new(direction.as_str()),
        ])
    }

    /// Configured oneshot threshold for a path, with fallback to the
    /// kind-wide default; memoized per tree generation
    fn threshold(&mut self, path: &RulePath, config: &ConfigSnapshot) -> f64 {
        let specific = path.extended("threshold");
        let global: RulePath = ["threshold", GestureKind::Swipe.as_str()]
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
}

impl Detector for SwipeDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Swipe
    }

    fn detect(&mut self, buffer: &GestureBuffer, config: &ConfigSnapshot) -> Vec<ClassifiedEvent> {
        let cycle = buffer.since_last_begin(GestureKind::Swipe);
        let updates = buffer::updating(&cycle);
        if updates.is_empty() {
            return Vec::new();
        }

        let last = cycle[cycle.len() - 1];
        let finger = last.finger_count;

        // The first update of a cycle is the effective begin; a raw begin
        // sample carries no motion and never reaches this point on its own
        let phase = match last.phase {
            Phase::Update if updates.len() == 1 => Phase::Begin,
            other => other,
        };

        // The end sample itself carries no motion
        let delta = if phase == Phase::End {
            cycle[cycle.len() - 2].delta
        } else {
            last.delta
        };

        let direction = Direction::from_motion(delta.dx, delta.dy);
        let repeat_path = Self::repeat_path(finger, direction, phase);
        let repeat_event = ClassifiedEvent {
            path: repeat_path,
            trigger: Trigger::Repeat,
            kind: GestureKind::Swipe,
            direction: Some(direction),
            payload: delta,
            timestamp: last.timestamp,
        };

        if phase != Phase::Update {
            return vec![repeat_event];
        }

        // Jitter floor: tiny updates never classify
        if magnitude(delta.dx, delta.dy) <= JITTER_FLOOR {
            return Vec::new();
        }

        let rate_x = buffer::window_rate(&updates, |s| s.delta.dx);
        let rate_y = buffer::window_rate(&updates, |s| s.delta.dy);
        let oneshot_magnitude = magnitude(rate_x, rate_y);
        let oneshot_path = Self::oneshot_path(finger, direction);
        let threshold = self.threshold(&oneshot_path, config);

        if oneshot_magnitude > threshold {
            debug!(
                path = %oneshot_path,
                rate = oneshot_magnitude,
                threshold,
                "oneshot threshold crossed"
            );
            let oneshot_event = ClassifiedEvent {
                path: oneshot_path,
                trigger: Trigger::Oneshot,
                kind: GestureKind::Swipe,
                direction: Some(direction),
                payload: delta,
                timestamp: last.timestamp,
            };
            vec![oneshot_event, repeat_event]
        } else {
            // Distance has not yet accumulated enough to fire even a repeat;
            // repeats begin flowing once the threshold is crossed in a burst
            Vec::new()
        }
    }
}
