//! Hold classification
//!
//! Holds are stationary and phase-only: libinput reports begin and end (or
//! end `cancelled` when movement interrupts the hold) with no update stream
//! and no motion vector. Events carry no direction atom, so the distance
//! gate downstream always passes them. A completed hold additionally emits
//! an oneshot on `[hold, finger]` so plain `hold.<n>.command` rules fire.

use crate::config::{RuleKey, RulePath};
use crate::detector::{ClassifiedEvent, Detector, Trigger};
use crate::event::buffer::GestureBuffer;
use crate::event::types::{GestureKind, Phase};

/// Stateless hold classifier, one per pipeline
#[derive(Debug, Default)]
pub struct HoldDetector;

impl HoldDetector {
    pub fn new() -> Self {
        Self
    }

    /// Repeat path: `[hold, finger, phase]` (no direction atom)
    fn repeat_path(finger: u8, phase: Phase) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Hold.as_str()),
            RuleKey::new(finger),
            RuleKey::new(phase.as_str()),
        ])
    }

    /// Oneshot path: `[hold, finger]`
    fn oneshot_path(finger: u8) -> RulePath {
        RulePath::new(vec![
            RuleKey::new(GestureKind::Hold.as_str()),
            RuleKey::new(finger),
        ])
    }
}

impl Detector for HoldDetector {
    fn kind(&self) -> GestureKind {
        GestureKind::Hold
    }

    fn detect(
        &mut self,
        buffer: &GestureBuffer,
        _config: &crate::config::ConfigSnapshot,
    ) -> Vec<ClassifiedEvent> {
        let cycle = buffer.since_last_begin(GestureKind::Hold);
        let Some(last) = cycle.last() else {
            return Vec::new();
        };

        let finger = last.finger_count;
        let repeat_event = ClassifiedEvent {
            path: Self::repeat_path(finger, last.phase),
            trigger: Trigger::Repeat,
            kind: GestureKind::Hold,
            direction: None,
            payload: last.delta,
            timestamp: last.timestamp,
        };

        match last.phase {
            // A hold that ran to completion also fires its oneshot rule
            Phase::End => {
                let oneshot_event = ClassifiedEvent {
                    path: Self::oneshot_path(finger),
                    trigger: Trigger::Oneshot,
                    kind: GestureKind::Hold,
                    direction: None,
                    payload: last.delta,
                    timestamp: last.timestamp,
                };
                vec![oneshot_event, repeat_event]
            }
            Phase::Begin | Phase::Cancelled => vec![repeat_event],
            // libinput emits no hold updates; tolerate them as no-ops
            Phase::Update => Vec::new(),
        }
    }
}
