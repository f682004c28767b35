//! Gesture classification
//!
//! One stateful classifier exists per gesture kind; all implement
//! [`Detector`] and are selected by the sample's kind tag. A classifier
//! consumes the buffered cycle and emits zero or more [`ClassifiedEvent`]s
//! tagged with a rule path and a trigger kind. An empty or unmatched buffer
//! is never an error, it produces no events.

pub mod hold;
pub mod pinch;
pub mod swipe;

pub use hold::HoldDetector;
pub use pinch::PinchDetector;
pub use swipe::SwipeDetector;

use crate::config::ConfigSnapshot;
use crate::config::RulePath;
use crate::event::buffer::GestureBuffer;
use crate::event::types::{Delta, GestureKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Jitter floor: an update whose magnitude does not exceed this never
/// produces a classified event
pub const JITTER_FLOOR: f64 = 0.3;

/// Trigger kind of a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Single-fire action
    Oneshot,
    /// Continuous action
    Repeat,
}

/// Direction of a directional gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    /// Pinch zoom-in (fingers spreading)
    In,
    /// Pinch zoom-out (fingers closing)
    Out,
}

impl Direction {
    /// Dominant-axis sign of a motion vector; ties favor the vertical axis
    pub fn from_motion(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// Rule-tree key for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
        }
    }

    /// Whether the distance gate accumulates `|dx|` rather than `|dy|`
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dominant-axis magnitude of a motion vector
pub fn magnitude(dx: f64, dy: f64) -> f64 {
    dx.abs().max(dy.abs())
}

/// A classified, dispatchable gesture event
///
/// Ephemeral: produced by a classifier, consumed by the action gate, no
/// identity beyond single-event processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEvent {
    /// Rule path this event is looked up under
    pub path: RulePath,
    /// Oneshot or repeat
    pub trigger: Trigger,
    /// Gesture kind that produced the event
    pub kind: GestureKind,
    /// Classified direction, absent for non-directional kinds
    pub direction: Option<Direction>,
    /// Motion payload handed to the executor
    pub payload: Delta,
    /// Event time of the sample that produced this event
    pub timestamp: f64,
}

/// Classifier contract shared by all gesture kinds
pub trait Detector {
    /// The gesture kind this classifier consumes
    fn kind(&self) -> GestureKind;

    /// Classify the current buffer contents into zero or more events
    fn detect(&mut self, buffer: &GestureBuffer, config: &ConfigSnapshot) -> Vec<ClassifiedEvent>;
}
