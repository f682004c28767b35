//! Core types for the motion sample stream
//!
//! Defines the fundamental data structures flowing through the pipeline.
//! A [`MotionSample`] is immutable once created; ownership passes to the
//! buffer on insertion and nothing else retains a reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gesture kinds recognized by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    /// Multi-finger directional swipe
    Swipe,
    /// Two-finger pinch (zoom in/out)
    Pinch,
    /// Stationary multi-finger hold
    Hold,
}

impl GestureKind {
    /// Rule-tree key for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Swipe => "swipe",
            GestureKind::Pinch => "pinch",
            GestureKind::Hold => "hold",
        }
    }

    /// Whether classified events of this kind carry a direction atom
    pub fn is_directional(&self) -> bool {
        !matches!(self, GestureKind::Hold)
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage of one gesture occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Gesture started
    Begin,
    /// Fingers moved while the gesture is active
    Update,
    /// Gesture finished
    End,
    /// Gesture aborted before completing (hold interrupted by movement)
    Cancelled,
}

impl Phase {
    /// Rule-tree key for this phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Begin => "begin",
            Phase::Update => "update",
            Phase::End => "end",
            Phase::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motion vector carried by one sample
///
/// `dx`/`dy` are pointer-acceleration-adjusted; `dx_raw`/`dy_raw` are the
/// unaccelerated device deltas. `zoom` is the absolute pinch scale (1.0 at
/// gesture start) and `rotation` the pinch rotation angle delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
    pub dx_raw: f64,
    pub dy_raw: f64,
    pub zoom: f64,
    pub rotation: f64,
}

impl Delta {
    /// Motion-only delta (swipe samples)
    pub fn motion(dx: f64, dy: f64, dx_raw: f64, dy_raw: f64) -> Self {
        Self {
            dx,
            dy,
            dx_raw,
            dy_raw,
            zoom: 0.0,
            rotation: 0.0,
        }
    }
}

/// One structured motion sample produced by the external parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Gesture kind this sample belongs to
    pub kind: GestureKind,
    /// Lifecycle phase reported by the device
    pub phase: Phase,
    /// Number of fingers on the surface
    pub finger_count: u8,
    /// Motion vector (zeroed for begin/end samples, which carry none)
    pub delta: Delta,
    /// Event time in seconds; strictly non-decreasing within a stream
    pub timestamp: f64,
}

impl MotionSample {
    /// Create a sample with an explicit motion vector
    pub fn new(
        kind: GestureKind,
        phase: Phase,
        finger_count: u8,
        delta: Delta,
        timestamp: f64,
    ) -> Self {
        Self {
            kind,
            phase,
            finger_count,
            delta,
            timestamp,
        }
    }

    /// Create a begin/end style sample that carries no motion
    pub fn boundary(kind: GestureKind, phase: Phase, finger_count: u8, timestamp: f64) -> Self {
        Self {
            kind,
            phase,
            finger_count,
            delta: Delta::default(),
            timestamp,
        }
    }

    /// Whether this sample is an update
    pub fn is_update(&self) -> bool {
        self.phase == Phase::Update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_kind_keys() {
        assert_eq!(GestureKind::Swipe.as_str(), "swipe");
        assert_eq!(GestureKind::Pinch.as_str(), "pinch");
        assert_eq!(GestureKind::Hold.as_str(), "hold");
    }

    #[test]
    fn test_directionality() {
        assert!(GestureKind::Swipe.is_directional());
        assert!(GestureKind::Pinch.is_directional());
        assert!(!GestureKind::Hold.is_directional());
    }

    #[test]
    fn test_phase_keys() {
        assert_eq!(Phase::Begin.as_str(), "begin");
        assert_eq!(Phase::Update.as_str(), "update");
        assert_eq!(Phase::End.as_str(), "end");
        assert_eq!(Phase::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_boundary_sample_has_no_motion() {
        let sample = MotionSample::boundary(GestureKind::Swipe, Phase::Begin, 3, 1.0);
        assert_eq!(sample.delta, Delta::default());
        assert!(!sample.is_update());
    }

    #[test]
    fn test_sample_serialization_round_trip() {
        let sample = MotionSample::new(
            GestureKind::Swipe,
            Phase::Update,
            3,
            Delta::motion(12.5, -0.5, 30.0, -1.2),
            2.75,
        );
        let json = serde_json::to_string(&sample).unwrap();
        let back: MotionSample = serde_json::from_str(&json).unwrap();
        assert_eq!(sample, back);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&GestureKind::Pinch).unwrap();
        assert_eq!(json, "\"pinch\"");
        let json = serde_json::to_string(&Phase::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
