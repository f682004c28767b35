//! libinput debug-events parsing
//!
//! Turns one `libinput debug-events` output line into a structured motion
//! sample. Lines that are not gesture events, or that are malformed, yield
//! `None` and never reach the pipeline.
//!
//! Representative lines:
//!
//! ```text
//!  event9   GESTURE_SWIPE_BEGIN  +2.073s   3
//!  event9   GESTURE_SWIPE_UPDATE +2.084s   3 12.34/ 4.99 (32.49/13.15 unaccelerated)
//!  event9   GESTURE_PINCH_UPDATE +3.478s   2 -0.33/ 0.05 ( 0.93/ 0.13 unaccelerated) 1.23 @  0.12
//!  event9   GESTURE_HOLD_END     +5.073s   4 cancelled
//! ```

use crate::event::types::{Delta, GestureKind, MotionSample, Phase};
use regex::Regex;

/// Parser for the libinput debug-events gesture stream
#[derive(Debug)]
pub struct LibinputGestureParser {
    event_re: Regex,
}

impl LibinputGestureParser {
    pub fn new() -> Self {
        Self {
            // Compiled once; the pattern is a literal alternation
            event_re: Regex::new(r"GESTURE_(SWIPE|PINCH|HOLD)_(BEGIN|UPDATE|END)")
                .expect("static gesture pattern compiles"),
        }
    }

    /// Parse one line; `None` for anything that is not a well-formed
    /// gesture event
    pub fn parse_line(&self, line: &str) -> Option<MotionSample> {
        let caps = self.event_re.captures(line)?;
        let kind = match &caps[1] {
            "SWIPE" => GestureKind::Swipe,
            "PINCH" => GestureKind::Pinch,
            _ => GestureKind::Hold,
        };
        let mut phase = match &caps[2] {
            "BEGIN" => Phase::Begin,
            "UPDATE" => Phase::Update,
            _ => Phase::End,
        };

        // <device> <event-name> <time> <fingers> [delta...]
        let mut fields = line.split_whitespace();
        let _device = fields.next()?;
        let _event_name = fields.next()?;
        let timestamp = parse_time(fields.next()?)?;
        let finger_count: u8 = fields.next()?.parse().ok()?;

        let rest: Vec<&str> = fields.collect();
        if kind == GestureKind::Hold && phase == Phase::End && rest.first() == Some(&"cancelled") {
            phase = Phase::Cancelled;
        }

        let delta = parse_delta(&rest);
        Some(MotionSample::new(kind, phase, finger_count, delta, timestamp))
    }
}

impl Default for LibinputGestureParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `+2.073s` → 2.073
fn parse_time(raw: &str) -> Option<f64> {
    raw.trim_start_matches('+')
        .trim_end_matches('s')
        .parse()
        .ok()
}

/// Positional delta fields after stripping the `/ ( )` separators:
/// `dx dy (dx_raw dy_raw unaccelerated) [zoom @ rotation]`
fn parse_delta(rest: &[&str]) -> Delta {
    let joined = rest.join(" ");
    let cleaned = joined.replace(['/', '(', ')'], " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let num = |idx: usize| -> f64 {
        tokens
            .get(idx)
            .and_then(|t| t.parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    Delta {
        dx: num(0),
        dy: num(1),
        dx_raw: num(2),
        dy_raw: num(3),
        zoom: num(5),
        rotation: num(7),
    }
}
