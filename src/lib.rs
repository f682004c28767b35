//! # gestured
//!
//! A touchpad gesture engine that turns a continuous stream of libinput
//! motion samples into discrete, debounced commands selected by a
//! hierarchical, user-defined rule table.
//!
//! ## Overview
//!
//! Raw `libinput debug-events` lines are parsed into motion samples. Each
//! sample is buffered per gesture kind, classified into directional,
//! fingered, phased gesture events, resolved against the rule tree, and
//! throttled by time-interval and cumulative-distance gates before the
//! configured command is dispatched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gestured::config::ConfigStore;
//! use gestured::executor::LogDispatcher;
//! use gestured::parser::LibinputGestureParser;
//! use gestured::pipeline::Pipeline;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ConfigStore::default());
//! let parser = LibinputGestureParser::new();
//! let mut pipeline = Pipeline::new(store, Box::new(LogDispatcher));
//!
//! let line = " event9  GESTURE_SWIPE_UPDATE +1.23s 3 12.34/ 0.42 (31.00/ 1.05 unaccelerated)";
//! if let Some(sample) = parser.parse_line(line) {
//!     pipeline.push_sample(sample);
//! }
//! ```
//!
//! ## Architecture
//!
//! The system is organized into the following modules:
//!
//! - [`event`]: Motion sample types and the per-pipeline gesture buffer
//! - [`config`]: Rule paths, the nested rule tree, and the memoized resolver
//! - [`detector`]: Per-gesture-kind classifiers (swipe, pinch, hold)
//! - [`executor`]: Interval/distance throttling and command dispatch
//! - [`parser`]: libinput debug-events line parsing
//! - [`pipeline`]: Per-device wiring of the above
//! - [`app`]: CLI and configuration-file management
//!
//! ## Event Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  libinput   │───▶│   Gesture   │───▶│  Detectors  │───▶│ Action Gate │
//! │   parser    │    │   buffer    │    │ (classify)  │    │ (throttle)  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                           ┌─────────────┐    ┌─────────────┐    ▼
//!                           │   Command   │◀───│    Rule     │◀───┘
//!                           │  dispatch   │    │  resolver   │
//!                           └─────────────┘    └─────────────┘
//! ```
//!
//! One pipeline instance exists per physical input device. Processing within
//! an instance is strictly sequential; the only shared state across
//! instances is the atomically swappable rule-tree snapshot.

pub mod app;
pub mod config;
pub mod detector;
pub mod event;
pub mod executor;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use config::{ConfigStore, RulePath, RuleTree};
pub use detector::{ClassifiedEvent, Direction, Trigger};
pub use event::{GestureKind, MotionSample, Phase};
pub use pipeline::Pipeline;

/// Result type alias for the gesture engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gesture engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
