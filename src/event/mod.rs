//! Motion samples and the per-pipeline gesture buffer

pub mod buffer;
pub mod types;

pub use buffer::GestureBuffer;
pub use types::{Delta, GestureKind, MotionSample, Phase};
