//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds for the shot cooldown)
//! - Input (held keys sampled into a per-frame snapshot)

pub mod input;
pub mod time;

pub use input::{InputSource, KeyState};
pub use time::{Clock, ManualClock, SystemClock};
