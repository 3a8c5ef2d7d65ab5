//! Process-level plumbing: frame pacing, signal-driven cancellation, logging.

pub mod logging;
pub mod signal;
pub mod timer;
