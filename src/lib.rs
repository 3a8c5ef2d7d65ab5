//! # fbtest
//!
//! Draws fixed test patterns straight into a Linux framebuffer to check
//! resolution, bit depth and pixel layout on real display hardware.
//!
//! ## Modules
//!
//! - `devices::framebuffer`: device lifecycle, screen-info ioctls, pixel sinks
//! - `patterns`: gradient, stripes, grid and bounce animation
//! - `runtime`: frame clock and signal-driven cancellation
//! - `config`: build-time run settings
//! - `error`: `FbError`

pub mod config;
pub mod devices;
pub mod error;
pub mod patterns;
pub mod runtime;
