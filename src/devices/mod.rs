//! Device Subsystem
//!
//! - `framebuffer`: Linux fbdev access and pixel sinks over mapped video memory

pub mod framebuffer;
