//! # Framebuffer Graphics Module
//!
//! Access to a Linux fbdev node and drawing into its mapped memory.
//!
//! ## Modules
//!
//! - `device`: `FramebufferDevice` (open, screen-info queries, mode restore) and `Mapping`
//! - `ioctl`: `fb_var_screeninfo` / `fb_fix_screeninfo` layouts and the raw control calls
//! - `framebuffer`: `Geometry`, the `PixelFormat` encoders and the `Canvas` pixel sink
//! - `color`: `Color` type and the default 16-color palette
//!
//! ## Pixel Formats
//!
//! | bpp | offset            | bytes                  |
//! |-----|-------------------|------------------------|
//! | 8   | `x + y*stride`    | palette index          |
//! | 16  | `x*2 + y*stride`  | RGB565, little-endian  |
//! | 24  | `x*3 + y*stride`  | B, G, R                |
//! | 32  | `x*4 + y*stride`  | 255, B, G, R           |
//!
//! The format is picked once from the bit depth; everything above the
//! `Canvas` draws through `embedded_graphics::DrawTarget` and never branches
//! on depth again.

pub mod color;
pub mod device;
pub mod framebuffer;
pub mod ioctl;
