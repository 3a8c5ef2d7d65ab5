//! Error types for framebuffer access and rendering.

use std::path::PathBuf;

/// Errors that can occur while acquiring, mapping or drawing to a framebuffer.
#[derive(Debug, thiserror::Error)]
pub enum FbError {
    /// The device node could not be opened (missing, busy, no permission).
    #[error("cannot open framebuffer device {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A screen-info control call was rejected by the driver.
    #[error("{request} failed: {source}")]
    Ioctl {
        request: &'static str,
        source: std::io::Error,
    },

    /// The device memory could not be mapped.
    #[error("failed to mmap {len} bytes: {source}")]
    Map { len: usize, source: std::io::Error },

    /// The active bit depth has no pixel sink.
    #[error("unsupported bit depth: {0}bpp")]
    UnsupportedDepth(u32),

    /// The mapping is shorter than `stride * height`.
    #[error("framebuffer too small: need {needed} bytes, mapped {len}")]
    BufferTooSmall { needed: usize, len: usize },

    /// A row of pixels does not fit in one line.
    #[error("line length {stride} shorter than a row of pixels ({row_bytes} bytes)")]
    StrideTooSmall { stride: usize, row_bytes: usize },
}
