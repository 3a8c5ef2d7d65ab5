//! Build-time run settings: device, pattern and animation timing.

use std::path::PathBuf;
use std::time::Duration;

/// Which test pattern to render. Exactly one runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Tri-color radial blend around three anchors.
    GradientCircle,
    /// 16 vertical palette bands across the top half.
    Stripes,
    /// Blue background, white 10px grid, red diagonal.
    Grid,
    /// White square bouncing on grey.
    Bounce,
}

/// Run settings. Chosen at build time; there are no flags or config files.
#[derive(Debug, Clone)]
pub struct Config {
    pub device: PathBuf,
    pub pattern: Pattern,
    /// Animation frame rate.
    pub fps: u32,
    /// Animation length in seconds.
    pub secs: u32,
    /// How long the final image stays up before the mode is restored.
    pub hold: Duration,
    /// Switch to this depth before mapping (e.g. 8 to exercise the palette path).
    pub requested_depth: Option<u32>,
}

impl Config {
    pub fn frames(&self) -> u32 {
        self.fps.saturating_mul(self.secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/fb0"),
            pattern: Pattern::Bounce,
            fps: 100,
            secs: 10,
            hold: Duration::from_secs(5),
            requested_depth: None,
        }
    }
}
