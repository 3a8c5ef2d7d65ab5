//! # Test Patterns
//!
//! Each pattern is generic over an `embedded_graphics` `DrawTarget` whose
//! color is [`Color`], so it never looks at the bit depth. [`render`] picks the
//! pixel sink for the active depth once and runs the configured pattern on it.
//!
//! - `gradient`: tri-color radial blend
//! - `stripes`: 16 palette bands, top half
//! - `grid`: 10px white grid on blue with a red diagonal
//! - `bounce`: animated square, paced by a `FrameClock`

pub mod bounce;
pub mod gradient;
pub mod grid;
pub mod stripes;

use embedded_graphics::prelude::*;
use log::info;

use crate::config::{Config, Pattern};
use crate::devices::framebuffer::color::Color;
use crate::devices::framebuffer::framebuffer::{
    Abgr8888, Bgr888, Canvas, Geometry, Indexed8, PixelFormat, Rgb565,
};
use crate::error::FbError;
use crate::runtime::signal::CancelToken;
use crate::runtime::timer::FrameClock;

/// Draw the configured pattern into `buffer` laid out as `geometry`.
pub fn render(
    buffer: &mut [u8],
    geometry: &Geometry,
    config: &Config,
    cancel: &CancelToken,
) -> Result<(), FbError> {
    geometry.validate(buffer.len())?;

    match geometry.bits_per_pixel {
        8 => render_as::<Indexed8>(buffer, geometry, config, cancel),
        16 => render_as::<Rgb565>(buffer, geometry, config, cancel),
        24 => render_as::<Bgr888>(buffer, geometry, config, cancel),
        32 => render_as::<Abgr8888>(buffer, geometry, config, cancel),
        bpp => return Err(FbError::UnsupportedDepth(bpp)),
    }
    Ok(())
}

fn render_as<F: PixelFormat>(
    buffer: &mut [u8],
    geometry: &Geometry,
    config: &Config,
    cancel: &CancelToken,
) {
    let mut canvas = Canvas::<F>::new(buffer, geometry);
    run(&mut canvas, config, cancel).unwrap_or_else(|never| match never {});
}

/// Run one pattern on any sink.
pub fn run<D>(target: &mut D, config: &Config, cancel: &CancelToken) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    info!("Drawing {:?}", config.pattern);

    match config.pattern {
        Pattern::GradientCircle => gradient::draw(target),
        Pattern::Stripes => stripes::draw(target),
        Pattern::Grid => grid::draw(target),
        Pattern::Bounce => {
            let mut clock = FrameClock::new(config.fps);
            let frames = config.frames();
            let drawn = bounce::run(target, frames, &mut clock, cancel)?;
            info!("Animation finished after {}/{} frames", drawn, frames);
            Ok(())
        }
    }
}
