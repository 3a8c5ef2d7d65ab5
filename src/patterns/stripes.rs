//! 16 vertical palette bands across the top half of the screen.
use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::devices::framebuffer::color::Color;

pub const BANDS: u32 = 16;

/// Palette index of the band containing column `x`.
pub fn band(x: u32, width: u32) -> u8 {
    (BANDS as u64 * x as u64 / width.max(1) as u64) as u8
}

pub fn draw<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    let Size { width, height } = target.bounding_box().size;
    let area = Rectangle::new(Point::zero(), Size::new(width, height / 2));

    target.fill_contiguous(
        &area,
        area.points().map(|p| Color::indexed(band(p.x as u32, width))),
    )
}
