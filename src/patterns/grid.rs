//! Blue background, white grid every 10 pixels, red diagonal from the top-left.
use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::devices::framebuffer::color::Color;

pub const SPACING: usize = 10;

pub fn draw<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    let Size { width, height } = target.bounding_box().size;

    target.clear(Color::BLUE)?;

    for y in (0..height).step_by(SPACING) {
        let row = Rectangle::new(Point::new(0, y as i32), Size::new(width, 1));
        target.fill_solid(&row, Color::WHITE)?;
    }

    for x in (0..width).step_by(SPACING) {
        let column = Rectangle::new(Point::new(x as i32, 0), Size::new(1, height));
        target.fill_solid(&column, Color::WHITE)?;
    }

    // Smaller extent, in case of a portrait display.
    let n = width.min(height) as i32;
    target.draw_iter((0..n).map(|i| Pixel(Point::new(i, i), Color::RED)))
}
