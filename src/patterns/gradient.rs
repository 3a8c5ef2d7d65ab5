//! Tri-color radial gradient.
//!
//! Three anchors sit on the row `y = h/3`, at `x = h/3`, `h/3 + h/4` and
//! `h/3 + h/2`. Each channel falls off linearly with the (integer) distance
//! to its anchor: `max(0, 255 - 256*d/r)` with `r = h/3`.
use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::devices::framebuffer::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    radius: i64,
    red: Point,
    green: Point,
    blue: Point,
}

impl Gradient {
    /// `None` when the screen is too short for a non-zero radius.
    pub fn new(height: u32) -> Option<Self> {
        let h = height as i32;
        let cr = h / 3;
        if cr == 0 {
            return None;
        }
        let cg = cr + h / 4;
        let cb = cg + h / 4;

        Some(Self {
            radius: cr as i64,
            red: Point::new(cr, cr),
            green: Point::new(cg, cr),
            blue: Point::new(cb, cr),
        })
    }

    pub fn anchors(&self) -> [Point; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn channels_at(&self, p: Point) -> (u8, u8, u8) {
        (
            self.intensity(self.red, p),
            self.intensity(self.green, p),
            self.intensity(self.blue, p),
        )
    }

    pub fn color_at(&self, p: Point) -> Color {
        let (r, g, b) = self.channels_at(p);
        Color::new(r, g, b)
    }

    fn intensity(&self, anchor: Point, p: Point) -> u8 {
        let dx = (anchor.x - p.x) as i64;
        let dy = (anchor.y - p.y) as i64;
        let d = libm::sqrt((dx * dx + dy * dy) as f64) as i64;
        (255 - 256 * d / self.radius).max(0) as u8
    }
}

pub fn draw<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    let area: Rectangle = target.bounding_box();
    let Some(gradient) = Gradient::new(area.size.height) else {
        return Ok(());
    };

    target.fill_contiguous(&area, area.points().map(|p| gradient.color_at(p)))
}
