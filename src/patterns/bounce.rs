//! Bouncing square animation.
//!
//! Every frame clears the whole screen to grey (no dirty rectangles), draws a
//! white square of side `h/10` and moves it one pixel per axis. When the
//! square would leave the screen the velocity on that axis is reversed and
//! the position pulled back by two steps.
use embedded_graphics::{prelude::*, primitives::Rectangle};

use crate::devices::framebuffer::color::Color;
use crate::runtime::signal::CancelToken;
use crate::runtime::timer::FrameClock;

pub const BACKGROUND: Color = Color::GREY;
pub const FOREGROUND: Color = Color::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bouncer {
    pub position: Point,
    pub velocity: Point,
    side: u32,
    max: Point,
}

impl Bouncer {
    pub fn new(screen: Size) -> Self {
        let side = screen.height / 10;
        let max = Point::new(
            screen.width.saturating_sub(side) as i32,
            screen.height.saturating_sub(side) as i32,
        );

        Self {
            position: Point::zero(),
            velocity: Point::new(1, 1),
            side,
            max,
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Largest valid top-left corner.
    pub fn max(&self) -> Point {
        self.max
    }

    pub fn square(&self) -> Rectangle {
        Rectangle::new(self.position, Size::new_equal(self.side))
    }

    pub fn step(&mut self) {
        step_axis(&mut self.position.x, &mut self.velocity.x, self.max.x);
        step_axis(&mut self.position.y, &mut self.velocity.y, self.max.y);
    }
}

fn step_axis(pos: &mut i32, vel: &mut i32, max: i32) {
    *pos += *vel;
    if *pos < 0 || *pos > max {
        *vel = -*vel;
        *pos += 2 * *vel;
    }
    // Only matters when the square is as wide as the screen.
    *pos = (*pos).clamp(0, max);
}

/// Run up to `frames` frames; returns how many were drawn before cancellation.
pub fn run<D>(
    target: &mut D,
    frames: u32,
    clock: &mut FrameClock,
    cancel: &CancelToken,
) -> Result<u32, D::Error>
where
    D: DrawTarget<Color = Color>,
{
    let mut bouncer = Bouncer::new(target.bounding_box().size);

    for frame in 0..frames {
        if cancel.is_cancelled() {
            return Ok(frame);
        }

        target.clear(BACKGROUND)?;
        target.fill_solid(&bouncer.square(), FOREGROUND)?;
        bouncer.step();

        clock.wait();
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::framebuffer::framebuffer::{Canvas, Geometry, Indexed8};
    use std::sync::atomic::AtomicBool;

    fn in_bounds(b: &Bouncer) -> bool {
        (0..=b.max().x).contains(&b.position.x) && (0..=b.max().y).contains(&b.position.y)
    }

    #[test]
    fn test_initial_state() {
        let b = Bouncer::new(Size::new(320, 240));
        assert_eq!(b.position, Point::zero());
        assert_eq!(b.velocity, Point::new(1, 1));
        assert_eq!(b.side(), 24);
        assert_eq!(b.max(), Point::new(296, 216));
    }

    #[test]
    fn test_stays_in_bounds_for_1000_frames() {
        for size in [Size::new(320, 240), Size::new(100, 100), Size::new(64, 480)] {
            let mut b = Bouncer::new(size);
            for _ in 0..1000 {
                b.step();
                assert!(in_bounds(&b), "{:?} out of bounds for {:?}", b.position, size);
            }
        }
    }

    #[test]
    fn test_flips_once_per_wall() {
        let mut b = Bouncer::new(Size::new(100, 100));
        let max = b.max().x;
        let mut flips = 0;
        let mut prev = b;

        for _ in 0..1000 {
            b.step();
            if b.velocity.x != prev.velocity.x {
                flips += 1;
                // The flip happens exactly on the step that would cross a wall.
                let attempted = prev.position.x + prev.velocity.x;
                assert!(attempted < 0 || attempted > max);
                // ...and never twice in a row.
                let mut next = b;
                next.step();
                assert_eq!(next.velocity.x, b.velocity.x);
            }
            prev = b;
        }

        // max = 90: walls hit at steps 91, 181, ... (every 90 after the first).
        assert_eq!(flips, 11);
    }

    #[test]
    fn test_bounce_back_position() {
        let mut b = Bouncer::new(Size::new(100, 100));
        b.position = Point::new(90, 90);
        b.step();
        assert_eq!(b.position, Point::new(89, 89));
        assert_eq!(b.velocity, Point::new(-1, -1));

        b.position = Point::new(0, 0);
        b.step();
        assert_eq!(b.position, Point::new(1, 1));
        assert_eq!(b.velocity, Point::new(1, 1));
    }

    #[test]
    fn test_run_draws_and_honors_cancel() {
        let geometry = Geometry {
            width: 40,
            height: 30,
            bits_per_pixel: 8,
            stride: 40,
        };
        let mut buf = vec![0u8; 40 * 30];
        let flag: &'static AtomicBool = Box::leak(Box::new(AtomicBool::new(false)));
        let cancel = CancelToken::new(flag);
        let mut clock = FrameClock::new(1000);

        let drawn = run(
            &mut Canvas::<Indexed8>::new(&mut buf, &geometry),
            3,
            &mut clock,
            &cancel,
        )
        .unwrap();
        assert_eq!(drawn, 3);

        // Third frame drew the 3x3 square at (2, 2) on grey.
        assert_eq!(buf[2 + 2 * 40], 15);
        assert_eq!(buf[4 + 4 * 40], 15);
        assert_eq!(buf[1 + 40], 8);
        assert_eq!(buf[5 + 5 * 40], 8);

        cancel.cancel();
        let drawn = run(
            &mut Canvas::<Indexed8>::new(&mut buf, &geometry),
            3,
            &mut clock,
            &cancel,
        )
        .unwrap();
        assert_eq!(drawn, 0);
    }
}
