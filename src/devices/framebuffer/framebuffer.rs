//! Pixel sinks over a mapped framebuffer, one per pixel format
use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_graphics::{pixelcolor::RgbColor, prelude::*, primitives::Rectangle};

use super::color::Color;
use super::ioctl::{FbFixScreenInfo, FbVarScreenInfo};
use crate::error::FbError;

/// Screen layout as reported by the driver. Immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub bits_per_pixel: u32,
    /// Bytes per row, may include padding.
    pub stride: usize,
}

impl Geometry {
    pub fn from_screen_info(var: &FbVarScreenInfo, fix: &FbFixScreenInfo) -> Self {
        Self {
            width: var.xres as usize,
            height: var.yres as usize,
            bits_per_pixel: var.bits_per_pixel,
            stride: fix.line_length as usize,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel as usize + 7) / 8
    }

    /// Check that a buffer of `len` bytes can hold every pixel of this layout.
    pub fn validate(&self, len: usize) -> Result<(), FbError> {
        if !matches!(self.bits_per_pixel, 8 | 16 | 24 | 32) {
            return Err(FbError::UnsupportedDepth(self.bits_per_pixel));
        }

        let row_bytes = self.width * self.bytes_per_pixel();
        if self.stride < row_bytes {
            return Err(FbError::StrideTooSmall {
                stride: self.stride,
                row_bytes,
            });
        }

        let needed = self.stride * self.height;
        if len < needed {
            return Err(FbError::BufferTooSmall { needed, len });
        }
        Ok(())
    }
}

/// Byte encoding of one pixel.
pub trait PixelFormat {
    const BYTES_PER_PIXEL: usize;

    /// Write `color` into `out`, which is exactly `BYTES_PER_PIXEL` long.
    fn encode(color: Color, out: &mut [u8]);
}

/// 8bpp palette index.
pub struct Indexed8;

/// 16bpp packed 5-6-5, little-endian.
pub struct Rgb565;

/// 24bpp, stored B, G, R.
pub struct Bgr888;

/// 32bpp, stored A (always 255), B, G, R.
pub struct Abgr8888;

impl PixelFormat for Indexed8 {
    const BYTES_PER_PIXEL: usize = 1;

    fn encode(color: Color, out: &mut [u8]) {
        out[0] = color.to_index();
    }
}

impl Rgb565 {
    pub const fn pack(r: u8, g: u8, b: u8) -> u16 {
        ((r as u16 / 8) << 11) | ((g as u16 / 4) << 5) | (b as u16 / 8)
    }
}

impl PixelFormat for Rgb565 {
    const BYTES_PER_PIXEL: usize = 2;

    fn encode(color: Color, out: &mut [u8]) {
        let c = color.to_rgb888();
        out.copy_from_slice(&Self::pack(c.r(), c.g(), c.b()).to_le_bytes());
    }
}

impl PixelFormat for Bgr888 {
    const BYTES_PER_PIXEL: usize = 3;

    fn encode(color: Color, out: &mut [u8]) {
        let c = color.to_rgb888();
        out[0] = c.b();
        out[1] = c.g();
        out[2] = c.r();
    }
}

impl PixelFormat for Abgr8888 {
    const BYTES_PER_PIXEL: usize = 4;

    fn encode(color: Color, out: &mut [u8]) {
        let c = color.to_rgb888();
        out[0] = 255;
        out[1] = c.b();
        out[2] = c.g();
        out[3] = c.r();
    }
}

/// Drawing context over a raw framebuffer for a single pixel format.
pub struct Canvas<'a, F> {
    buffer: &'a mut [u8],
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    _format: PhantomData<F>,
}

impl<'a, F: PixelFormat> Canvas<'a, F> {
    pub fn new(buffer: &'a mut [u8], geometry: &Geometry) -> Self {
        Self {
            buffer,
            width: geometry.width,
            height: geometry.height,
            stride: geometry.stride,
            _format: PhantomData,
        }
    }

    /// Plot one pixel. Coordinates outside the screen are ignored.
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        let offset = x * F::BYTES_PER_PIXEL + y * self.stride;
        if let Some(px) = self.buffer.get_mut(offset..offset + F::BYTES_PER_PIXEL) {
            F::encode(color, px);
        }
    }

    /// Fill columns `x0..x1` of row `y`, encoding the color once.
    fn fill_span(&mut self, y: usize, x0: usize, x1: usize, color: Color) {
        let mut encoded = [0u8; 4];
        let encoded = &mut encoded[..F::BYTES_PER_PIXEL];
        F::encode(color, encoded);

        let start = y * self.stride + x0 * F::BYTES_PER_PIXEL;
        let end = y * self.stride + x1 * F::BYTES_PER_PIXEL;
        if let Some(row) = self.buffer.get_mut(start..end) {
            for px in row.chunks_exact_mut(F::BYTES_PER_PIXEL) {
                px.copy_from_slice(encoded);
            }
        }
    }
}

impl<F: PixelFormat> DrawTarget for Canvas<'_, F> {
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            self.put_pixel(x as usize, y as usize, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }

        let x0 = area.top_left.x as usize;
        let x1 = x0 + area.size.width as usize;
        let y0 = area.top_left.y as usize;
        for y in y0..y0 + area.size.height as usize {
            self.fill_span(y, x0, x1, color);
        }
        Ok(())
    }
}

impl<F> OriginDimensions for Canvas<'_, F> {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 8;
    const H: usize = 4;
    const STRIDE: usize = 40;

    fn geometry(bpp: u32) -> Geometry {
        Geometry {
            width: W,
            height: H,
            bits_per_pixel: bpp,
            stride: STRIDE,
        }
    }

    fn changed(buf: &[u8]) -> Vec<usize> {
        buf.iter()
            .enumerate()
            .filter(|(_, &b)| b != 0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_indexed8_layout() {
        let mut buf = vec![0u8; STRIDE * H];
        Canvas::<Indexed8>::new(&mut buf, &geometry(8)).put_pixel(3, 2, Color::WHITE);
        assert_eq!(changed(&buf), vec![3 + 2 * STRIDE]);
        assert_eq!(buf[3 + 2 * STRIDE], 15);
    }

    #[test]
    fn test_rgb565_layout() {
        let mut buf = vec![0u8; STRIDE * H];
        Canvas::<Rgb565>::new(&mut buf, &geometry(16)).put_pixel(3, 2, Color::new(255, 0, 0));
        let offset = 3 * 2 + 2 * STRIDE;
        assert_eq!(changed(&buf), vec![offset + 1]);
        assert_eq!(u16::from_le_bytes([buf[offset], buf[offset + 1]]), 0xF800);
    }

    #[test]
    fn test_rgb565_packing() {
        assert_eq!(Rgb565::pack(255, 0, 0), 0xF800);
        assert_eq!(Rgb565::pack(0, 255, 0), 0x07E0);
        assert_eq!(Rgb565::pack(0, 0, 255), 0x001F);
        assert_eq!(Rgb565::pack(255, 255, 255), 0xFFFF);
    }

    #[test]
    fn test_bgr888_layout() {
        let mut buf = vec![0u8; STRIDE * H];
        Canvas::<Bgr888>::new(&mut buf, &geometry(24)).put_pixel(3, 2, Color::new(1, 2, 3));
        let offset = 3 * 3 + 2 * STRIDE;
        assert_eq!(changed(&buf), vec![offset, offset + 1, offset + 2]);
        assert_eq!(&buf[offset..offset + 3], &[3, 2, 1]);
    }

    #[test]
    fn test_abgr8888_layout() {
        let mut buf = vec![0u8; STRIDE * H];
        Canvas::<Abgr8888>::new(&mut buf, &geometry(32)).put_pixel(3, 2, Color::new(1, 2, 3));
        let offset = 3 * 4 + 2 * STRIDE;
        assert_eq!(changed(&buf), vec![offset, offset + 1, offset + 2, offset + 3]);
        assert_eq!(&buf[offset..offset + 4], &[255, 3, 2, 1]);
    }

    #[test]
    fn test_plot_is_idempotent() {
        let mut once = vec![0u8; STRIDE * H];
        let mut twice = vec![0u8; STRIDE * H];
        Canvas::<Abgr8888>::new(&mut once, &geometry(32)).put_pixel(1, 1, Color::CYAN);
        let mut canvas = Canvas::<Abgr8888>::new(&mut twice, &geometry(32));
        canvas.put_pixel(1, 1, Color::CYAN);
        canvas.put_pixel(1, 1, Color::CYAN);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut buf = vec![0u8; STRIDE * H];
        let mut canvas = Canvas::<Indexed8>::new(&mut buf, &geometry(8));
        canvas.put_pixel(W, 0, Color::WHITE);
        canvas.put_pixel(0, H, Color::WHITE);
        canvas
            .draw_iter([Pixel(Point::new(-1, 0), Color::WHITE)])
            .unwrap();
        assert!(changed(&buf).is_empty());
    }

    #[test]
    fn test_fill_solid_clips_and_skips_padding() {
        let mut buf = vec![0u8; STRIDE * H];
        let mut canvas = Canvas::<Rgb565>::new(&mut buf, &geometry(16));
        canvas
            .fill_solid(
                &Rectangle::new(Point::new(-2, -2), Size::new(100, 100)),
                Color::WHITE,
            )
            .unwrap();
        for y in 0..H {
            let row = &buf[y * STRIDE..(y + 1) * STRIDE];
            assert!(row[..W * 2].iter().all(|&b| b == 0xFF));
            assert!(row[W * 2..].iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_clear_covers_screen() {
        let mut buf = vec![0u8; STRIDE * H];
        Canvas::<Indexed8>::new(&mut buf, &geometry(8))
            .clear(Color::GREY)
            .unwrap();
        assert_eq!(buf.iter().filter(|&&b| b == 8).count(), W * H);
    }

    #[test]
    fn test_validate() {
        assert!(geometry(16).validate(STRIDE * H).is_ok());
        assert!(matches!(
            geometry(16).validate(STRIDE * H - 1),
            Err(FbError::BufferTooSmall { .. })
        ));
        assert!(matches!(
            geometry(12).validate(STRIDE * H),
            Err(FbError::UnsupportedDepth(12))
        ));

        let narrow = Geometry { stride: 10, ..geometry(32) };
        assert!(matches!(
            narrow.validate(STRIDE * H),
            Err(FbError::StrideTooSmall { stride: 10, row_bytes: 32 })
        ));
    }
}
