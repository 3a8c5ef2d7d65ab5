//! Color representation and the default 16-color console palette
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics_core::pixelcolor::PixelColor;

/// Default framebuffer palette, indexed by `Color::Index`.
#[rustfmt::skip]
pub const PALETTE: [(u8, u8, u8); 16] = [
    (  0,   0,   0), // BLACK
    (  0,   0, 172), // BLUE
    (  0, 168,   0), // GREEN
    (  0, 168, 168), // CYAN
    (172,   0,   0), // RED
    (172,   0, 172), // PURPLE
    (172,  84,   0), // ORANGE
    (168, 168, 168), // LTGREY
    ( 84,  84,  84), // GREY
    ( 84,  84, 255), // LIGHT_BLUE
    ( 84, 255,  84), // LIGHT_GREEN
    ( 84, 255, 255), // LIGHT_CYAN
    (255,  84,  84), // LIGHT_RED
    (255,  84, 255), // LIGHT_PURPLE
    (255, 255,  84), // YELLOW
    (255, 255, 255), // WHITE
];

/// A color as handed to a pixel sink: either a palette index or a true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Index(u8),
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const BLACK: Color = Color::Index(0);
    pub const BLUE: Color = Color::Index(1);
    pub const GREEN: Color = Color::Index(2);
    pub const CYAN: Color = Color::Index(3);
    pub const RED: Color = Color::Index(4);
    pub const PURPLE: Color = Color::Index(5);
    pub const ORANGE: Color = Color::Index(6);
    pub const LTGREY: Color = Color::Index(7);
    pub const GREY: Color = Color::Index(8);
    pub const LIGHT_BLUE: Color = Color::Index(9);
    pub const LIGHT_GREEN: Color = Color::Index(10);
    pub const LIGHT_CYAN: Color = Color::Index(11);
    pub const LIGHT_RED: Color = Color::Index(12);
    pub const LIGHT_PURPLE: Color = Color::Index(13);
    pub const YELLOW: Color = Color::Index(14);
    pub const WHITE: Color = Color::Index(15);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    pub const fn indexed(index: u8) -> Self {
        Color::Index(index)
    }

    /// Resolve to a true color. Palette indices wrap at 16.
    pub fn to_rgb888(self) -> Rgb888 {
        let (r, g, b) = match self {
            Color::Index(i) => PALETTE[(i & 0x0F) as usize],
            Color::Rgb { r, g, b } => (r, g, b),
        };
        Rgb888::new(r, g, b)
    }

    /// Resolve to a palette index, picking the nearest entry for true colors.
    pub fn to_index(self) -> u8 {
        match self {
            Color::Index(i) => i,
            Color::Rgb { r, g, b } => nearest_index(r, g, b),
        }
    }
}

impl PixelColor for Color {
    type Raw = ();
}

// Ties go to the lowest index.
fn nearest_index(r: u8, g: u8, b: u8) -> u8 {
    let dist = |&(pr, pg, pb): &(u8, u8, u8)| {
        let dr = pr as i32 - r as i32;
        let dg = pg as i32 - g as i32;
        let db = pb as i32 - b as i32;
        dr * dr + dg * dg + db * db
    };

    PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| dist(entry))
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}
