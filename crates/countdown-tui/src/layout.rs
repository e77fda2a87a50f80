//! Screen placement for the clock and title.

use crate::glyphs::GlyphBlock;

/// Top-left draw positions for the clock and title blocks.
///
/// Coordinates may be negative when a block is larger than the terminal;
/// drawing clips whatever falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOrigin {
    pub clock_x: i32,
    pub clock_y: i32,
    pub title_x: i32,
    pub title_y: i32,
}

impl LayoutOrigin {
    /// Centers the clock and places the title above it, two title-heights up.
    pub fn compute(width: u16, height: u16, clock: &GlyphBlock, title: &GlyphBlock) -> Self {
        let (w, h) = (i32::from(width), i32::from(height));
        let clock_w = clock.width() as i32;
        let clock_h = clock.height() as i32;
        let title_w = title.width() as i32;
        let title_h = title.height() as i32;

        Self {
            clock_x: w / 2 - clock_w / 2,
            clock_y: h / 2 - clock_h / 2,
            title_x: w / 2 - title_w / 2,
            title_y: h / 2 - 2 * title_h - clock_h / 2,
        }
    }
}
