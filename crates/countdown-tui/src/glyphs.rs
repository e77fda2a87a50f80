//! Block-digit font and glyph blocks.
//!
//! A `GlyphBlock` is a left-to-right run of `Symbol`s. Clock symbols come
//! from a fixed 5-row font whose trailing blank columns act as the gap
//! between glyphs; the title is a single one-row symbol. Block dimensions
//! depend only on the characters rendered.

use std::borrow::Cow;

use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ZERO: &[&str] = &[
    "██████  ",
    "██  ██  ",
    "██  ██  ",
    "██  ██  ",
    "██████  ",
];
const ONE: &[&str] = &[
    "    ██  ",
    "    ██  ",
    "    ██  ",
    "    ██  ",
    "    ██  ",
];
const TWO: &[&str] = &[
    "██████  ",
    "    ██  ",
    "██████  ",
    "██      ",
    "██████  ",
];
const THREE: &[&str] = &[
    "██████  ",
    "    ██  ",
    "██████  ",
    "    ██  ",
    "██████  ",
];
const FOUR: &[&str] = &[
    "██  ██  ",
    "██  ██  ",
    "██████  ",
    "    ██  ",
    "    ██  ",
];
const FIVE: &[&str] = &[
    "██████  ",
    "██      ",
    "██████  ",
    "    ██  ",
    "██████  ",
];
const SIX: &[&str] = &[
    "██████  ",
    "██      ",
    "██████  ",
    "██  ██  ",
    "██████  ",
];
const SEVEN: &[&str] = &[
    "██████  ",
    "    ██  ",
    "    ██  ",
    "    ██  ",
    "    ██  ",
];
const EIGHT: &[&str] = &[
    "██████  ",
    "██  ██  ",
    "██████  ",
    "██  ██  ",
    "██████  ",
];
const NINE: &[&str] = &[
    "██████  ",
    "██  ██  ",
    "██████  ",
    "    ██  ",
    "██████  ",
];
const COLON: &[&str] = &[
    "    ",
    "██  ",
    "    ",
    "██  ",
    "    ",
];
// Shown when a count-down overshoots zero.
const MINUS: &[&str] = &[
    "        ",
    "        ",
    "██████  ",
    "        ",
    "        ",
];
const BLANK: &[&str] = &[
    "        ",
    "        ",
    "        ",
    "        ",
    "        ",
];

/// Row count shared by every font glyph.
pub const GLYPH_HEIGHT: usize = 5;

fn font_glyph(ch: char) -> &'static [&'static str] {
    match ch {
        '0' => ZERO,
        '1' => ONE,
        '2' => TWO,
        '3' => THREE,
        '4' => FOUR,
        '5' => FIVE,
        '6' => SIX,
        '7' => SEVEN,
        '8' => EIGHT,
        '9' => NINE,
        ':' => COLON,
        '-' => MINUS,
        _ => BLANK,
    }
}

/// One drawable symbol: a rectangle of text rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    rows: Vec<Cow<'static, str>>,
}

impl Symbol {
    fn from_font(rows: &'static [&'static str]) -> Self {
        Self {
            rows: rows.iter().map(|row| Cow::Borrowed(*row)).collect(),
        }
    }

    fn line(text: &str) -> Self {
        Self {
            rows: vec![Cow::Owned(text.to_string())],
        }
    }

    /// Width in terminal columns (widest row).
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.width()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(AsRef::as_ref)
    }
}

/// A horizontal run of symbols drawn from a common origin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphBlock {
    symbols: Vec<Symbol>,
}

impl GlyphBlock {
    /// Builds the block-digit rendering of a formatted clock string.
    pub fn render(text: &str) -> Self {
        Self {
            symbols: text
                .chars()
                .map(|ch| Symbol::from_font(font_glyph(ch)))
                .collect(),
        }
    }

    /// Builds a single-row block holding `text` verbatim.
    pub fn title(text: &str) -> Self {
        Self {
            symbols: vec![Symbol::line(text)],
        }
    }

    /// Sum of the symbol widths.
    pub fn width(&self) -> usize {
        self.symbols.iter().map(Symbol::width).sum()
    }

    /// Row count of the tallest symbol.
    pub fn height(&self) -> usize {
        self.symbols.iter().map(Symbol::height).max().unwrap_or(0)
    }

    /// Writes the block into `buf` with its top-left corner at (`x`, `y`).
    ///
    /// Cells outside the buffer are skipped, so a block may hang off any edge.
    pub fn draw(&self, buf: &mut Buffer, x: i32, y: i32, style: Style) {
        let mut left = x;
        for symbol in &self.symbols {
            for (dy, row) in symbol.rows().enumerate() {
                let mut cx = left;
                for ch in row.chars() {
                    put_char(buf, cx, y + dy as i32, ch, style);
                    cx += ch.width().unwrap_or(0) as i32;
                }
            }
            left += symbol.width() as i32;
        }
    }
}

fn put_char(buf: &mut Buffer, x: i32, y: i32, ch: char, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
        cell.set_char(ch).set_style(style);
    }
}
