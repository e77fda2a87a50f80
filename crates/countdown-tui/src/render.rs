//! Pure view/render functions for the clock.
//!
//! Rendering reads the session and writes cells into the frame. Layout is
//! resolved by the caller (see `Session::origin`) so this stays free of
//! mutation.

use ratatui::Frame;

use crate::glyphs::GlyphBlock;
use crate::layout::LayoutOrigin;
use crate::state::Session;

/// Draws the title and clock blocks at `origin`.
pub fn render(frame: &mut Frame, session: &Session, clock: &GlyphBlock, origin: LayoutOrigin) {
    let buf = frame.buffer_mut();
    session
        .title()
        .draw(buf, origin.title_x, origin.title_y, session.theme.title);
    clock.draw(buf, origin.clock_x, origin.clock_y, session.theme.clock);
}
