//! Snapshot capture: rasterizing a finished text layout.
//!
//! Once a typewriter completes, its per-element view tree is replaced by a
//! single pre-rendered buffer so rendering cost stays O(1) in text length.
//! The capture capability is a trait; the engine depends on it but the
//! backend decides what a "bitmap" is. For the terminal it is a ratatui
//! `Buffer` of styled cells.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use vellum_core::geometry::Size;

use crate::events::ColorScheme;

/// One text run positioned by the layout engine, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub glyph: String,
    pub x: f32,
    pub y: f32,
}

/// A rasterized bitmap of a fully-revealed text layout, plus the conditions
/// it was rendered under. Replaced wholesale on re-capture, never mutated.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub buffer: Buffer,
    pub scale: f32,
    pub scheme: ColorScheme,
}

/// Capability to rasterize positioned text runs into a [`Snapshot`].
pub trait Rasterizer {
    fn rasterize(&self, glyphs: &[PositionedGlyph], size: Size, scheme: ColorScheme) -> Snapshot;
}

/// Foreground color for body text under a scheme.
pub fn foreground(scheme: ColorScheme) -> Color {
    match scheme {
        ColorScheme::Dark => Color::White,
        ColorScheme::Light => Color::Black,
    }
}

/// Rasterizes into a cell buffer, one glyph per layout unit.
#[derive(Clone, Copy, Debug)]
pub struct BufferRasterizer {
    /// Recorded on each snapshot; always 1.0 for cell-based terminals.
    pub scale: f32,
}

impl Default for BufferRasterizer {
    fn default() -> Self {
        BufferRasterizer { scale: 1.0 }
    }
}

impl Rasterizer for BufferRasterizer {
    fn rasterize(&self, glyphs: &[PositionedGlyph], size: Size, scheme: ColorScheme) -> Snapshot {
        let width = size.width.ceil().max(0.0) as u16;
        let height = size.height.ceil().max(0.0) as u16;
        let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
        let style = Style::default().fg(foreground(scheme));

        for glyph in glyphs {
            let x = glyph.x.round();
            let y = glyph.y.round();
            if x < 0.0 || y < 0.0 || x >= f32::from(width) || y >= f32::from(height) {
                continue;
            }
            buffer.set_string(x as u16, y as u16, &glyph.glyph, style);
        }

        Snapshot {
            buffer,
            scale: self.scale,
            scheme,
        }
    }
}
