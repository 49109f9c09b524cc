//! Typewriter reveal controllers: single text and paragraph stack.

pub mod stack;
pub mod state;

pub use stack::TypewriterStackState;
pub use state::{Phase, TypewriterState};
use unicode_width::UnicodeWidthStr;
use vellum_core::geometry::Size;

/// Natural size of one text element in terminal cells.
pub fn element_size(element: &str) -> Size {
    Size::new(element.width() as f32, 1.0)
}
