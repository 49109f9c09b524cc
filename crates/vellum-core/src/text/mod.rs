//! Text segmentation and the multiline layout engine.

pub mod layout;
pub mod range;

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into its displayable elements (extended grapheme clusters).
///
/// All offsets in this crate — word ranges, reveal delays, placed element
/// indices — index into this sequence.
pub fn elements(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Whether a single element counts as whitespace for tokenization.
pub fn is_whitespace_element(element: &str) -> bool {
    !element.is_empty() && element.chars().all(char::is_whitespace)
}
