//! Word ranges: the tokenizer output the layout engine works with.

use crate::text;

/// An inclusive span `[lower, upper]` of element offsets identifying one
/// word: a non-whitespace run plus all immediately following whitespace.
///
/// Ranges produced by [`word_ranges`] are contiguous, ordered, and their
/// union covers the whole element sequence exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRange {
    pub lower: usize,
    pub upper: usize,
}

impl TextRange {
    pub fn new(lower: usize, upper: usize) -> TextRange {
        debug_assert!(lower <= upper);
        TextRange { lower, upper }
    }

    /// Number of elements covered. Inclusive bounds, so always at least 1.
    pub fn count(&self) -> usize {
        self.upper - self.lower + 1
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.lower <= offset && offset <= self.upper
    }

    /// Extends the range to a new upper bound while keeping its lower bound.
    /// A smaller upper bound leaves the range unchanged.
    pub fn extend_to(&self, upper: usize) -> TextRange {
        TextRange {
            lower: self.lower,
            upper: self.upper.max(upper),
        }
    }

    /// Offsets covered by this range, in order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + use<> {
        self.lower..=self.upper
    }
}

/// Tokenizes text into word ranges.
///
/// Trailing whitespace belongs to the preceding word, so wrapped lines never
/// start with a space. Whitespace at the very start of the text (which has no
/// preceding word) becomes its own range, keeping the round-trip property:
/// concatenating the covered substrings reproduces the input exactly.
pub fn word_ranges(text: &str) -> Vec<TextRange> {
    let elements = text::elements(text);
    let mut ranges = Vec::new();
    let mut offset = 0;

    while offset < elements.len() {
        let lower = offset;
        while offset < elements.len() && !text::is_whitespace_element(elements[offset]) {
            offset += 1;
        }
        while offset < elements.len() && text::is_whitespace_element(elements[offset]) {
            offset += 1;
        }
        ranges.push(TextRange::new(lower, offset - 1));
    }

    ranges
}
