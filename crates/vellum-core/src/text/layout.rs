//! Multiline text layout: greedy word wrapping with alignment.
//!
//! The engine arranges discrete inline elements (one per grapheme) into
//! wrapped lines under a width constraint. Words are never broken across
//! lines; an oversized word overflows its line rather than truncating.
//!
//! Layout is recomputed from scratch on every call. Nothing is cached, so
//! re-running with the same inputs is deterministic and idempotent.

use crate::geometry::{Rect, Size};
use crate::text::range::{TextRange, word_ranges};

/// Horizontal alignment of each line inside the layout bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Leading,
    Center,
    Trailing,
}

/// The absolute position of one inline element after placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedElement {
    /// Offset of the element in the source element sequence.
    pub offset: usize,
    pub x: f32,
    pub y: f32,
    pub size: Size,
}

/// A word-wrapping layout over a fixed sequence of word ranges.
///
/// Element sizes come from a caller-supplied measure function mapping an
/// element offset to its natural size, so the same engine serves terminal
/// cells, proportional fonts, or test fixtures.
#[derive(Clone, Debug)]
pub struct MultilineLayout {
    word_ranges: Vec<TextRange>,
    alignment: TextAlignment,
}

impl MultilineLayout {
    pub fn new(word_ranges: Vec<TextRange>, alignment: TextAlignment) -> MultilineLayout {
        MultilineLayout {
            word_ranges,
            alignment,
        }
    }

    pub fn from_text(text: &str, alignment: TextAlignment) -> MultilineLayout {
        MultilineLayout::new(word_ranges(text), alignment)
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Groups the word ranges into lines that fit `max_width`.
    ///
    /// Greedy, single pass: each word either extends the current line (if the
    /// extended line still fits) or starts a new one. The first word of a
    /// line is kept even when it alone exceeds the constraint. `None` means
    /// unconstrained width and always yields exactly one line.
    pub fn lines(&self, measure: &impl Fn(usize) -> Size, max_width: Option<f32>) -> Vec<TextRange> {
        let max_width = max_width.unwrap_or(f32::INFINITY);
        let mut lines: Vec<TextRange> = Vec::new();
        let mut current: Option<TextRange> = None;

        for word in &self.word_ranges {
            match current {
                None => current = Some(*word),
                Some(line) => {
                    let extended = line.extend_to(word.upper);
                    if self.width_of(extended, measure) <= max_width {
                        current = Some(extended);
                    } else {
                        lines.push(line);
                        current = Some(*word);
                    }
                }
            }
        }

        if let Some(line) = current {
            lines.push(line);
        }

        lines
    }

    /// The smallest size containing every line: max line width by summed
    /// line heights. Zero words produce [`Size::ZERO`].
    pub fn size_that_fits(
        &self,
        measure: &impl Fn(usize) -> Size,
        max_width: Option<f32>,
    ) -> Size {
        let lines = self.lines(measure, max_width);
        let width = lines
            .iter()
            .map(|line| self.width_of(*line, measure))
            .fold(0.0_f32, f32::max);
        let height = lines
            .iter()
            .map(|line| self.height_of(*line, measure))
            .sum();
        Size::new(width, height)
    }

    /// Computes the absolute top-left position of every element.
    ///
    /// Lines run top to bottom; within a line, elements are placed flush
    /// left to right from an origin determined by the alignment. Whatever
    /// inter-word gap exists is the trailing whitespace the tokenizer folded
    /// into each word's width.
    pub fn place(
        &self,
        measure: &impl Fn(usize) -> Size,
        bounds: Rect,
        max_width: Option<f32>,
    ) -> Vec<PlacedElement> {
        let lines = self.lines(measure, max_width);
        let mut placed = Vec::new();
        let mut y = bounds.min_y();

        for line in lines {
            let mut x = self.line_origin_x(line, bounds, measure);

            for offset in line.offsets() {
                let size = measure(offset);
                placed.push(PlacedElement { offset, x, y, size });
                x += size.width;
            }

            y += self.height_of(line, measure);
        }

        placed
    }

    fn width_of(&self, range: TextRange, measure: &impl Fn(usize) -> Size) -> f32 {
        range.offsets().map(|offset| measure(offset).width).sum()
    }

    fn height_of(&self, range: TextRange, measure: &impl Fn(usize) -> Size) -> f32 {
        range
            .offsets()
            .map(|offset| measure(offset).height)
            .fold(0.0_f32, f32::max)
    }

    fn line_origin_x(
        &self,
        line: TextRange,
        bounds: Rect,
        measure: &impl Fn(usize) -> Size,
    ) -> f32 {
        let width = self.width_of(line, measure);
        match self.alignment {
            TextAlignment::Leading => bounds.min_x(),
            TextAlignment::Center => bounds.mid_x() - width / 2.0,
            TextAlignment::Trailing => bounds.max_x() - width,
        }
    }
}
