//! The typewriter duration model.
//!
//! Pure functions mapping text to reveal timings, in `f64` seconds (the
//! runtime converts to `std::time::Duration` when scheduling). A fixed
//! per-element cadence is stretched by punctuation pauses, and every pause
//! keeps delaying all text after it: pauses are cumulative and
//! forward-propagating, not "since the last punctuation mark".

use crate::text;

/// Seconds between each revealed element.
pub const CHARACTER_DELAY: f64 = 0.02;

/// The pause an element adds after itself, if it is pause-worthy
/// punctuation.
///
/// Hyphens and dashes read as a short beat, mid-sentence punctuation as a
/// breath, sentence-ending punctuation as a full stop.
pub fn punctuation_pause(element: &str) -> Option<f64> {
    match element {
        "-" | "\u{2013}" | "\u{2014}" => Some(0.1),
        "," | ";" | ":" => Some(0.5),
        "." | "!" | "?" => Some(1.0),
        _ => None,
    }
}

/// Per-text table of punctuation pauses, built once from the source string.
///
/// One entry per punctuation element, in offset order. Immutable after
/// construction.
#[derive(Clone, Debug, Default)]
pub struct DelayTable {
    pauses: Vec<(usize, f64)>,
}

impl DelayTable {
    pub fn for_text(full_text: &str) -> DelayTable {
        let pauses = text::elements(full_text)
            .iter()
            .enumerate()
            .filter_map(|(offset, element)| {
                punctuation_pause(element).map(|pause| (offset, pause))
            })
            .collect();
        DelayTable { pauses }
    }

    /// The appearance delay for the element at `offset`: base cadence plus
    /// the sum of every punctuation pause strictly before it.
    pub fn delay_at(&self, offset: usize) -> f64 {
        CHARACTER_DELAY * offset as f64 + self.pause_before(offset)
    }

    /// Sum of punctuation pauses at offsets strictly before `offset`.
    pub fn pause_before(&self, offset: usize) -> f64 {
        self.pauses
            .iter()
            .filter(|(pause_offset, _)| *pause_offset < offset)
            .map(|(_, pause)| pause)
            .sum()
    }

    /// Sum of all punctuation pauses in the text.
    pub fn total_pause(&self) -> f64 {
        self.pauses.iter().map(|(_, pause)| pause).sum()
    }
}

/// Total seconds to reveal all elements of `text`: the cadence for the
/// inter-element steps plus every punctuation pause. Zero for empty text.
pub fn write_time(full_text: &str) -> f64 {
    let count = text::elements(full_text).len();
    if count == 0 {
        return 0.0;
    }
    CHARACTER_DELAY * (count - 1) as f64 + DelayTable::for_text(full_text).total_pause()
}

/// Total write time of a paragraph sequence, back to back. Inter-paragraph
/// gaps are the stack controller's business, not the model's.
pub fn stack_write_time<S: AsRef<str>>(paragraphs: &[S]) -> f64 {
    paragraphs
        .iter()
        .map(|paragraph| write_time(paragraph.as_ref()))
        .sum()
}

/// The start delay of paragraph `index` within a stack: the point in time at
/// which the previous paragraph finishes, i.e. the summed write times of all
/// preceding paragraphs. Zero for the first paragraph or an out-of-range
/// index.
pub fn paragraph_start_delay<S: AsRef<str>>(paragraphs: &[S], index: usize) -> f64 {
    if index == 0 || index >= paragraphs.len() {
        return 0.0;
    }
    stack_write_time(&paragraphs[..index])
}

/// Total inter-paragraph pause contributed by a fixed per-gap pause:
/// one gap fewer than there are paragraphs.
pub fn stack_pause_total(paragraph_pause: f64, paragraph_count: usize) -> f64 {
    paragraph_pause * paragraph_count.saturating_sub(1) as f64
}
