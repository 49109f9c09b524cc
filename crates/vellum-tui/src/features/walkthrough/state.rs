//! Walkthrough state.
//!
//! Progress is `(active, frontier)` with `active <= frontier <
//! section_count`. The frontier — the furthest section ever presented —
//! only moves forward: continue-advance increments it, fast-forward jumps
//! it to the last index, and backward navigation leaves it alone.

use vellum_core::config::Tuning;
use vellum_core::content::Script;
use vellum_core::geometry::{Axis, Size};
use vellum_core::text::layout::TextAlignment;
use vellum_core::timing;

use crate::features::paging::InteractivePaging;
use crate::features::typewriter::{TypewriterStackState, TypewriterState};

/// One section's typewriters.
#[derive(Debug)]
pub struct SectionState {
    /// Optional title, a standalone typewriter with its own snapshot.
    pub title: Option<TypewriterState>,
    /// Body paragraphs, revealed as a stack.
    pub body: TypewriterStackState,
    /// Whether this section's reveal chains have been scheduled.
    pub started: bool,
}

impl SectionState {
    /// Intrinsic size: title (if any), the title/body gap, and the body
    /// stack.
    pub fn size_that_fits(&self, max_width: Option<f32>, paragraph_spacing: f32) -> Size {
        let body = self.body.size_that_fits(max_width);
        match &self.title {
            None => body,
            Some(title) => {
                let title_size = title.size_that_fits(max_width);
                Size::new(
                    title_size.width.max(body.width),
                    title_size.height + paragraph_spacing + body.height,
                )
            }
        }
    }
}

/// The sequencer itself.
#[derive(Debug)]
pub struct WalkthroughState {
    pub sections: Vec<SectionState>,
    /// Section titles/bodies as loaded, for labels and delay math.
    pub script: Script,
    pub tuning: Tuning,
    /// Paging state; `paging.index` is the active section and
    /// `paging.max_index` always equals the frontier.
    pub paging: InteractivePaging,
    /// Furthest section ever presented. Monotonic (see module docs).
    pub frontier: usize,
    /// Sticky fast-forward flag, propagated to every typewriter.
    pub fast_forward: bool,
    pub continue_visible: bool,
    pub fast_forward_visible: bool,
    /// Set once the final section is confirmed; the completion callback
    /// fires exactly once.
    pub finished: bool,
}

impl WalkthroughState {
    pub fn new(script: Script, tuning: Tuning, axis: Axis) -> WalkthroughState {
        let sections = script
            .sections
            .iter()
            .map(|section| {
                let title = section
                    .title
                    .as_ref()
                    .map(|title| {
                        TypewriterState::new(title, tuning.title_appear_delay, TextAlignment::Leading)
                    });
                let body_delay = title_lead_time(section.title.as_deref(), &tuning)
                    + tuning.body_appear_delay;
                let body = TypewriterStackState::new(
                    &section.body,
                    tuning.paragraph_pause,
                    body_delay,
                    TextAlignment::Leading,
                    tuning.paragraph_spacing,
                );
                SectionState {
                    title,
                    body,
                    started: false,
                }
            })
            .collect();

        WalkthroughState {
            sections,
            script,
            paging: InteractivePaging::new(axis, tuning.section_spacing),
            tuning,
            frontier: 0,
            fast_forward: false,
            continue_visible: false,
            fast_forward_visible: false,
            finished: false,
        }
    }

    pub fn active(&self) -> usize {
        self.paging.index
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.sections.len()
    }

    /// Whether the section at `index` has ever been presented.
    pub fn is_presented(&self, index: usize) -> bool {
        index <= self.frontier
    }

    /// Extent of one section along the paging axis, for the drag commit
    /// threshold.
    pub fn section_extent(&self, index: usize, max_width: Option<f32>) -> f32 {
        self.sections.get(index).map_or(0.0, |section| {
            section
                .size_that_fits(max_width, self.tuning.paragraph_spacing)
                .along(self.paging.axis)
        })
    }

    /// Seconds from a section's appearance until its continue control shows:
    /// the title's lead time and write time (when present), the body's lead
    /// time and write time, and the configured post-delay.
    pub fn continue_appear_delay(&self, index: usize) -> f64 {
        let Some(section) = self.script.sections.get(index) else {
            return 0.0;
        };
        title_lead_time(section.title.as_deref(), &self.tuning)
            + self.tuning.body_appear_delay
            + timing::stack_write_time(&section.body)
            + self.tuning.continue_appear_delay
    }
}

/// Time consumed by the title before the body may start: its appear delay
/// plus its write time, or nothing for untitled sections.
fn title_lead_time(title: Option<&str>, tuning: &Tuning) -> f64 {
    match title {
        Some(title) => tuning.title_appear_delay + timing::write_time(title),
        None => 0.0,
    }
}
