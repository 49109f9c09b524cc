//! Interactive paging: drag gestures over the paging stack.
//!
//! While a drag is live the stack follows the pointer; if the implied
//! target index would leave `[0, max_index]`, the translation is damped.
//! On release, an index change commits only past a threshold that scales
//! with the active element's size, and the direction comes from comparing
//! the start and predicted end locations rather than the raw delta.

use tracing::debug;
use vellum_core::geometry::Axis;

use crate::transition;
use crate::transition::Transition;

/// Divisor applied to out-of-bounds drag translation. The original uses a
/// fixed factor of 8 as a soft clamp; kept as-is rather than generalized
/// into a resistance curve.
pub const OUT_OF_BOUNDS_RESISTANCE: f32 = 8.0;

/// How far past the last observed position a release is projected, standing
/// in for the platform's predicted-end-translation (which folds in fling
/// velocity).
const FLING_PROJECTION: f32 = 3.0;

/// A finished drag along the paging axis, in layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    pub start_location: f32,
    pub predicted_end_location: f32,
}

impl Drag {
    pub fn predicted_translation(&self) -> f32 {
        self.predicted_end_location - self.start_location
    }
}

/// A committed index change and its suggested transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageCommit {
    pub index: usize,
    pub transition: Transition,
}

#[derive(Clone, Copy, Debug)]
struct DragTracker {
    origin: f32,
    last: f32,
    last_step: f32,
}

/// Paging state plus the live drag gesture.
#[derive(Debug)]
pub struct InteractivePaging {
    pub index: usize,
    pub max_index: usize,
    pub axis: Axis,
    /// Spacing between elements; folded into the commit threshold.
    pub spacing: f32,
    /// Gating for the gesture as a whole (the walkthrough disables paging
    /// until its continue control is visible).
    pub enabled: bool,
    drag: Option<DragTracker>,
}

impl InteractivePaging {
    pub fn new(axis: Axis, spacing: f32) -> InteractivePaging {
        InteractivePaging {
            index: 0,
            max_index: 0,
            axis,
            spacing,
            enabled: false,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The stack's live offset along the axis: the raw translation, damped
    /// when the implied target index is out of bounds.
    pub fn live_offset(&self) -> f32 {
        let Some(drag) = &self.drag else {
            return 0.0;
        };
        self.with_resistance(drag.last - drag.origin)
    }

    /// Damps a translation whose implied target is outside `[0, max_index]`.
    pub fn with_resistance(&self, translation: f32) -> f32 {
        if self.target_for(translation).is_some() {
            translation
        } else {
            translation / OUT_OF_BOUNDS_RESISTANCE
        }
    }

    pub fn begin_drag(&mut self, position: f32) {
        if !self.enabled {
            return;
        }
        self.drag = Some(DragTracker {
            origin: position,
            last: position,
            last_step: 0.0,
        });
    }

    pub fn drag_moved(&mut self, position: f32) {
        if let Some(drag) = &mut self.drag {
            drag.last_step = position - drag.last;
            drag.last = position;
        }
    }

    /// Ends the live gesture and commits an index change if the projected
    /// release clears the threshold. Returns `None` (spring back, no state
    /// change) otherwise.
    pub fn end_drag(&mut self, active_extent: f32) -> Option<PageCommit> {
        let tracker = self.drag.take()?;
        let drag = Drag {
            start_location: tracker.origin,
            predicted_end_location: tracker.last + tracker.last_step * FLING_PROJECTION,
        };
        let Some(commit) = self.commit_for(&drag, active_extent) else {
            debug!(transition = ?transition::INTERACTIVE_PAGING, "drag spring-back");
            return None;
        };
        debug!(from = self.index, to = commit.index, "paging commit");
        self.index = commit.index;
        Some(commit)
    }

    /// Pure commit decision for a finished drag.
    ///
    /// The threshold scales with the active element's extent so short and
    /// tall content require proportionally similar effort: extent/3 plus
    /// half the inter-element spacing.
    pub fn commit_for(&self, drag: &Drag, active_extent: f32) -> Option<PageCommit> {
        let magnitude = drag.predicted_translation().abs();
        let threshold = active_extent / 3.0 + self.spacing / 2.0;
        if magnitude < threshold {
            return None;
        }

        // Direction from start vs predicted end, reflecting fling intent.
        let forward = drag.predicted_end_location < drag.start_location;
        let target = if forward {
            self.index.checked_add(1).filter(|next| *next <= self.max_index)
        } else {
            self.index.checked_sub(1)
        };

        target.map(|index| PageCommit {
            index,
            transition: transition::PAGING,
        })
    }

    /// The index a translation implies, if it is in bounds.
    fn target_for(&self, translation: f32) -> Option<usize> {
        if translation <= 0.0 {
            self.index.checked_add(1).filter(|next| *next <= self.max_index)
        } else {
            self.index.checked_sub(1)
        }
    }
}
