//! Single-text typewriter reveal controller.
//!
//! State machine: `Writing -> Complete`, never backwards. Element reveals
//! are a chain of scheduled [`TimerEvent::Reveal`] callbacks; completion is
//! either the natural write-time deadline or an externally driven
//! fast-forward. Whichever fires second finds the phase already `Complete`
//! and does nothing.

use tracing::{debug, trace};
use vellum_core::geometry::{Rect, Size};
use vellum_core::text;
use vellum_core::text::layout::{MultilineLayout, TextAlignment};
use vellum_core::timing::{self, DelayTable};

use crate::effects::UiEffect;
use crate::events::{ColorScheme, LifecyclePhase, TimerEvent, TypewriterId};
use crate::features::typewriter::element_size;
use crate::snapshot::{PositionedGlyph, Snapshot};
use crate::transition;

/// Reveal phase of a typewriter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Writing,
    Complete,
}

/// One typewriter-driven text.
#[derive(Debug)]
pub struct TypewriterState {
    elements: Vec<String>,
    start_delay: f64,
    delays: DelayTable,
    alignment: TextAlignment,
    layout: MultilineLayout,
    /// Number of elements currently visible.
    revealed: usize,
    phase: Phase,
    snapshot: Option<Snapshot>,
    /// Stack members leave deadline tracking and snapshots to their stack.
    in_stack: bool,
    write_time: f64,
}

impl TypewriterState {
    pub fn new(full_text: &str, start_delay: f64, alignment: TextAlignment) -> TypewriterState {
        TypewriterState::build(full_text, start_delay, alignment, false)
    }

    pub(crate) fn in_stack(
        full_text: &str,
        start_delay: f64,
        alignment: TextAlignment,
    ) -> TypewriterState {
        TypewriterState::build(full_text, start_delay, alignment, true)
    }

    fn build(
        full_text: &str,
        start_delay: f64,
        alignment: TextAlignment,
        in_stack: bool,
    ) -> TypewriterState {
        TypewriterState {
            elements: text::elements(full_text).iter().map(ToString::to_string).collect(),
            start_delay,
            delays: DelayTable::for_text(full_text),
            alignment,
            layout: MultilineLayout::from_text(full_text, alignment),
            revealed: 0,
            phase: Phase::Writing,
            snapshot: None,
            in_stack,
            write_time: timing::write_time(full_text),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn write_time(&self) -> f64 {
        self.write_time
    }

    pub fn start_delay(&self) -> f64 {
        self.start_delay
    }

    pub fn layout(&self) -> &MultilineLayout {
        &self.layout
    }

    /// Places every element under the width constraint, regardless of
    /// visibility. The renderer filters by [`Self::revealed`].
    pub fn placed(&self, bounds: Rect, max_width: Option<f32>) -> Vec<vellum_core::text::layout::PlacedElement> {
        let measure = |offset: usize| element_size(&self.elements[offset]);
        self.layout.place(&measure, bounds, max_width)
    }

    /// Intrinsic size under the width constraint.
    pub fn size_that_fits(&self, max_width: Option<f32>) -> Size {
        let measure = |offset: usize| element_size(&self.elements[offset]);
        self.layout.size_that_fits(&measure, max_width)
    }

    /// The fully-revealed layout as positioned runs, for rasterization.
    pub fn completed_glyphs(&self, max_width: Option<f32>) -> (Vec<PositionedGlyph>, Size) {
        let size = self.size_that_fits(max_width);
        let bounds = Rect::new(0.0, 0.0, size.width, size.height);
        let glyphs = self
            .placed(bounds, max_width)
            .into_iter()
            .map(|placed| PositionedGlyph {
                glyph: self.elements[placed.offset].clone(),
                x: placed.x,
                y: placed.y,
            })
            .collect();
        (glyphs, size)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Schedules the reveal chain (and, for standalone typewriters, the
    /// completion deadline).
    pub fn start(&self, id: TypewriterId) -> Vec<UiEffect> {
        let mut effects = Vec::new();

        if !self.elements.is_empty() {
            effects.push(UiEffect::schedule_secs(
                self.start_delay + self.delays.delay_at(0),
                TimerEvent::Reveal { id, upto: 0 },
            ));
        }

        if !self.in_stack {
            effects.push(UiEffect::schedule_secs(
                self.start_delay + self.write_time,
                TimerEvent::WriteDeadline { id },
            ));
        }

        effects
    }

    /// Reveals the element at `upto` and chains the next reveal.
    ///
    /// A stale firing (completion already happened, or the offset is not the
    /// next expected element) is a no-op.
    pub fn on_reveal(&mut self, id: TypewriterId, upto: usize) -> Vec<UiEffect> {
        if self.phase == Phase::Complete || upto != self.revealed || upto >= self.elements.len() {
            return Vec::new();
        }

        self.revealed = upto + 1;
        trace!(?id, upto, transition = ?transition::TYPEWRITER, "element revealed");

        let next = upto + 1;
        if next < self.elements.len() {
            let step = self.delays.delay_at(next) - self.delays.delay_at(upto);
            return vec![UiEffect::schedule_secs(
                step,
                TimerEvent::Reveal { id, upto: next },
            )];
        }

        Vec::new()
    }

    /// Natural completion. No-op if fast-forward already completed this
    /// typewriter.
    pub fn on_write_deadline(
        &mut self,
        id: TypewriterId,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.phase == Phase::Complete {
            return Vec::new();
        }
        debug!(?id, "typewriter finished writing");
        self.complete();
        self.capture_effects(id, scheme, lifecycle)
    }

    /// Externally driven fast-forward. Idempotent: once complete, repeated
    /// requests (or the late natural deadline) change nothing.
    pub fn fast_forward(
        &mut self,
        id: TypewriterId,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.phase == Phase::Complete {
            return Vec::new();
        }
        debug!(?id, "typewriter fast-forwarded");
        self.complete();
        self.capture_effects(id, scheme, lifecycle)
    }

    /// Marks the typewriter complete without emitting effects. Used by the
    /// stack, which owns the snapshot for its members.
    pub(crate) fn complete(&mut self) {
        self.revealed = self.elements.len();
        self.phase = Phase::Complete;
    }

    /// A scheme change while complete discards the snapshot and requests one
    /// re-capture. Never re-enters `Writing`.
    pub fn on_scheme_changed(
        &mut self,
        id: TypewriterId,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.phase != Phase::Complete {
            return Vec::new();
        }
        match &self.snapshot {
            Some(snapshot) if snapshot.scheme != scheme => {
                self.snapshot = None;
                self.capture_effects(id, scheme, lifecycle)
            }
            _ => Vec::new(),
        }
    }

    /// Foreground re-activation: re-requests a capture that was suppressed
    /// while backgrounded.
    pub fn on_foreground(&mut self, id: TypewriterId, scheme: ColorScheme) -> Vec<UiEffect> {
        if self.phase == Phase::Complete && self.snapshot.is_none() && !self.in_stack {
            return vec![UiEffect::CaptureSnapshot { id, scheme }];
        }
        Vec::new()
    }

    /// Installs a rasterized snapshot, replacing any previous one. Ignored
    /// unless complete (a capture raced a state reset).
    pub fn install_snapshot(&mut self, snapshot: Snapshot) {
        if self.phase == Phase::Complete {
            self.snapshot = Some(snapshot);
        }
    }

    fn capture_effects(
        &self,
        id: TypewriterId,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.in_stack || lifecycle == LifecyclePhase::Background {
            // Background captures are deferred to the next foreground event.
            return Vec::new();
        }
        vec![UiEffect::CaptureSnapshot { id, scheme }]
    }
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use vellum_core::timing::CHARACTER_DELAY;

    use super::*;

    fn id() -> TypewriterId {
        TypewriterId::title(0)
    }

    fn snapshot(scheme: ColorScheme) -> Snapshot {
        Snapshot {
            buffer: Buffer::empty(ratatui::layout::Rect::new(0, 0, 1, 1)),
            scale: 1.0,
            scheme,
        }
    }

    fn active() -> LifecyclePhase {
        LifecyclePhase::Active
    }

    fn unpack_schedule(effect: &UiEffect) -> (f64, TimerEvent) {
        match effect {
            UiEffect::Schedule { after, event } => (after.as_secs_f64(), event.clone()),
            other => panic!("expected Schedule, got {other:?}"),
        }
    }

    #[test]
    fn test_start_schedules_first_reveal_and_deadline() {
        let state = TypewriterState::new("Hi.", 0.5, TextAlignment::Leading);
        let effects = state.start(id());

        let (after, event) = unpack_schedule(&effects[0]);
        assert!((after - 0.5).abs() < 1e-9);
        assert_eq!(event, TimerEvent::Reveal { id: id(), upto: 0 });

        let (after, event) = unpack_schedule(&effects[1]);
        assert!((after - (0.5 + CHARACTER_DELAY * 2.0 + 1.0)).abs() < 1e-9);
        assert_eq!(event, TimerEvent::WriteDeadline { id: id() });
    }

    #[test]
    fn test_reveal_chain_steps_by_delay_delta() {
        let mut state = TypewriterState::new("a.b", 0.0, TextAlignment::Leading);
        let effects = state.on_reveal(id(), 0);
        assert_eq!(state.revealed(), 1);
        // Next element is the '.', plain cadence.
        let (after, event) = unpack_schedule(&effects[0]);
        assert!((after - CHARACTER_DELAY).abs() < 1e-9);
        assert_eq!(event, TimerEvent::Reveal { id: id(), upto: 1 });

        let effects = state.on_reveal(id(), 1);
        // The 'b' after the full stop waits out the pause as well.
        let (after, event) = unpack_schedule(&effects[0]);
        assert!((after - (CHARACTER_DELAY + 1.0)).abs() < 1e-9);
        assert_eq!(event, TimerEvent::Reveal { id: id(), upto: 2 });

        assert_eq!(state.on_reveal(id(), 2), Vec::new());
        assert_eq!(state.revealed(), 3);
    }

    #[test]
    fn test_stale_reveal_is_a_no_op() {
        let mut state = TypewriterState::new("abc", 0.0, TextAlignment::Leading);
        state.on_reveal(id(), 0);
        // Replayed or out-of-order reveals do nothing.
        assert_eq!(state.on_reveal(id(), 0), Vec::new());
        assert_eq!(state.on_reveal(id(), 2), Vec::new());
        assert_eq!(state.revealed(), 1);
    }

    #[test]
    fn test_write_deadline_completes_and_captures() {
        let mut state = TypewriterState::new("hi", 0.0, TextAlignment::Leading);
        let effects = state.on_write_deadline(id(), ColorScheme::Dark, active());
        assert!(state.is_complete());
        assert_eq!(state.revealed(), 2);
        assert_eq!(
            effects,
            vec![UiEffect::CaptureSnapshot {
                id: id(),
                scheme: ColorScheme::Dark
            }]
        );
    }

    #[test]
    fn test_fast_forward_is_idempotent() {
        let mut state = TypewriterState::new("slow text here", 0.0, TextAlignment::Leading);

        let first = state.fast_forward(id(), ColorScheme::Dark, active());
        assert_eq!(first.len(), 1);
        assert!(state.is_complete());
        state.install_snapshot(snapshot(ColorScheme::Dark));

        // Again, and the natural deadline arriving late: both no-ops.
        assert_eq!(state.fast_forward(id(), ColorScheme::Dark, active()), Vec::new());
        assert_eq!(
            state.on_write_deadline(id(), ColorScheme::Dark, active()),
            Vec::new()
        );
        assert!(state.snapshot().is_some());
    }

    #[test]
    fn test_reveal_after_completion_is_a_no_op() {
        let mut state = TypewriterState::new("abc", 0.0, TextAlignment::Leading);
        state.fast_forward(id(), ColorScheme::Dark, active());
        assert_eq!(state.on_reveal(id(), 0), Vec::new());
        assert_eq!(state.revealed(), 3);
    }

    #[test]
    fn test_scheme_change_recaptures_once_without_rewriting() {
        let mut state = TypewriterState::new("hi", 0.0, TextAlignment::Leading);
        state.on_write_deadline(id(), ColorScheme::Dark, active());
        state.install_snapshot(snapshot(ColorScheme::Dark));

        let effects = state.on_scheme_changed(id(), ColorScheme::Light, active());
        assert_eq!(
            effects,
            vec![UiEffect::CaptureSnapshot {
                id: id(),
                scheme: ColorScheme::Light
            }]
        );
        assert_eq!(state.phase(), Phase::Complete);
        assert!(state.snapshot().is_none());

        // Same scheme again: nothing to do (no snapshot to invalidate).
        assert_eq!(state.on_scheme_changed(id(), ColorScheme::Light, active()), Vec::new());
    }

    #[test]
    fn test_scheme_change_while_writing_does_nothing() {
        let mut state = TypewriterState::new("hi", 0.0, TextAlignment::Leading);
        assert_eq!(state.on_scheme_changed(id(), ColorScheme::Light, active()), Vec::new());
        assert_eq!(state.phase(), Phase::Writing);
    }

    #[test]
    fn test_background_completion_defers_capture_to_foreground() {
        let mut state = TypewriterState::new("hi", 0.0, TextAlignment::Leading);
        let effects =
            state.on_write_deadline(id(), ColorScheme::Dark, LifecyclePhase::Background);
        assert!(state.is_complete());
        assert_eq!(effects, Vec::new());

        let effects = state.on_foreground(id(), ColorScheme::Dark);
        assert_eq!(
            effects,
            vec![UiEffect::CaptureSnapshot {
                id: id(),
                scheme: ColorScheme::Dark
            }]
        );
    }

    #[test]
    fn test_foreground_with_snapshot_present_is_a_no_op() {
        let mut state = TypewriterState::new("hi", 0.0, TextAlignment::Leading);
        state.on_write_deadline(id(), ColorScheme::Dark, active());
        state.install_snapshot(snapshot(ColorScheme::Dark));
        assert_eq!(state.on_foreground(id(), ColorScheme::Dark), Vec::new());
    }

    #[test]
    fn test_completed_glyphs_cover_every_element() {
        let state = TypewriterState::new("ab cd", 0.0, TextAlignment::Leading);
        let (glyphs, size) = state.completed_glyphs(Some(3.0));
        assert_eq!(glyphs.len(), 5);
        assert_eq!(size, Size::new(3.0, 2.0));
    }
}
