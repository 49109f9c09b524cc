//! Paragraph stack controller: N typewriters revealed in sequence.
//!
//! Each member gets a start offset derived from the duration model (the sum
//! of all preceding paragraphs' write times) plus the inter-paragraph pause
//! scaled by its index. The stack owns one snapshot covering every
//! paragraph; members never capture their own.

use tracing::debug;
use vellum_core::geometry::Size;
use vellum_core::text::layout::TextAlignment;
use vellum_core::timing;

use crate::effects::UiEffect;
use crate::events::{ColorScheme, LifecyclePhase, TimerEvent, TypewriterId};
use crate::features::typewriter::TypewriterState;
use crate::snapshot::{PositionedGlyph, Snapshot};

/// A vertical stack of typewriter paragraphs with one shared completion
/// deadline and snapshot.
#[derive(Debug)]
pub struct TypewriterStackState {
    members: Vec<TypewriterState>,
    start_delay: f64,
    paragraph_pause: f64,
    /// Vertical spacing between paragraphs.
    spacing: f32,
    finished: bool,
    snapshot: Option<Snapshot>,
}

impl TypewriterStackState {
    pub fn new<S: AsRef<str>>(
        paragraphs: &[S],
        paragraph_pause: f64,
        start_delay: f64,
        alignment: TextAlignment,
        spacing: f32,
    ) -> TypewriterStackState {
        let members = paragraphs
            .iter()
            .enumerate()
            .map(|(index, paragraph)| {
                let offset = timing::paragraph_start_delay(paragraphs, index)
                    + paragraph_pause * index as f64
                    + start_delay;
                TypewriterState::in_stack(paragraph.as_ref(), offset, alignment)
            })
            .collect();

        TypewriterStackState {
            members,
            start_delay,
            paragraph_pause,
            spacing,
            finished: false,
            snapshot: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn members(&self) -> &[TypewriterState] {
        &self.members
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// The stack is complete only when every member is.
    pub fn is_complete(&self) -> bool {
        self.finished && self.members.iter().all(TypewriterState::is_complete)
    }

    /// Total write time of the stack including pauses and its start delay —
    /// the completion deadline used at [`Self::start`].
    pub fn deadline(&self) -> f64 {
        let write_time: f64 = self.members.iter().map(TypewriterState::write_time).sum();
        write_time + timing::stack_pause_total(self.paragraph_pause, self.members.len())
            + self.start_delay
    }

    /// Summed intrinsic size of all paragraphs plus spacing.
    pub fn size_that_fits(&self, max_width: Option<f32>) -> Size {
        let mut size = Size::ZERO;
        for (index, member) in self.members.iter().enumerate() {
            let member_size = member.size_that_fits(max_width);
            size.width = size.width.max(member_size.width);
            size.height += member_size.height;
            if index > 0 {
                size.height += self.spacing;
            }
        }
        size
    }

    /// The fully-revealed layout of every paragraph, stacked, for
    /// rasterization.
    pub fn completed_glyphs(&self, max_width: Option<f32>) -> (Vec<PositionedGlyph>, Size) {
        let size = self.size_that_fits(max_width);
        let mut glyphs = Vec::new();
        let mut y = 0.0;

        for member in &self.members {
            let (member_glyphs, member_size) = member.completed_glyphs(max_width);
            glyphs.extend(member_glyphs.into_iter().map(|glyph| PositionedGlyph {
                y: glyph.y + y,
                ..glyph
            }));
            y += member_size.height + self.spacing;
        }

        (glyphs, size)
    }

    /// Vertical offset of each paragraph within the stack, matching
    /// [`Self::completed_glyphs`]. Used by the live renderer.
    pub fn member_offsets(&self, max_width: Option<f32>) -> Vec<f32> {
        let mut offsets = Vec::with_capacity(self.members.len());
        let mut y = 0.0;
        for member in &self.members {
            offsets.push(y);
            y += member.size_that_fits(max_width).height + self.spacing;
        }
        offsets
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Starts every member's reveal chain and schedules the stack deadline.
    pub fn start(&self, section: usize) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        for (index, member) in self.members.iter().enumerate() {
            effects.extend(member.start(TypewriterId::body(section, index)));
        }
        effects.push(UiEffect::schedule_secs(
            self.deadline(),
            TimerEvent::StackDeadline { section },
        ));
        effects
    }

    /// Routes a reveal to the owning member.
    pub fn on_reveal(&mut self, section: usize, paragraph: usize, upto: usize) -> Vec<UiEffect> {
        let Some(member) = self.members.get_mut(paragraph) else {
            return Vec::new();
        };
        member.on_reveal(TypewriterId::body(section, paragraph), upto)
    }

    /// The stack's completion deadline: forces every member complete and
    /// captures one stack-wide snapshot. Stale after fast-forward.
    pub fn on_stack_deadline(
        &mut self,
        section: usize,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.finished {
            return Vec::new();
        }
        debug!(section, "paragraph stack finished writing");
        self.finish();
        self.capture_effects(section, scheme, lifecycle)
    }

    /// Fast-forward: same completion path, idempotent.
    pub fn fast_forward(
        &mut self,
        section: usize,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if self.finished {
            return Vec::new();
        }
        debug!(section, "paragraph stack fast-forwarded");
        self.finish();
        self.capture_effects(section, scheme, lifecycle)
    }

    fn finish(&mut self) {
        for member in &mut self.members {
            member.complete();
        }
        self.finished = true;
    }

    pub fn on_scheme_changed(
        &mut self,
        section: usize,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if !self.finished {
            return Vec::new();
        }
        match &self.snapshot {
            Some(snapshot) if snapshot.scheme != scheme => {
                self.snapshot = None;
                self.capture_effects(section, scheme, lifecycle)
            }
            _ => Vec::new(),
        }
    }

    pub fn on_foreground(&mut self, section: usize, scheme: ColorScheme) -> Vec<UiEffect> {
        if self.finished && self.snapshot.is_none() {
            return vec![UiEffect::CaptureSnapshot {
                id: TypewriterId::body_stack(section),
                scheme,
            }];
        }
        Vec::new()
    }

    pub fn install_snapshot(&mut self, snapshot: Snapshot) {
        if self.finished {
            self.snapshot = Some(snapshot);
        }
    }

    fn capture_effects(
        &self,
        section: usize,
        scheme: ColorScheme,
        lifecycle: LifecyclePhase,
    ) -> Vec<UiEffect> {
        if lifecycle == LifecyclePhase::Background {
            return Vec::new();
        }
        vec![UiEffect::CaptureSnapshot {
            id: TypewriterId::body_stack(section),
            scheme,
        }]
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::timing::write_time;

    use super::*;

    fn stack(paragraphs: &[&str], pause: f64, start_delay: f64) -> TypewriterStackState {
        TypewriterStackState::new(paragraphs, pause, start_delay, TextAlignment::Leading, 1.0)
    }

    #[test]
    fn test_member_start_offsets_chain_paragraphs() {
        let stack = stack(&["A.", "B.", "C."], 0.0, 0.0);
        let expected = [0.0, write_time("A."), write_time("A.") + write_time("B.")];
        for (member, expected) in stack.members().iter().zip(expected) {
            assert!((member.start_delay() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_member_start_offsets_add_pause_and_start_delay() {
        let stack = stack(&["A.", "B."], 0.1, 2.0);
        assert!((stack.members()[0].start_delay() - 2.0).abs() < 1e-9);
        assert!(
            (stack.members()[1].start_delay() - (write_time("A.") + 0.1 + 2.0)).abs() < 1e-9
        );
    }

    #[test]
    fn test_deadline_covers_all_paragraphs_and_pauses() {
        let stack = stack(&["A.", "B.", "C."], 0.1, 0.5);
        let expected = write_time("A.") + write_time("B.") + write_time("C.") + 0.2 + 0.5;
        assert!((stack.deadline() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_complete_only_when_every_member_is() {
        let mut stack = stack(&["A.", "B."], 0.0, 0.0);
        assert!(!stack.is_complete());

        stack.on_stack_deadline(0, ColorScheme::Dark, LifecyclePhase::Active);
        assert!(stack.is_complete());
        assert!(stack.members().iter().all(TypewriterState::is_complete));
    }

    #[test]
    fn test_stack_deadline_captures_one_stack_snapshot() {
        let mut stack = stack(&["A.", "B."], 0.0, 0.0);
        let effects = stack.on_stack_deadline(3, ColorScheme::Dark, LifecyclePhase::Active);
        assert_eq!(
            effects,
            vec![UiEffect::CaptureSnapshot {
                id: TypewriterId::body_stack(3),
                scheme: ColorScheme::Dark
            }]
        );
        // Late natural deadline after fast-forward path: no-op.
        assert_eq!(
            stack.on_stack_deadline(3, ColorScheme::Dark, LifecyclePhase::Active),
            Vec::new()
        );
    }

    #[test]
    fn test_members_do_not_emit_their_own_captures() {
        let stack = stack(&["A."], 0.0, 0.0);
        let effects = stack.start(0);
        assert!(
            !effects
                .iter()
                .any(|effect| matches!(effect, UiEffect::CaptureSnapshot { .. }))
        );
        // One reveal chain, one stack deadline, no member deadline.
        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn test_completed_glyphs_stack_paragraphs_with_spacing() {
        let stack = stack(&["ab", "cd"], 0.0, 0.0);
        let (glyphs, size) = stack.completed_glyphs(None);
        assert_eq!(glyphs.len(), 4);
        // Second paragraph starts below the first plus 1.0 spacing.
        assert_eq!(glyphs[2].y, 2.0);
        assert_eq!(size, Size::new(2.0, 3.0));
    }
}
