//! Walkthrough transitions.
//!
//! Every timer handler re-checks state before acting, so callbacks that
//! outlived the state they were scheduled against fall through as no-ops.
//! The frontier never moves backwards.

use tracing::{debug, info};
use vellum_core::geometry::Size;

use crate::effects::UiEffect;
use crate::events::{ColorScheme, LifecyclePhase, TextSlot, TimerEvent, TypewriterId};
use crate::features::walkthrough::WalkthroughState;
use crate::snapshot::{PositionedGlyph, Snapshot};
use crate::transition;

/// First presentation: schedules the fast-forward control and starts the
/// opening section.
pub fn on_mount(state: &mut WalkthroughState) -> Vec<UiEffect> {
    let mut effects = vec![UiEffect::schedule_secs(
        state.tuning.fast_forward_appear_delay,
        TimerEvent::ShowFastForward,
    )];
    effects.extend(start_section(state, 0));
    effects
}

/// Schedules a section's typewriters and its continue control. Idempotent
/// per section.
fn start_section(state: &mut WalkthroughState, index: usize) -> Vec<UiEffect> {
    let continue_delay = state.continue_appear_delay(index);
    let Some(section) = state.sections.get_mut(index) else {
        return Vec::new();
    };
    if section.started {
        return Vec::new();
    }
    section.started = true;
    debug!(section = index, "section started");

    let mut effects = Vec::new();
    if let Some(title) = &section.title {
        effects.extend(title.start(TypewriterId::title(index)));
    }
    effects.extend(section.body.start(index));
    effects.push(UiEffect::schedule_secs(
        continue_delay,
        TimerEvent::ShowContinue { section: index },
    ));
    effects
}

/// Routes a due timer to its owner, dropping it if state has moved on.
pub fn handle_timer(
    state: &mut WalkthroughState,
    event: TimerEvent,
    scheme: ColorScheme,
    lifecycle: LifecyclePhase,
) -> Vec<UiEffect> {
    match event {
        TimerEvent::Reveal { id, upto } => {
            let Some(section) = state.sections.get_mut(id.section) else {
                return Vec::new();
            };
            match id.slot {
                TextSlot::Title => section
                    .title
                    .as_mut()
                    .map_or_else(Vec::new, |title| title.on_reveal(id, upto)),
                TextSlot::Body(paragraph) => section.body.on_reveal(id.section, paragraph, upto),
                TextSlot::BodyStack => Vec::new(),
            }
        }

        TimerEvent::WriteDeadline { id } => {
            let Some(section) = state.sections.get_mut(id.section) else {
                return Vec::new();
            };
            match (id.slot, &mut section.title) {
                (TextSlot::Title, Some(title)) => title.on_write_deadline(id, scheme, lifecycle),
                _ => Vec::new(),
            }
        }

        TimerEvent::StackDeadline { section } => state
            .sections
            .get_mut(section)
            .map_or_else(Vec::new, |owner| {
                owner.body.on_stack_deadline(section, scheme, lifecycle)
            }),

        TimerEvent::ShowContinue { section } => {
            // Only the current frontier may reveal its continue control;
            // fast-forward already showed one for the final section.
            if state.fast_forward || state.finished || section != state.frontier {
                return Vec::new();
            }
            state.continue_visible = true;
            state.paging.enabled = true;
            debug!(section, transition = ?transition::BUTTON_APPEAR, "continue control shown");
            if state.is_last(section) {
                state.fast_forward_visible = false;
            }
            Vec::new()
        }

        TimerEvent::ShowFastForward => {
            let at_end = state.continue_visible && state.is_last(state.frontier);
            if !state.fast_forward && !state.finished && !at_end {
                state.fast_forward_visible = true;
                debug!(transition = ?transition::BUTTON_APPEAR, "fast-forward control shown");
            }
            Vec::new()
        }

        TimerEvent::AdvanceFrontier { from } => {
            // Stale once the frontier has moved past `from` (fast-forward).
            if state.fast_forward || from != state.frontier || from + 1 >= state.section_count() {
                return Vec::new();
            }
            state.frontier = from + 1;
            state.paging.max_index = state.frontier;
            state.paging.index = state.frontier;
            info!(section = state.frontier, "frontier advanced");
            start_section(state, from + 1)
        }
    }
}

/// The continue control was activated.
///
/// Behind the frontier it pages forward through already-presented content;
/// at the frontier it hides itself, lets the settle delay elapse, then
/// advances; on the final section it finishes the walkthrough exactly once.
pub fn continue_pressed(state: &mut WalkthroughState) -> Vec<UiEffect> {
    if !state.continue_visible || state.finished {
        return Vec::new();
    }

    let active = state.active();
    if active < state.frontier {
        state.paging.index = active + 1;
        return Vec::new();
    }

    if state.is_last(active) {
        state.finished = true;
        info!("walkthrough finished");
        return vec![UiEffect::Finished];
    }

    state.continue_visible = false;
    state.paging.enabled = false;
    vec![UiEffect::schedule_secs(
        state.tuning.advance_settle_delay,
        TimerEvent::AdvanceFrontier {
            from: state.frontier,
        },
    )]
}

/// Skip all remaining writing: every section completes immediately, the
/// frontier jumps to the end, and the final continue control shows.
pub fn fast_forward_pressed(
    state: &mut WalkthroughState,
    scheme: ColorScheme,
    lifecycle: LifecyclePhase,
) -> Vec<UiEffect> {
    if state.fast_forward || state.finished || state.sections.is_empty() {
        return Vec::new();
    }
    info!("fast-forward");

    state.fast_forward = true;
    state.fast_forward_visible = false;
    state.frontier = state.section_count() - 1;
    state.paging.max_index = state.frontier;
    state.continue_visible = true;
    state.paging.enabled = true;

    let mut effects = Vec::new();
    for (index, section) in state.sections.iter_mut().enumerate() {
        section.started = true;
        if let Some(title) = &mut section.title {
            effects.extend(title.fast_forward(TypewriterId::title(index), scheme, lifecycle));
        }
        effects.extend(section.body.fast_forward(index, scheme, lifecycle));
    }
    effects
}

/// Keyboard paging, same gating and bounds as the drag gesture.
pub fn page_back(state: &mut WalkthroughState) {
    if state.paging.enabled && state.active() > 0 {
        state.paging.index -= 1;
    }
}

pub fn page_forward(state: &mut WalkthroughState) {
    if state.paging.enabled && state.active() < state.frontier {
        state.paging.index += 1;
    }
}

/// Ends a live drag, committing against the active section's extent.
pub fn drag_ended(state: &mut WalkthroughState, max_width: Option<f32>) {
    let extent = state.section_extent(state.active(), max_width);
    state.paging.end_drag(extent);
}

/// Propagates a scheme flip to every typewriter; completed ones re-capture.
pub fn scheme_changed(
    state: &mut WalkthroughState,
    scheme: ColorScheme,
    lifecycle: LifecyclePhase,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for (index, section) in state.sections.iter_mut().enumerate() {
        if let Some(title) = &mut section.title {
            effects.extend(title.on_scheme_changed(
                TypewriterId::title(index),
                scheme,
                lifecycle,
            ));
        }
        effects.extend(section.body.on_scheme_changed(index, scheme, lifecycle));
    }
    effects
}

/// Foreground re-activation: re-requests captures deferred while
/// backgrounded.
pub fn foreground(state: &mut WalkthroughState, scheme: ColorScheme) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for (index, section) in state.sections.iter_mut().enumerate() {
        if let Some(title) = &mut section.title {
            effects.extend(title.on_foreground(TypewriterId::title(index), scheme));
        }
        effects.extend(section.body.on_foreground(index, scheme));
    }
    effects
}

/// Installs a finished raster into its owner.
pub fn snapshot_ready(state: &mut WalkthroughState, id: TypewriterId, snapshot: Snapshot) {
    let Some(section) = state.sections.get_mut(id.section) else {
        return;
    };
    match id.slot {
        TextSlot::Title => {
            if let Some(title) = &mut section.title {
                title.install_snapshot(snapshot);
            }
        }
        TextSlot::BodyStack => section.body.install_snapshot(snapshot),
        TextSlot::Body(_) => {}
    }
}

/// The fully-revealed layout behind `id`, for the runtime's rasterizer.
pub fn completed_glyphs(
    state: &WalkthroughState,
    id: TypewriterId,
    max_width: Option<f32>,
) -> Option<(Vec<PositionedGlyph>, Size)> {
    let section = state.sections.get(id.section)?;
    match id.slot {
        TextSlot::Title => section
            .title
            .as_ref()
            .map(|title| title.completed_glyphs(max_width)),
        TextSlot::BodyStack => Some(section.body.completed_glyphs(max_width)),
        TextSlot::Body(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use vellum_core::config::Tuning;
    use vellum_core::content::{Script, Section};
    use vellum_core::geometry::Axis;

    use super::*;

    fn walkthrough(sections: usize) -> WalkthroughState {
        let script = Script {
            sections: (0..sections)
                .map(|index| Section {
                    title: Some(format!("Title {index}")),
                    body: vec![format!("Body {index}.")],
                })
                .collect(),
        };
        WalkthroughState::new(script, Tuning::default(), Axis::Vertical)
    }

    fn dark() -> ColorScheme {
        ColorScheme::Dark
    }

    fn active() -> LifecyclePhase {
        LifecyclePhase::Active
    }

    fn show_continue(state: &mut WalkthroughState, section: usize) -> Vec<UiEffect> {
        handle_timer(
            state,
            TimerEvent::ShowContinue { section },
            dark(),
            active(),
        )
    }

    #[test]
    fn test_mount_starts_first_section_and_fast_forward_timer() {
        let mut state = walkthrough(2);
        let effects = on_mount(&mut state);

        assert!(state.sections[0].started);
        assert!(!state.sections[1].started);
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::Schedule {
                event: TimerEvent::ShowFastForward,
                ..
            }
        )));
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::Schedule {
                event: TimerEvent::ShowContinue { section: 0 },
                ..
            }
        )));
    }

    #[test]
    fn test_starting_a_section_twice_is_a_no_op() {
        let mut state = walkthrough(2);
        on_mount(&mut state);
        assert_eq!(start_section(&mut state, 0), Vec::new());
    }

    #[test]
    fn test_show_continue_enables_paging() {
        let mut state = walkthrough(2);
        on_mount(&mut state);
        show_continue(&mut state, 0);
        assert!(state.continue_visible);
        assert!(state.paging.enabled);
        // Not the last section, so the fast-forward offer stands.
        let mut state2 = walkthrough(2);
        on_mount(&mut state2);
        handle_timer(&mut state2, TimerEvent::ShowFastForward, dark(), active());
        assert!(state2.fast_forward_visible);
    }

    #[test]
    fn test_show_continue_for_non_frontier_section_is_stale() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        show_continue(&mut state, 1);
        assert!(!state.continue_visible);
    }

    #[test]
    fn test_continue_at_frontier_settles_then_advances() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        show_continue(&mut state, 0);

        let effects = continue_pressed(&mut state);
        assert!(!state.continue_visible);
        assert!(!state.paging.enabled);
        assert_eq!(state.frontier, 0);
        assert!(matches!(
            effects[0],
            UiEffect::Schedule {
                event: TimerEvent::AdvanceFrontier { from: 0 },
                ..
            }
        ));

        handle_timer(
            &mut state,
            TimerEvent::AdvanceFrontier { from: 0 },
            dark(),
            active(),
        );
        assert_eq!(state.frontier, 1);
        assert_eq!(state.active(), 1);
        assert_eq!(state.paging.max_index, 1);
        assert!(state.sections[1].started);
    }

    #[test]
    fn test_stale_advance_frontier_is_a_no_op() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        state.frontier = 2;
        state.paging.max_index = 2;
        state.paging.index = 2;

        handle_timer(
            &mut state,
            TimerEvent::AdvanceFrontier { from: 0 },
            dark(),
            active(),
        );
        assert_eq!(state.frontier, 2);
    }

    #[test]
    fn test_continue_behind_frontier_pages_without_advancing() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        state.frontier = 2;
        state.paging.max_index = 2;
        state.paging.index = 0;
        state.continue_visible = true;
        state.paging.enabled = true;

        let effects = continue_pressed(&mut state);
        assert_eq!(effects, Vec::new());
        assert_eq!(state.active(), 1);
        assert_eq!(state.frontier, 2);
        // The control stays visible for presented sections.
        assert!(state.continue_visible);
    }

    #[test]
    fn test_continue_on_last_section_finishes_once() {
        let mut state = walkthrough(2);
        on_mount(&mut state);
        state.frontier = 1;
        state.paging.max_index = 1;
        state.paging.index = 1;
        show_continue(&mut state, 1);

        assert_eq!(continue_pressed(&mut state), vec![UiEffect::Finished]);
        assert!(state.finished);
        // Pressing again never re-emits.
        assert_eq!(continue_pressed(&mut state), Vec::new());
    }

    #[test]
    fn test_continue_while_hidden_is_ignored() {
        let mut state = walkthrough(2);
        on_mount(&mut state);
        assert_eq!(continue_pressed(&mut state), Vec::new());
        assert_eq!(state.frontier, 0);
    }

    #[test]
    fn test_fast_forward_completes_everything() {
        let mut state = walkthrough(3);
        on_mount(&mut state);

        let effects = fast_forward_pressed(&mut state, dark(), active());

        assert!(state.fast_forward);
        assert_eq!(state.frontier, 2);
        assert_eq!(state.paging.max_index, 2);
        assert!(state.continue_visible);
        assert!(!state.fast_forward_visible);
        for section in &state.sections {
            assert!(section.started);
            assert!(section.title.as_ref().is_some_and(|t| t.is_complete()));
            assert!(section.body.is_complete());
        }
        // One title capture and one stack capture per section.
        let captures = effects
            .iter()
            .filter(|effect| matches!(effect, UiEffect::CaptureSnapshot { .. }))
            .count();
        assert_eq!(captures, 6);

        // Repeated presses change nothing.
        assert_eq!(fast_forward_pressed(&mut state, dark(), active()), Vec::new());
    }

    #[test]
    fn test_timers_scheduled_before_fast_forward_are_stale_after() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        fast_forward_pressed(&mut state, dark(), active());

        show_continue(&mut state, 0);
        handle_timer(
            &mut state,
            TimerEvent::AdvanceFrontier { from: 0 },
            dark(),
            active(),
        );
        handle_timer(&mut state, TimerEvent::ShowFastForward, dark(), active());
        handle_timer(
            &mut state,
            TimerEvent::StackDeadline { section: 0 },
            dark(),
            active(),
        );

        assert_eq!(state.frontier, 2);
        assert!(!state.fast_forward_visible);
    }

    #[test]
    fn test_fast_forward_offer_withheld_on_finished_last_section() {
        let mut state = walkthrough(1);
        on_mount(&mut state);
        show_continue(&mut state, 0);
        // The lone section's continue is up; there is nothing to skip.
        handle_timer(&mut state, TimerEvent::ShowFastForward, dark(), active());
        assert!(!state.fast_forward_visible);
    }

    #[test]
    fn test_keyboard_paging_respects_frontier_and_gating() {
        let mut state = walkthrough(3);
        on_mount(&mut state);
        state.frontier = 1;
        state.paging.max_index = 1;

        // Disabled until the continue control shows.
        page_forward(&mut state);
        assert_eq!(state.active(), 0);

        state.paging.enabled = true;
        page_forward(&mut state);
        assert_eq!(state.active(), 1);
        page_forward(&mut state);
        assert_eq!(state.active(), 1);
        page_back(&mut state);
        assert_eq!(state.active(), 0);
        page_back(&mut state);
        assert_eq!(state.active(), 0);
    }

    #[test]
    fn test_snapshot_routing_by_slot() {
        use ratatui::buffer::Buffer;

        use crate::snapshot::Snapshot;

        let mut state = walkthrough(1);
        on_mount(&mut state);
        fast_forward_pressed(&mut state, dark(), active());

        let snap = || Snapshot {
            buffer: Buffer::empty(ratatui::layout::Rect::new(0, 0, 1, 1)),
            scale: 1.0,
            scheme: dark(),
        };
        snapshot_ready(&mut state, TypewriterId::title(0), snap());
        snapshot_ready(&mut state, TypewriterId::body_stack(0), snap());
        // Per-paragraph ids never own a snapshot.
        snapshot_ready(&mut state, TypewriterId::body(0, 0), snap());

        assert!(state.sections[0].title.as_ref().unwrap().snapshot().is_some());
        assert!(state.sections[0].body.snapshot().is_some());
    }

    #[test]
    fn test_completed_glyphs_resolved_by_id() {
        let state = walkthrough(2);
        assert!(completed_glyphs(&state, TypewriterId::title(0), None).is_some());
        assert!(completed_glyphs(&state, TypewriterId::body_stack(1), None).is_some());
        assert!(completed_glyphs(&state, TypewriterId::body(0, 0), None).is_none());
        assert!(completed_glyphs(&state, TypewriterId::title(9), None).is_none());
    }

    #[test]
    fn test_reveal_routes_to_title_and_paragraphs() {
        let mut state = walkthrough(1);
        on_mount(&mut state);

        handle_timer(
            &mut state,
            TimerEvent::Reveal {
                id: TypewriterId::title(0),
                upto: 0,
            },
            dark(),
            active(),
        );
        assert_eq!(state.sections[0].title.as_ref().unwrap().revealed(), 1);

        handle_timer(
            &mut state,
            TimerEvent::Reveal {
                id: TypewriterId::body(0, 0),
                upto: 0,
            },
            dark(),
            active(),
        );
        assert_eq!(state.sections[0].body.members()[0].revealed(), 1);
    }
}
