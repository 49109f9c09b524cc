//! Top-level reducer.
//!
//! All state mutation happens here; the runtime calls `update(app, event)`
//! and executes the returned effects. Walkthrough-specific transitions live
//! in the feature slice, this file routes input and lifecycle to them.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use vellum_core::geometry::Axis;

use crate::effects::UiEffect;
use crate::events::{LifecyclePhase, UiEvent};
use crate::features::walkthrough::update as walkthrough;
use crate::state::AppState;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Frame { width, height } => {
            app.frame = (width, height);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, &event),
        UiEvent::Timer(timer) => {
            walkthrough::handle_timer(&mut app.walkthrough, timer, app.scheme, app.lifecycle)
        }
        UiEvent::SnapshotReady { id, snapshot } => {
            walkthrough::snapshot_ready(&mut app.walkthrough, id, snapshot);
            vec![]
        }
        UiEvent::Tick => vec![],
    }
}

/// First presentation, called once by the runtime before the loop.
pub fn on_mount(app: &mut AppState) -> Vec<UiEffect> {
    walkthrough::on_mount(&mut app.walkthrough)
}

fn handle_terminal_event(app: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::FocusGained => {
            app.lifecycle = LifecyclePhase::Active;
            walkthrough::foreground(&mut app.walkthrough, app.scheme)
        }
        Event::FocusLost => {
            app.lifecycle = LifecyclePhase::Background;
            vec![]
        }
        // Size is re-read at the top of every loop iteration.
        Event::Resize(..) | Event::Paste(_) => vec![],
    }
}

fn handle_key(app: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            vec![UiEffect::Quit]
        }
        KeyCode::Enter => walkthrough::continue_pressed(&mut app.walkthrough),
        KeyCode::Char('f') => {
            walkthrough::fast_forward_pressed(&mut app.walkthrough, app.scheme, app.lifecycle)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            walkthrough::page_back(&mut app.walkthrough);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            walkthrough::page_forward(&mut app.walkthrough);
            vec![]
        }
        KeyCode::Char('d') => {
            app.scheme = app.scheme.toggled();
            walkthrough::scheme_changed(&mut app.walkthrough, app.scheme, app.lifecycle)
        }
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: &MouseEvent) -> Vec<UiEffect> {
    let position = match app.walkthrough.paging.axis {
        Axis::Horizontal => f32::from(mouse.column),
        Axis::Vertical => f32::from(mouse.row),
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.walkthrough.paging.begin_drag(position);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.walkthrough.paging.drag_moved(position);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let content_width = app.content_width();
            walkthrough::drag_ended(&mut app.walkthrough, Some(content_width));
        }
        _ => {}
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseEventKind};
    use vellum_core::config::Tuning;
    use vellum_core::content::Script;

    use crate::events::{ColorScheme, TimerEvent};

    use super::*;

    fn app() -> AppState {
        let mut app = AppState::new(
            Script::builtin(),
            Tuning::default(),
            ColorScheme::Dark,
            Axis::Vertical,
        );
        app.frame = (80, 24);
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> UiEvent {
        UiEvent::Terminal(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(update(&mut app, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);
        assert!(app.should_quit);

        let mut app = self::app();
        assert_eq!(update(&mut app, key(KeyCode::Esc)), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_frame_event_stores_size() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Frame {
                width: 120,
                height: 40,
            },
        );
        assert_eq!(app.frame, (120, 40));
    }

    #[test]
    fn test_fast_forward_key_completes_walkthrough() {
        let mut app = app();
        on_mount(&mut app);
        update(&mut app, key(KeyCode::Char('f')));
        assert!(app.walkthrough.fast_forward);
        assert!(app.walkthrough.continue_visible);
    }

    #[test]
    fn test_enter_confirms_visible_continue() {
        let mut app = app();
        on_mount(&mut app);
        update(&mut app, key(KeyCode::Char('f')));

        // Move to the final section and confirm it.
        app.walkthrough.paging.index = app.walkthrough.section_count() - 1;
        let effects = update(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![UiEffect::Finished]);
    }

    #[test]
    fn test_scheme_toggle_flips_and_recaptures() {
        use ratatui::buffer::Buffer;

        use crate::snapshot::Snapshot;

        let mut app = app();
        on_mount(&mut app);
        let captures = update(&mut app, key(KeyCode::Char('f')));

        // Service the capture requests the way the runtime would.
        for effect in captures {
            if let UiEffect::CaptureSnapshot { id, scheme } = effect {
                let snapshot = Snapshot {
                    buffer: Buffer::empty(ratatui::layout::Rect::new(0, 0, 1, 1)),
                    scale: 1.0,
                    scheme,
                };
                update(&mut app, UiEvent::SnapshotReady { id, snapshot });
            }
        }

        let effects = update(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.scheme, ColorScheme::Light);
        // Every installed snapshot is invalidated and re-captured under the
        // new scheme.
        assert!(effects
            .iter()
            .all(|effect| matches!(effect, UiEffect::CaptureSnapshot { .. })));
        assert!(!effects.is_empty());
    }

    #[test]
    fn test_mouse_drag_moves_the_stack() {
        let mut app = app();
        on_mount(&mut app);
        update(&mut app, key(KeyCode::Char('f')));

        update(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 10, 20));
        update(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 12));
        assert!(app.walkthrough.paging.is_dragging());
        assert_eq!(app.walkthrough.paging.live_offset(), -8.0);

        update(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 10, 12));
        assert!(!app.walkthrough.paging.is_dragging());
    }

    #[test]
    fn test_focus_drives_lifecycle() {
        let mut app = app();
        update(&mut app, UiEvent::Terminal(Event::FocusLost));
        assert_eq!(app.lifecycle, LifecyclePhase::Background);
        update(&mut app, UiEvent::Terminal(Event::FocusGained));
        assert_eq!(app.lifecycle, LifecyclePhase::Active);
    }

    #[test]
    fn test_timer_events_route_to_walkthrough() {
        let mut app = app();
        on_mount(&mut app);
        update(
            &mut app,
            UiEvent::Timer(TimerEvent::ShowContinue { section: 0 }),
        );
        assert!(app.walkthrough.continue_visible);
    }
}
