//! TUI runtime - owns terminal, timer queue, event loop, effect execution.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//! Delayed work lives in a [`TimerQueue`] drained at the top of every loop
//! iteration, so the whole engine runs on one thread with no async runtime.

mod timers;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
pub use timers::TimerQueue;
use vellum_core::config::Tuning;
use vellum_core::content::Script;
use vellum_core::geometry::Axis;

use crate::effects::UiEffect;
use crate::events::{ColorScheme, UiEvent};
use crate::features::walkthrough::update as walkthrough;
use crate::snapshot::{BufferRasterizer, Rasterizer};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while anything is animating (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle (no pending timers, no interaction). Longer
/// timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type FinishedCallback = Box<dyn FnOnce()>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop or panic.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    timers: TimerQueue,
    rasterizer: BufferRasterizer,
    /// Invoked at most once, when the walkthrough is confirmed complete.
    on_finished: Option<FinishedCallback>,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received (for fast polling during
    /// interaction).
    last_terminal_event: Instant,
}

impl Runtime {
    pub fn new(
        script: Script,
        tuning: Tuning,
        scheme: ColorScheme,
        axis: Axis,
        on_finished: FinishedCallback,
    ) -> Result<Runtime> {
        // Set up the panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let now = Instant::now();
        Ok(Runtime {
            terminal,
            state: AppState::new(script, tuning, scheme, axis),
            timers: TimerQueue::new(),
            rasterizer: BufferRasterizer::default(),
            on_finished: Some(on_finished),
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::on_mount(&mut self.state);
        self.execute_effects(effects);
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Prepend Frame with the current terminal size so layout-dependent
            // handlers see it before anything else.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }

                // Only Tick triggers a render, capping the frame rate at the
                // tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Drains due timers, polls the terminal until the next tick or timer
    /// deadline, and emits Tick at the chosen cadence.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while anything is in flight: pending timers (text is
        // writing), a live drag, or recent input. Slow otherwise.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = !self.timers.is_empty()
            || self.state.walkthrough.paging.is_dragging()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let now = Instant::now();
        while let Some(timer) = self.timers.pop_due(now) {
            events.push(UiEvent::Timer(timer));
        }

        // Block until the next tick is due, but wake early for the soonest
        // timer so reveals land on time.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            match self.timers.next_deadline() {
                Some(deadline) => {
                    time_until_tick.min(deadline.saturating_duration_since(Instant::now()))
                }
                None => time_until_tick,
            }
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking).
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Schedule { after, event } => {
                self.timers.schedule(after, event);
            }
            UiEffect::CaptureSnapshot { id, scheme } => {
                let max_width = Some(self.state.content_width());
                if let Some((glyphs, size)) =
                    walkthrough::completed_glyphs(&self.state.walkthrough, id, max_width)
                {
                    let snapshot = self.rasterizer.rasterize(&glyphs, size, scheme);
                    self.dispatch_event(UiEvent::SnapshotReady { id, snapshot });
                }
            }
            UiEffect::Finished => {
                if let Some(on_finished) = self.on_finished.take() {
                    on_finished();
                }
                self.state.should_quit = true;
            }
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
