//! Terminal front end for the vellum typewriter walkthrough engine.
//!
//! Architecture follows an Elm-style split: a pure reducer
//! ([`update::update`]) mutates [`state::AppState`] and returns
//! [`effects::UiEffect`]s; the [`runtime`] owns the terminal, the timer
//! queue, and executes effects. All delayed work is a scheduled
//! [`events::TimerEvent`] that re-checks state when it fires, so stale
//! timers are safe no-ops.

pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod snapshot;
pub mod state;
pub mod terminal;
pub mod transition;
pub mod update;

use anyhow::Result;
pub use runtime::Runtime;
use vellum_core::config::Tuning;
use vellum_core::content::Script;
use vellum_core::geometry::Axis;

use crate::events::ColorScheme;

/// Runs a walkthrough to completion (or until the user quits).
///
/// `on_finished` is invoked exactly once if the user confirms the final
/// section; quitting early skips it.
pub fn run_walkthrough(
    script: Script,
    tuning: Tuning,
    scheme: ColorScheme,
    axis: Axis,
    on_finished: impl FnOnce() + 'static,
) -> Result<()> {
    let mut runtime = Runtime::new(script, tuning, scheme, axis, Box::new(on_finished))?;
    runtime.run()
}
