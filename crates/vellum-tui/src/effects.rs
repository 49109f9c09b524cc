//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates state and returns effects; scheduling, raster
//! work, and process exit all happen in the runtime. This keeps every state
//! transition testable without a terminal or a clock.

use std::time::Duration;

use crate::events::{ColorScheme, TimerEvent, TypewriterId};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Fire `event` after `after` has elapsed.
    ///
    /// The runtime pushes this onto its timer queue. Nothing is ever
    /// cancelled; the receiving handler re-checks state instead.
    Schedule { after: Duration, event: TimerEvent },

    /// Rasterize the fully-revealed layout of one typewriter into a
    /// snapshot under the given scheme, then deliver `SnapshotReady`.
    CaptureSnapshot {
        id: TypewriterId,
        scheme: ColorScheme,
    },

    /// The walkthrough confirmed its final section. Emitted exactly once.
    Finished,
}

impl UiEffect {
    /// Convenience for scheduling from fractional seconds, the unit the
    /// duration model works in. Negative inputs clamp to zero.
    pub fn schedule_secs(after: f64, event: TimerEvent) -> UiEffect {
        UiEffect::Schedule {
            after: Duration::from_secs_f64(after.max(0.0)),
            event,
        }
    }
}
