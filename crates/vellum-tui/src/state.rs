//! Application state composition.
//!
//! ```text
//! AppState
//! ├── walkthrough: WalkthroughState   (sections, paging, progress)
//! ├── scheme: ColorScheme             (snapshot rendering conditions)
//! ├── lifecycle: LifecyclePhase       (focus-driven capture gating)
//! └── frame: (u16, u16)               (terminal size, refreshed per loop)
//! ```

use vellum_core::config::Tuning;
use vellum_core::content::Script;
use vellum_core::geometry::Axis;

use crate::events::{ColorScheme, LifecyclePhase};
use crate::features::walkthrough::WalkthroughState;

/// Combined application state.
pub struct AppState {
    pub walkthrough: WalkthroughState,
    pub scheme: ColorScheme,
    pub lifecycle: LifecyclePhase,
    /// Terminal size from the most recent frame event.
    pub frame: (u16, u16),
    pub should_quit: bool,
}

impl AppState {
    pub fn new(script: Script, tuning: Tuning, scheme: ColorScheme, axis: Axis) -> AppState {
        AppState {
            walkthrough: WalkthroughState::new(script, tuning, axis),
            scheme,
            lifecycle: LifecyclePhase::Active,
            frame: (0, 0),
            should_quit: false,
        }
    }

    /// Reading-column width under the current terminal size, shared by the
    /// renderer and the drag commit math.
    pub fn content_width(&self) -> f32 {
        f32::from(self.frame.0).min(self.walkthrough.tuning.text_content_max_width)
    }
}
