//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects.

use ratatui::Frame;

use crate::features::walkthrough::render as walkthrough;
use crate::state::AppState;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    walkthrough::render(&app.walkthrough, app.scheme, area, frame.buffer_mut());
}
