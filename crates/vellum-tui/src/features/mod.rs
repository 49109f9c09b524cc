//! Feature slices for the TUI (state/update/render per slice).

pub mod paging;
pub mod typewriter;
pub mod walkthrough;
