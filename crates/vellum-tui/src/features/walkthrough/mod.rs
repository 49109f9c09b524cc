//! Walkthrough sequencer: chained typewriter sections behind an
//! interactive paging stack.

pub mod render;
pub mod state;
pub mod update;

pub use state::{SectionState, WalkthroughState};
