//! Paging stack: sequential layout along one axis plus the drag-driven
//! index controller.

pub mod interactive;
pub mod layout;

pub use interactive::{Drag, InteractivePaging, PageCommit, OUT_OF_BOUNDS_RESISTANCE};
pub use layout::{PagingLayout, Proposal};
