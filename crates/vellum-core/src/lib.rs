//! Core vellum library (layout, timing, content, config).
//!
//! Everything in this crate is pure and UI-free: the TUI layer drives it
//! with events and renders whatever it computes.

pub mod config;
pub mod content;
pub mod geometry;
pub mod text;
pub mod timing;
