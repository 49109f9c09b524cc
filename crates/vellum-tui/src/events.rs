//! UI event types.
//!
//! Everything the reducer reacts to arrives as a [`UiEvent`]. Delayed work
//! is a [`TimerEvent`] scheduled through `UiEffect::Schedule`; each variant
//! carries enough context for the reducer to detect that state has moved on
//! and turn the firing into a no-op. There is no timer cancellation.

use crossterm::event::Event;

use crate::snapshot::Snapshot;

/// Identifies one typewriter controller within the walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypewriterId {
    /// Index of the owning walkthrough section.
    pub section: usize,
    /// Which text of the section this is.
    pub slot: TextSlot,
}

impl TypewriterId {
    pub fn title(section: usize) -> TypewriterId {
        TypewriterId {
            section,
            slot: TextSlot::Title,
        }
    }

    pub fn body(section: usize, paragraph: usize) -> TypewriterId {
        TypewriterId {
            section,
            slot: TextSlot::Body(paragraph),
        }
    }

    pub fn body_stack(section: usize) -> TypewriterId {
        TypewriterId {
            section,
            slot: TextSlot::BodyStack,
        }
    }
}

/// A text slot within a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSlot {
    /// The section title typewriter.
    Title,
    /// One body paragraph within the section's stack.
    Body(usize),
    /// The paragraph stack as a whole (stack-level deadline and snapshot).
    BodyStack,
}

/// Scheduled callbacks. Fired by the runtime's timer queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Reveal the element at `upto` of one typewriter and chain the next.
    Reveal { id: TypewriterId, upto: usize },
    /// Natural completion deadline of a standalone typewriter.
    WriteDeadline { id: TypewriterId },
    /// Completion deadline of a whole paragraph stack.
    StackDeadline { section: usize },
    /// Show the continue control for `section` (if still the frontier).
    ShowContinue { section: usize },
    /// Show the fast-forward control.
    ShowFastForward,
    /// Advance the frontier after the continue control's settle delay.
    AdvanceFrontier { from: usize },
}

/// Foreground/background lifecycle, driven by terminal focus events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    Active,
    Background,
}

/// Color scheme snapshots are rendered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Dark,
    Light,
}

impl ColorScheme {
    pub fn toggled(self) -> ColorScheme {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Current terminal size, prepended every loop iteration.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// A scheduled callback came due.
    Timer(TimerEvent),
    /// A rasterized snapshot is ready to install.
    SnapshotReady {
        id: TypewriterId,
        snapshot: Snapshot,
    },
    /// Render cadence tick.
    Tick,
}
