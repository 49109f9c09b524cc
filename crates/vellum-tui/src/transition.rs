//! Transition descriptors.
//!
//! The engine does not interpolate anything itself. State changes meant to
//! animate carry one of these descriptors so a rendering layer capable of
//! tweening can apply it. The terminal renderer snaps; the reducers log the
//! suggestion when the change commits.

/// A suggested transition for a committed state change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Response/damping spring.
    Spring {
        response: f32,
        damping_fraction: f32,
        blend: f32,
    },
    /// Physical spring, parameterized by mass and stiffness.
    InterpolatingSpring {
        mass: f32,
        stiffness: f32,
        damping: f32,
        initial_velocity: f32,
    },
}

/// Committed paging index changes.
pub const PAGING: Transition = Transition::Spring {
    response: 0.5,
    damping_fraction: 0.86,
    blend: 0.25,
};

/// Live drag offset tracking and spring-back of aborted drags.
pub const INTERACTIVE_PAGING: Transition = Transition::Spring {
    response: 0.4,
    damping_fraction: 0.9,
    blend: 0.1,
};

/// Per-element typewriter reveal.
pub const TYPEWRITER: Transition = Transition::InterpolatingSpring {
    mass: 2.0,
    stiffness: 400.0,
    damping: 25.0,
    initial_velocity: 0.75,
};

/// Control (continue / fast-forward) appearance.
pub const BUTTON_APPEAR: Transition = Transition::InterpolatingSpring {
    mass: 2.0,
    stiffness: 200.0,
    damping: 50.0,
    initial_velocity: 0.0,
};
