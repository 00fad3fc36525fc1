//! Interactive dismissal core for half-sheet presentations.
//!
//! A half sheet slides up over existing content and can be dismissed by a
//! tap outside it or by dragging it down past a commit threshold. The drag
//! is synchronized with an embedded scrollable region so that overscrolling
//! a list inside the sheet also pulls the sheet itself.
//!
//! This crate is the state machine only. The view transport, the animation
//! curves, and the haptic hardware live behind the capability traits in
//! [`capability`]; the controller drives them and never owns them.

pub mod breakpoint;
pub mod capability;
pub mod compensator;
pub mod controller;
pub mod gesture;
pub mod velocity;

pub use breakpoint::{BreakpointPolicy, SettleOutcome, DISMISS_BREAKPOINT};
pub use capability::{
    AuxiliaryTransitionStyle, DismissMethod, HapticEngine, NoopHaptics, PresentationLifecycle,
    PresentationStyle, PresentedContent, ScrollRegion, SurfaceTransforms, TransitionAnimator,
};
pub use compensator::{CompensationEffect, ScrollCompensator};
pub use controller::{InteractionMode, ObservationHandle, TransitionController};
pub use gesture::{dismissal_progress, GesturePhase, GestureSample, VerticalPanRecognizer};
pub use velocity::VelocityTracker;

pub mod prelude {
    pub use crate::breakpoint::{BreakpointPolicy, SettleOutcome, DISMISS_BREAKPOINT};
    pub use crate::capability::{
        AuxiliaryTransitionStyle, DismissMethod, HapticEngine, NoopHaptics,
        PresentationLifecycle, PresentationStyle, PresentedContent, ScrollRegion,
        SurfaceTransforms, TransitionAnimator,
    };
    pub use crate::controller::{InteractionMode, ObservationHandle, TransitionController};
    pub use crate::gesture::{dismissal_progress, GesturePhase, GestureSample, VerticalPanRecognizer};
}
