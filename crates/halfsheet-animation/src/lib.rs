//! Concrete animator for the half-sheet dismissal transition.
//!
//! The core drives an opaque animator boundary (`update` / `finish` /
//! `cancel`); this crate supplies one that tweens the remaining progress
//! with an easing curve off a frame-callback clock. Tests drain the clock
//! manually, so nothing here reads wall time.

pub mod animator;
pub mod clock;
pub mod easing;

pub use animator::ProgressAnimator;
pub use clock::{FrameCallbackRegistration, FrameClock};
pub use easing::{AnimationSpec, Easing};

pub mod prelude {
    pub use crate::animator::ProgressAnimator;
    pub use crate::clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::easing::{AnimationSpec, Easing};
}
