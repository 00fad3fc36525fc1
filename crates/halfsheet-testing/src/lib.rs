//! Test doubles and scripted drivers for the half-sheet dismissal core.
//!
//! Every collaborator trait gets a recording fake, all of them feeding one
//! chronological [`TraceLog`] so tests can assert cross-collaborator
//! ordering (haptic cue before animator instruction, and so on). The
//! [`robot`] module adds a scripted pointer driver that exercises the
//! recognizer → controller path the way a platform integration would.

pub mod fakes;
pub mod robot;

pub use fakes::{
    RecordingAnimator, RecordingHaptics, RecordingLifecycle, RecordingSurfaces, TestContent,
    TestScrollRegion, TraceLog,
};
pub use robot::{SheetHarness, SheetRobot};

#[cfg(test)]
mod tests;
