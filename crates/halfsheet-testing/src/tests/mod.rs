mod state_machine_tests;

use halfsheet_core::{GesturePhase, GestureSample};

/// Pan surface height shared by the suites.
pub(crate) const SOURCE_HEIGHT: f32 = 600.0;

pub(crate) fn began(velocity_y: f32) -> GestureSample {
    sample(GesturePhase::Began, 0.0, velocity_y)
}

pub(crate) fn changed(translation_y: f32) -> GestureSample {
    sample(GesturePhase::Changed, translation_y, 300.0)
}

pub(crate) fn ended(translation_y: f32) -> GestureSample {
    sample(GesturePhase::Ended, translation_y, 0.0)
}

pub(crate) fn sample(phase: GesturePhase, translation_y: f32, velocity_y: f32) -> GestureSample {
    GestureSample {
        translation_y,
        velocity_y,
        phase,
        source_height: SOURCE_HEIGHT,
    }
}
