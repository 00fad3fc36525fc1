//! Harness wiring and a scripted pointer robot.

use std::cell::Cell;
use std::rc::Rc;

use halfsheet_core::{
    BreakpointPolicy, ObservationHandle, PresentedContent, TransitionController,
    VerticalPanRecognizer,
};

use crate::fakes::{
    RecordingAnimator, RecordingHaptics, RecordingLifecycle, RecordingSurfaces, TestContent,
    TraceLog,
};

/// A fully wired controller plus all of its recording collaborators.
pub struct SheetHarness {
    pub controller: TransitionController,
    pub content: Rc<TestContent>,
    pub animator: Rc<RecordingAnimator>,
    pub haptics: Rc<RecordingHaptics>,
    pub lifecycle: Rc<RecordingLifecycle>,
    pub surfaces: Rc<RecordingSurfaces>,
    pub trace: TraceLog,
    pub observation_cancelled: Rc<Cell<bool>>,
    pub dismissed_count: Rc<Cell<u32>>,
}

impl SheetHarness {
    pub fn present(content: TestContent) -> Self {
        Self::present_with_policy(content, BreakpointPolicy::default())
    }

    pub fn present_with_policy(content: TestContent, policy: BreakpointPolicy) -> Self {
        let trace = TraceLog::new();
        let content = Rc::new(content);
        let animator = Rc::new(RecordingAnimator::new(trace.clone()));
        let haptics = Rc::new(RecordingHaptics::new(trace.clone()));
        let lifecycle = Rc::new(RecordingLifecycle::new(trace.clone()));
        let surfaces = Rc::new(RecordingSurfaces::new());

        let content_dyn: Rc<dyn PresentedContent> = content.clone();
        let lifecycle_dyn: Rc<dyn halfsheet_core::PresentationLifecycle> = lifecycle.clone();
        let controller = TransitionController::attach_with_policy(
            &content_dyn,
            &lifecycle_dyn,
            animator.clone(),
            haptics.clone(),
            surfaces.clone(),
            policy,
        );

        let dismissed_count = Rc::new(Cell::new(0u32));
        {
            let dismissed_count = dismissed_count.clone();
            controller.on_dismissed(move || dismissed_count.set(dismissed_count.get() + 1));
        }

        let observation_cancelled = Rc::new(Cell::new(false));
        {
            let observation_cancelled = observation_cancelled.clone();
            controller.did_present(ObservationHandle::new(move || {
                observation_cancelled.set(true);
            }));
        }

        Self {
            controller,
            content,
            animator,
            haptics,
            lifecycle,
            surfaces,
            trace,
            observation_cancelled,
            dismissed_count,
        }
    }

    /// Simulate the animator boundary reporting completion.
    pub fn complete_animation(&self) {
        self.controller.animation_completed();
    }
}

/// Scripted pointer driver feeding a [`VerticalPanRecognizer`] into the
/// controller, mirroring how a platform integration dispatches events.
///
/// After every forwarded sample the robot syncs the recognizer's enabled
/// flag with the controller, the way the integration disables the platform
/// recognizer after an early commit.
pub struct SheetRobot {
    controller: TransitionController,
    recognizer: VerticalPanRecognizer,
    time_ms: i64,
    y: f32,
}

impl SheetRobot {
    pub fn new(controller: TransitionController, source_height: f32) -> Self {
        Self {
            controller,
            recognizer: VerticalPanRecognizer::new(source_height),
            time_ms: 0,
            y: 0.0,
        }
    }

    pub fn press(&mut self, y: f32) {
        self.advance(16);
        self.y = y;
        self.recognizer.pointer_down(self.time_ms, y);
    }

    pub fn drag_by(&mut self, dy: f32, dt_ms: i64) {
        self.advance(dt_ms);
        self.y += dy;
        if let Some(sample) = self.recognizer.pointer_move(self.time_ms, self.y) {
            self.controller.handle_pan(sample);
            self.sync_enabled();
        }
    }

    pub fn release(&mut self) {
        self.advance(16);
        if let Some(sample) = self.recognizer.pointer_up(self.time_ms, self.y) {
            self.controller.handle_pan(sample);
            self.sync_enabled();
        }
    }

    pub fn cancel_pointer(&mut self) {
        if let Some(sample) = self.recognizer.pointer_cancel() {
            self.controller.handle_pan(sample);
            self.sync_enabled();
        }
    }

    pub fn tap_outside(&mut self) {
        self.advance(16);
        self.controller.handle_tap();
    }

    pub fn scroll_to(&mut self, offset_y: f32) {
        self.advance(16);
        self.controller.scroll_offset_changed(offset_y);
    }

    fn advance(&mut self, dt_ms: i64) {
        self.time_ms += dt_ms;
    }

    fn sync_enabled(&mut self) {
        self.recognizer
            .set_enabled(self.controller.gestures_enabled());
    }
}
