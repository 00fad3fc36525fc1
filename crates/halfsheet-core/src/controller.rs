//! The interactive-dismissal state machine.
//!
//! One controller per presentation. It fuses three event sources — the
//! full-surface pan, the content pan, and scroll-offset changes — into a
//! single progress signal, decides commit/cancel by distance, and sequences
//! haptic and animator side effects. Everything runs on one thread; within
//! a callback the progress update, threshold check, haptic cue, and
//! animator instruction are applied synchronously, and a haptic cue always
//! precedes its paired animator or lifecycle instruction.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::breakpoint::{BreakpointPolicy, SettleOutcome};
use crate::capability::{
    AuxiliaryTransitionStyle, HapticEngine, PresentationLifecycle, PresentationStyle,
    PresentedContent, SurfaceTransforms, TransitionAnimator,
};
use crate::compensator::{CompensationEffect, ScrollCompensator};
use crate::gesture::{dismissal_progress, GesturePhase, GestureSample};

/// Current interaction state. Exactly one is active; owned exclusively by
/// the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    InteractiveDrag,
    Settling(SettleOutcome),
}

/// Cancellable registration for the scroll-offset observation.
///
/// The integration layer builds one around whatever unsubscribes its
/// observer; the controller consumes it when the observation must stop
/// delivering (dismissal completion, teardown).
pub struct ObservationHandle {
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl ObservationHandle {
    pub fn new(on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(on_cancel) = self.on_cancel.take() {
            on_cancel();
        }
    }
}

struct Inner {
    mode: InteractionMode,
    /// Cleared after an early commit so late gesture events are inert.
    gestures_enabled: bool,
    /// Closed synchronously at drag begin; reopened when a cancelled
    /// settle returns to idle.
    scroll_delivery_open: bool,
    /// A non-interactive dismissal (tap path) is in flight while the mode
    /// is still `Idle`.
    dismissing: bool,
    torn_down: bool,
    content: Weak<dyn PresentedContent>,
    lifecycle: Weak<dyn PresentationLifecycle>,
    animator: Rc<dyn TransitionAnimator>,
    haptics: Rc<dyn HapticEngine>,
    compensator: ScrollCompensator,
    policy: BreakpointPolicy,
    observation: Option<ObservationHandle>,
    on_dismissed: Option<Box<dyn FnOnce()>>,
}

/// Cloneable handle over the per-presentation state machine.
///
/// Decisions are made while the state cell is borrowed; collaborator calls
/// happen after the borrow is released, so a collaborator that calls back
/// into the controller never observes a held borrow.
#[derive(Clone)]
pub struct TransitionController {
    inner: Rc<RefCell<Inner>>,
}

impl TransitionController {
    /// Attach a controller to presented content and its collaborators with
    /// the default breakpoint policy.
    ///
    /// # Panics
    ///
    /// Panics if the content does not declare
    /// [`PresentationStyle::Custom`]; that is integration misuse, not a
    /// runtime condition.
    pub fn attach(
        content: &Rc<dyn PresentedContent>,
        lifecycle: &Rc<dyn PresentationLifecycle>,
        animator: Rc<dyn TransitionAnimator>,
        haptics: Rc<dyn HapticEngine>,
        surfaces: Rc<dyn SurfaceTransforms>,
    ) -> Self {
        Self::attach_with_policy(
            content,
            lifecycle,
            animator,
            haptics,
            surfaces,
            BreakpointPolicy::default(),
        )
    }

    pub fn attach_with_policy(
        content: &Rc<dyn PresentedContent>,
        lifecycle: &Rc<dyn PresentationLifecycle>,
        animator: Rc<dyn TransitionAnimator>,
        haptics: Rc<dyn HapticEngine>,
        surfaces: Rc<dyn SurfaceTransforms>,
        policy: BreakpointPolicy,
    ) -> Self {
        assert!(
            content.presentation_style() == PresentationStyle::Custom,
            "half-sheet content must declare the custom presentation style"
        );

        let auxiliary_slides =
            content.auxiliary_transition() == Some(AuxiliaryTransitionStyle::Slide);
        let compensator =
            ScrollCompensator::new(surfaces, auxiliary_slides, policy.breakpoint());

        Self {
            inner: Rc::new(RefCell::new(Inner {
                mode: InteractionMode::Idle,
                gestures_enabled: true,
                scroll_delivery_open: false,
                dismissing: false,
                torn_down: false,
                content: Rc::downgrade(content),
                lifecycle: Rc::downgrade(lifecycle),
                animator,
                haptics,
                compensator,
                policy,
                observation: None,
                on_dismissed: None,
            })),
        }
    }

    /// The presentation finished appearing; scroll-offset delivery starts
    /// here with a cancellable registration.
    pub fn did_present(&self, observation: ObservationHandle) {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("did_present after teardown; cancelling the observation");
                drop(inner);
                observation.cancel();
                return;
            }
            let previous = inner.observation.replace(observation);
            inner.scroll_delivery_open = true;
            previous
        };
        // A repeated did_present supersedes the prior registration; release
        // it so the old observer unsubscribes.
        if let Some(previous) = previous {
            previous.cancel();
        }
    }

    /// Register the exactly-once completion callback.
    pub fn on_dismissed(&self, callback: impl FnOnce() + 'static) {
        self.inner.borrow_mut().on_dismissed = Some(Box::new(callback));
    }

    pub fn mode(&self) -> InteractionMode {
        self.inner.borrow().mode
    }

    /// Whether gesture intake is currently enabled. Mirrors the platform
    /// recognizer's enabled flag after an early commit.
    pub fn gestures_enabled(&self) -> bool {
        self.inner.borrow().gestures_enabled
    }

    /// One pan sample from either the full-surface or the content gesture.
    pub fn handle_pan(&self, sample: GestureSample) {
        match sample.phase {
            GesturePhase::Began => self.pan_began(sample),
            GesturePhase::Changed => self.pan_changed(sample),
            GesturePhase::Ended | GesturePhase::Cancelled => self.pan_ended(sample),
        }
    }

    fn pan_began(&self, sample: GestureSample) {
        let (haptics, lifecycle) = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("pan sample delivered after teardown");
                return;
            }
            if !inner.gestures_enabled
                || inner.dismissing
                || inner.mode != InteractionMode::Idle
            {
                return;
            }
            // Only a downward start may begin a dismissal.
            if sample.velocity_y <= 0.0 {
                return;
            }
            let Some(content) = inner.content.upgrade() else {
                return;
            };
            if !content.dismiss_method().allow_swipe {
                log::debug!("pan dropped: swipe-to-dismiss disallowed");
                return;
            }
            if content
                .scroll_region()
                .is_some_and(|region| region.is_scrolling())
            {
                log::debug!("pan dropped: scroll region is scrolling");
                return;
            }

            // Late scroll callbacks are inert from here on.
            inner.scroll_delivery_open = false;
            inner.mode = InteractionMode::InteractiveDrag;
            (inner.haptics.clone(), inner.lifecycle.upgrade())
        };

        // Haptic cue strictly precedes the animator-facing instruction.
        haptics.prepare();
        if let Some(lifecycle) = lifecycle {
            lifecycle.begin_interactive_dismiss();
        }
    }

    fn pan_changed(&self, sample: GestureSample) {
        enum Step {
            Track(f32),
            EarlyCommit(f32),
        }

        let (step, animator, haptics) = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("pan sample delivered after teardown");
                return;
            }
            if !inner.gestures_enabled || inner.mode != InteractionMode::InteractiveDrag {
                return;
            }

            let progress = dismissal_progress(sample.translation_y, sample.source_height);
            let step = if sample.translation_y.max(0.0) >= inner.policy.breakpoint() {
                // Early release: commit mid-gesture and stop listening to
                // this recognizer.
                inner.gestures_enabled = false;
                inner.mode = InteractionMode::Settling(SettleOutcome::Commit);
                Step::EarlyCommit(progress)
            } else {
                Step::Track(progress)
            };
            (step, inner.animator.clone(), inner.haptics.clone())
        };

        match step {
            Step::Track(progress) => animator.update(progress),
            Step::EarlyCommit(progress) => {
                animator.update(progress);
                haptics.impact();
                animator.finish();
            }
        }
    }

    fn pan_ended(&self, sample: GestureSample) {
        let (outcome, animator, haptics) = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("pan sample delivered after teardown");
                return;
            }
            // Already settled by an early commit, or never began.
            if !inner.gestures_enabled || inner.mode != InteractionMode::InteractiveDrag {
                return;
            }

            let outcome = inner
                .policy
                .decide(sample.translation_y, sample.source_height);
            inner.mode = InteractionMode::Settling(outcome);
            if outcome == SettleOutcome::Commit {
                inner.gestures_enabled = false;
            }
            (outcome, inner.animator.clone(), inner.haptics.clone())
        };

        match outcome {
            SettleOutcome::Commit => {
                haptics.impact();
                animator.finish();
            }
            SettleOutcome::Cancel => animator.cancel(),
        }
    }

    /// A tap outside the sheet. Bypasses interactive tracking entirely:
    /// the animator plays its full dismissal and the mode stays `Idle`
    /// until completion arrives.
    pub fn handle_tap(&self) {
        let lifecycle = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("tap delivered after teardown");
                return;
            }
            if inner.dismissing || inner.mode != InteractionMode::Idle {
                return;
            }
            let Some(content) = inner.content.upgrade() else {
                return;
            };
            if !content.dismiss_method().allow_tap {
                log::debug!("tap dropped: tap-to-dismiss disallowed");
                return;
            }
            if content
                .scroll_region()
                .is_some_and(|region| region.is_scrolling())
            {
                log::debug!("tap dropped: scroll region is scrolling");
                return;
            }

            inner.dismissing = true;
            inner.scroll_delivery_open = false;
            inner.lifecycle.upgrade()
        };

        if let Some(lifecycle) = lifecycle {
            lifecycle.begin_non_interactive_dismiss();
        }
    }

    /// A content-offset change from the embedded scroll region. Active only
    /// while idle; overscroll past the top pulls the sheet, and pulling
    /// past the breakpoint dismisses without entering the gesture states.
    pub fn scroll_offset_changed(&self, offset_y: f32) {
        let (compensator, top_inset) = {
            let inner = self.inner.borrow();
            if inner.torn_down {
                log::warn!("scroll offset delivered after teardown");
                return;
            }
            if !inner.scroll_delivery_open
                || inner.dismissing
                || inner.mode != InteractionMode::Idle
            {
                return;
            }
            let Some(region) = inner.content.upgrade().and_then(|c| c.scroll_region()) else {
                return;
            };
            (inner.compensator.clone(), region.top_inset())
        };

        if compensator.offset_changed(offset_y, top_inset) != CompensationEffect::BreakpointCrossed
        {
            return;
        }

        // Breakpoint crossed via the scroll path: release the observation
        // before requesting dismissal so the teardown cannot re-enter a
        // live callback chain.
        let (observation, haptics, lifecycle) = {
            let mut inner = self.inner.borrow_mut();
            // The transform writes above may have re-entered the controller
            // (a surface callback tapping or tearing down); re-check the
            // full guard, not just the mode.
            if inner.torn_down || inner.dismissing || inner.mode != InteractionMode::Idle {
                return;
            }
            inner.scroll_delivery_open = false;
            inner.gestures_enabled = false;
            inner.mode = InteractionMode::Settling(SettleOutcome::Commit);
            (
                inner.observation.take(),
                inner.haptics.clone(),
                inner.lifecycle.upgrade(),
            )
        };

        if let Some(observation) = observation {
            observation.cancel();
        }
        haptics.impact();
        if let Some(lifecycle) = lifecycle {
            lifecycle.begin_non_interactive_dismiss();
        }
    }

    /// Completion notification from the animator boundary, fired once per
    /// settle (commit or cancel) and once for a non-interactive dismissal.
    pub fn animation_completed(&self) {
        enum Conclusion {
            BackToIdle(ScrollCompensator),
            Dismissed {
                observation: Option<ObservationHandle>,
                on_dismissed: Option<Box<dyn FnOnce()>>,
            },
        }

        let conclusion = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                log::warn!("animation completion after teardown");
                return;
            }
            match inner.mode {
                InteractionMode::Settling(SettleOutcome::Cancel) => {
                    inner.mode = InteractionMode::Idle;
                    inner.gestures_enabled = true;
                    inner.scroll_delivery_open = inner.observation.is_some();
                    Conclusion::BackToIdle(inner.compensator.clone())
                }
                InteractionMode::Settling(SettleOutcome::Commit) => {
                    inner.torn_down = true;
                    Conclusion::Dismissed {
                        observation: inner.observation.take(),
                        on_dismissed: inner.on_dismissed.take(),
                    }
                }
                InteractionMode::Idle if inner.dismissing => {
                    inner.torn_down = true;
                    Conclusion::Dismissed {
                        observation: inner.observation.take(),
                        on_dismissed: inner.on_dismissed.take(),
                    }
                }
                mode => {
                    log::warn!("animation completion in unexpected state {mode:?}");
                    return;
                }
            }
        };

        match conclusion {
            Conclusion::BackToIdle(compensator) => compensator.reset(),
            Conclusion::Dismissed {
                observation,
                on_dismissed,
            } => {
                if let Some(observation) = observation {
                    observation.cancel();
                }
                if let Some(on_dismissed) = on_dismissed {
                    on_dismissed();
                }
            }
        }
    }

    /// The sheet's content height changed; forward to the presentation.
    pub fn notify_height_changed(&self) {
        let lifecycle = {
            let inner = self.inner.borrow();
            if inner.torn_down {
                return;
            }
            inner.lifecycle.upgrade()
        };
        if let Some(lifecycle) = lifecycle {
            lifecycle.update_sheet_height();
        }
    }

    /// Tear the controller down without a dismissal (presentation destroyed
    /// out from under it). Cancels any pending scroll observation.
    pub fn teardown(&self) {
        let observation = {
            let mut inner = self.inner.borrow_mut();
            if inner.torn_down {
                return;
            }
            inner.torn_down = true;
            inner.scroll_delivery_open = false;
            inner.observation.take()
        };
        if let Some(observation) = observation {
            observation.cancel();
        }
    }
}
