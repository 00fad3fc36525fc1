//! Frame-driven progress animator implementing the core's animator
//! boundary.
//!
//! During an interactive drag the controller feeds `update(progress)`
//! straight through. `finish()` and `cancel()` tween whatever progress is
//! current toward 1.0 or 0.0 and fire the settled callback exactly once
//! when the tween lands.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use halfsheet_core::TransitionAnimator;

use crate::clock::{FrameCallbackRegistration, FrameClock};
use crate::easing::AnimationSpec;

struct ActiveRun {
    start_progress: f32,
    target: f32,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

struct AnimatorInner {
    clock: FrameClock,
    spec: AnimationSpec,
    progress: f32,
    sink: Option<Rc<dyn Fn(f32)>>,
    on_settled: Option<Rc<dyn Fn()>>,
    run: Option<ActiveRun>,
}

/// Tween animator for the dismissal transition.
#[derive(Clone)]
pub struct ProgressAnimator {
    inner: Rc<RefCell<AnimatorInner>>,
}

impl ProgressAnimator {
    pub fn new(clock: FrameClock, spec: AnimationSpec) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatorInner {
                clock,
                spec,
                progress: 0.0,
                sink: None,
                on_settled: None,
                run: None,
            })),
        }
    }

    /// The sink receives every emitted progress value; the integration maps
    /// it onto view transforms and fades.
    pub fn set_sink(&self, sink: impl Fn(f32) + 'static) {
        self.inner.borrow_mut().sink = Some(Rc::new(sink));
    }

    /// Fired once per settle; wire it to
    /// `TransitionController::animation_completed`.
    pub fn set_on_settled(&self, on_settled: impl Fn() + 'static) {
        self.inner.borrow_mut().on_settled = Some(Rc::new(on_settled));
    }

    /// Current transition progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.inner.borrow().progress
    }

    /// Whether a settle tween is in flight.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().run.is_some()
    }

    fn start_run(&self, target: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(run) = inner.run.take() {
                log::warn!("settle retargeted while a run was in flight");
                if let Some(registration) = run.registration {
                    registration.cancel();
                }
            }
            inner.run = Some(ActiveRun {
                start_progress: inner.progress,
                target,
                start_time_nanos: None,
                registration: None,
            });
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatorInner>>) {
        let clock = {
            let inner = this.borrow();
            match &inner.run {
                Some(run) if run.registration.is_none() => inner.clock.clone(),
                _ => return,
            }
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |frame_time_nanos| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, frame_time_nanos);
            }
        });
        if let Some(run) = this.borrow_mut().run.as_mut() {
            run.registration = Some(registration);
        }
    }

    fn on_frame(this: &Rc<RefCell<AnimatorInner>>, frame_time_nanos: u64) {
        let (value, settled, sink, on_settled) = {
            let mut inner = this.borrow_mut();
            let spec = inner.spec;
            let Some(run) = inner.run.as_mut() else {
                return;
            };
            run.registration = None;

            let start_time = *run.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start_time);
            let linear = (elapsed as f32 / spec.duration_nanos() as f32).clamp(0.0, 1.0);
            let eased = spec.easing.transform(linear);
            let value = run.start_progress + (run.target - run.start_progress) * eased;

            let settled = linear >= 1.0;
            if settled {
                let target = run.target;
                inner.run = None;
                inner.progress = target;
            } else {
                inner.progress = value;
            }
            (
                inner.progress,
                settled,
                inner.sink.clone(),
                inner.on_settled.clone(),
            )
        };

        if let Some(sink) = sink {
            sink(value);
        }
        if settled {
            if let Some(on_settled) = on_settled {
                on_settled();
            }
        } else {
            Self::schedule_frame(this);
        }
    }
}

impl TransitionAnimator for ProgressAnimator {
    fn update(&self, progress: f32) {
        let (value, sink) = {
            let mut inner = self.inner.borrow_mut();
            // An interactive update takes over from any pending settle.
            if let Some(run) = inner.run.take() {
                if let Some(registration) = run.registration {
                    registration.cancel();
                }
            }
            inner.progress = progress.clamp(0.0, 1.0);
            (inner.progress, inner.sink.clone())
        };
        if let Some(sink) = sink {
            sink(value);
        }
    }

    fn finish(&self) {
        self.start_run(1.0);
    }

    fn cancel(&self) {
        self.start_run(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::cell::{Cell, RefCell as StdRefCell};

    fn instrumented_animator(
        spec: AnimationSpec,
    ) -> (
        ProgressAnimator,
        FrameClock,
        Rc<StdRefCell<Vec<f32>>>,
        Rc<Cell<u32>>,
    ) {
        let clock = FrameClock::new();
        let animator = ProgressAnimator::new(clock.clone(), spec);
        let emitted = Rc::new(StdRefCell::new(Vec::new()));
        let settled = Rc::new(Cell::new(0u32));
        {
            let emitted = emitted.clone();
            animator.set_sink(move |p| emitted.borrow_mut().push(p));
        }
        {
            let settled = settled.clone();
            animator.set_on_settled(move || settled.set(settled.get() + 1));
        }
        (animator, clock, emitted, settled)
    }

    #[test]
    fn update_passes_through_clamped() {
        let (animator, _clock, emitted, _) = instrumented_animator(AnimationSpec::default());
        animator.update(0.4);
        animator.update(3.0);
        animator.update(-1.0);
        assert_eq!(emitted.borrow().as_slice(), &[0.4, 1.0, 0.0]);
    }

    #[test]
    fn finish_tweens_to_one_and_settles_once() {
        let spec = AnimationSpec::tween(300, Easing::Linear);
        let (animator, clock, emitted, settled) = instrumented_animator(spec);

        animator.update(0.5);
        animator.finish();
        assert!(animator.is_running());

        clock.drain(0); // latches start time, emits the start value
        clock.drain(150_000_000);
        clock.drain(300_000_000);

        assert_eq!(settled.get(), 1);
        assert!(!animator.is_running());
        assert!(!clock.has_pending());
        let values = emitted.borrow();
        assert_eq!(*values.last().unwrap(), 1.0);
        assert!((values[values.len() - 2] - 0.75).abs() < 1e-3);
    }

    #[test]
    fn cancel_tweens_back_to_zero() {
        let spec = AnimationSpec::tween(200, Easing::Linear);
        let (animator, clock, _, settled) = instrumented_animator(spec);

        animator.update(0.3);
        animator.cancel();
        clock.drain(0);
        clock.drain(200_000_000);

        assert_eq!(animator.progress(), 0.0);
        assert_eq!(settled.get(), 1);
    }

    #[test]
    fn interactive_update_cancels_a_pending_settle() {
        let spec = AnimationSpec::tween(200, Easing::Linear);
        let (animator, clock, _, settled) = instrumented_animator(spec);

        animator.update(0.5);
        animator.finish();
        clock.drain(0);

        animator.update(0.6);
        assert!(!animator.is_running());
        clock.drain(400_000_000);

        assert_eq!(settled.get(), 0);
        assert_eq!(animator.progress(), 0.6);
    }

    #[test]
    fn dropped_animator_does_not_fire_pending_frames() {
        let spec = AnimationSpec::tween(200, Easing::Linear);
        let (animator, clock, emitted, settled) = instrumented_animator(spec);

        animator.finish();
        drop(animator);
        clock.drain(0);

        assert!(emitted.borrow().is_empty());
        assert_eq!(settled.get(), 0);
    }
}
