//! One-shot frame-callback clock.
//!
//! The platform loop (or a test) pushes frame timestamps in nanoseconds via
//! [`FrameClock::drain`]; registered callbacks fire once and re-register if
//! they want another frame. Registrations are cancellable.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type FrameCallback = Box<dyn FnOnce(u64)>;

#[derive(Default)]
struct ClockInner {
    next_id: u64,
    callbacks: Vec<(u64, FrameCallback)>,
}

/// Shared handle to the frame-callback queue.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the next frame. The callback receives the
    /// frame time in nanoseconds and fires at most once.
    pub fn with_frame_nanos(&self, callback: impl FnOnce(u64) + 'static) -> FrameCallbackRegistration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.callbacks.push((id, Box::new(callback)));
        FrameCallbackRegistration {
            id,
            clock: Rc::downgrade(&self.inner),
        }
    }

    /// Whether any callback is waiting for a frame.
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().callbacks.is_empty()
    }

    /// Deliver a frame: runs every callback registered before this call.
    /// Callbacks registered during the drain wait for the next frame.
    pub fn drain(&self, frame_time_nanos: u64) {
        let callbacks = std::mem::take(&mut self.inner.borrow_mut().callbacks);
        for (_, callback) in callbacks {
            callback(frame_time_nanos);
        }
    }
}

/// Cancellable handle for a pending frame callback.
pub struct FrameCallbackRegistration {
    id: u64,
    clock: Weak<RefCell<ClockInner>>,
}

impl FrameCallbackRegistration {
    /// Remove the callback if it has not fired yet.
    pub fn cancel(self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().callbacks.retain(|(id, _)| *id != self.id);
        }
    }
}
