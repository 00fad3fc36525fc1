//! Pointer velocity estimation for the vertical pan recognizer.
//!
//! A windowed secant over recent samples: simple, but enough here, because
//! velocity is only used as the gate to start an interactive drag. The
//! commit/cancel decision itself is distance-based (see
//! [`crate::breakpoint`]) and never reads velocity.

use smallvec::SmallVec;

/// Only samples within the last 100ms contribute to the estimate.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped moving.
const ASSUME_STOPPED_MS: i64 = 40;

/// Upper bound on retained samples.
const MAX_SAMPLES: usize = 20;

/// Maximum reported pan velocity in logical pixels per second.
pub const MAX_PAN_VELOCITY: f32 = 8_000.0;

#[derive(Clone, Copy, Debug)]
struct PositionAtTime {
    time_ms: i64,
    position: f32,
}

/// 1D velocity tracker over absolute positions.
///
/// Timestamps are signed and not assumed monotonic; platform event streams
/// occasionally deliver out-of-order times, which must degrade the estimate
/// to zero rather than fault.
#[derive(Clone, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[PositionAtTime; MAX_SAMPLES]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position sample. Older samples outside the horizon are
    /// dropped so the buffer stays small.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.samples.push(PositionAtTime { time_ms, position });

        self.samples.retain(|s| time_ms - s.time_ms <= HORIZON_MS);
        while self.samples.len() > MAX_SAMPLES {
            self.samples.remove(0);
        }
    }

    /// Estimated velocity in pixels per second, positive downward.
    ///
    /// Returns 0.0 with fewer than two usable samples, when the pointer
    /// paused longer than the assume-stopped gap before the newest sample,
    /// or when the usable window has no forward time extent.
    pub fn velocity(&self) -> f32 {
        let newest = match self.samples.last() {
            Some(sample) => *sample,
            None => return 0.0,
        };

        // Walk back from the newest sample, stopping at a pause.
        let mut oldest = newest;
        for sample in self.samples.iter().rev().skip(1) {
            if oldest.time_ms - sample.time_ms > ASSUME_STOPPED_MS {
                break;
            }
            oldest = *sample;
        }

        let dt_ms = newest.time_ms - oldest.time_ms;
        if dt_ms <= 0 {
            return 0.0;
        }

        let velocity = (newest.position - oldest.position) / dt_ms as f32 * 1_000.0;
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-MAX_PAN_VELOCITY, MAX_PAN_VELOCITY)
    }

    /// Drop all tracked samples.
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
