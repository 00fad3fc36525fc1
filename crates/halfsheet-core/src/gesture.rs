//! Gesture samples and the vertical pan recognizer.
//!
//! [`GestureSample`] is the normalized snapshot the controller consumes:
//! one per input callback, immutable, never persisted. Integrations that
//! already have a platform pan recognizer can build samples directly;
//! [`VerticalPanRecognizer`] converts raw pointer callbacks into samples
//! for integrations that do not.

use crate::velocity::VelocityTracker;

/// Touch-slop in logical pixels before a pan is recognized.
///
/// Matched to common platform conventions (Android uses ~8dp): large
/// enough to ignore finger jitter, small enough to feel responsive.
pub const PAN_SLOP: f32 = 8.0;

/// Phase of a pan gesture, one per input callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Normalized snapshot of one pan input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Vertical translation since the gesture began, positive downward.
    pub translation_y: f32,
    /// Vertical velocity in pixels per second, positive downward.
    pub velocity_y: f32,
    pub phase: GesturePhase,
    /// Height of the view the pan originated on, used only to normalize
    /// progress.
    pub source_height: f32,
}

/// Transition progress for a downward translation on a view of the given
/// height: 0 = fully presented, 1 = fully dismissed.
///
/// Upward translation clamps to zero; the result is always in `[0, 1]`.
pub fn dismissal_progress(translation_y: f32, source_height: f32) -> f32 {
    if source_height <= 0.0 {
        return 0.0;
    }
    (translation_y.max(0.0) / source_height).clamp(0.0, 1.0)
}

struct ActiveTrack {
    start_y: f32,
    last_translation: f32,
    began: bool,
}

/// Converts raw pointer down/move/up/cancel callbacks into
/// [`GestureSample`]s for a vertical pan.
///
/// Movement within [`PAN_SLOP`] of the press point emits nothing; crossing
/// the slop emits `Began`, subsequent moves emit `Changed`. Disabling the
/// recognizer mid-gesture drops the active track and swallows all events
/// until re-enabled, which is how the controller stops a gesture after an
/// early commit.
pub struct VerticalPanRecognizer {
    source_height: f32,
    slop: f32,
    enabled: bool,
    tracker: VelocityTracker,
    track: Option<ActiveTrack>,
}

impl VerticalPanRecognizer {
    pub fn new(source_height: f32) -> Self {
        Self {
            source_height,
            slop: PAN_SLOP,
            enabled: true,
            tracker: VelocityTracker::new(),
            track: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable recognition. Disabling drops any active track.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.track = None;
            self.tracker.reset();
        }
        self.enabled = enabled;
    }

    /// The pan surface was resized.
    pub fn set_source_height(&mut self, source_height: f32) {
        self.source_height = source_height;
    }

    pub fn pointer_down(&mut self, time_ms: i64, y: f32) {
        if !self.enabled {
            return;
        }
        self.tracker.reset();
        self.tracker.add_sample(time_ms, y);
        self.track = Some(ActiveTrack {
            start_y: y,
            last_translation: 0.0,
            began: false,
        });
    }

    pub fn pointer_move(&mut self, time_ms: i64, y: f32) -> Option<GestureSample> {
        if !self.enabled {
            return None;
        }
        let track = self.track.as_mut()?;
        self.tracker.add_sample(time_ms, y);

        let translation = y - track.start_y;
        track.last_translation = translation;

        if !track.began {
            if translation.abs() < self.slop {
                return None;
            }
            track.began = true;
            return Some(GestureSample {
                translation_y: translation,
                velocity_y: self.tracker.velocity(),
                phase: GesturePhase::Began,
                source_height: self.source_height,
            });
        }

        Some(GestureSample {
            translation_y: translation,
            velocity_y: self.tracker.velocity(),
            phase: GesturePhase::Changed,
            source_height: self.source_height,
        })
    }

    pub fn pointer_up(&mut self, time_ms: i64, y: f32) -> Option<GestureSample> {
        if !self.enabled {
            self.track = None;
            return None;
        }
        let track = self.track.take()?;
        self.tracker.add_sample(time_ms, y);

        if !track.began {
            return None;
        }
        Some(GestureSample {
            translation_y: y - track.start_y,
            velocity_y: self.tracker.velocity(),
            phase: GesturePhase::Ended,
            source_height: self.source_height,
        })
    }

    pub fn pointer_cancel(&mut self) -> Option<GestureSample> {
        let track = self.track.take()?;
        if !self.enabled || !track.began {
            return None;
        }
        Some(GestureSample {
            translation_y: track.last_translation,
            velocity_y: 0.0,
            phase: GesturePhase::Cancelled,
            source_height: self.source_height,
        })
    }
}
