//! Commit/cancel decision for an ended drag.
//!
//! The decision is a pure distance threshold. Velocity gates the *start* of
//! an interactive drag (see [`crate::controller`]), never its outcome, so a
//! slow deliberate pull past the breakpoint dismisses and a fast flick that
//! stays above it does not.

/// Downward drag distance in logical pixels at which a dismissal commits.
///
/// Shared by the drag path and the scroll-overscroll path so the sheet
/// "lets go" at the same visual point regardless of which input drove it.
pub const DISMISS_BREAKPOINT: f32 = 200.0;

/// Outcome of settling an interactive drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Animate to fully dismissed and tear the presentation down.
    Commit,
    /// Animate back to fully presented and return to idle.
    Cancel,
}

/// Distance-threshold policy deciding whether an ended drag dismisses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakpointPolicy {
    breakpoint: f32,
}

impl BreakpointPolicy {
    pub fn new(breakpoint: f32) -> Self {
        Self { breakpoint }
    }

    /// The commit distance in logical pixels.
    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    /// Decide the outcome for a drag that travelled `drag_distance` pixels
    /// downward on a view `source_height` pixels tall.
    ///
    /// Upward travel clamps to zero. Reaching the breakpoint exactly
    /// commits. `source_height` only normalizes progress elsewhere; it does
    /// not participate in the decision.
    pub fn decide(&self, drag_distance: f32, _source_height: f32) -> SettleOutcome {
        if drag_distance.max(0.0) >= self.breakpoint {
            SettleOutcome::Commit
        } else {
            SettleOutcome::Cancel
        }
    }
}

impl Default for BreakpointPolicy {
    fn default() -> Self {
        Self::new(DISMISS_BREAKPOINT)
    }
}
