//! Capability traits at the boundary between the core and the surrounding
//! presentation framework.
//!
//! The controller consumes these; it never owns the objects behind them.
//! Ownership runs presentation-lifecycle → controller → animator, so the
//! content and lifecycle are held as `Weak` back-references by the
//! controller while the animator and haptics are plain shared handles.

use std::rc::Rc;

/// Dismissal permissions declared by the presented content.
///
/// Read-only from the core's perspective: queried before any work on the
/// corresponding input path, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissMethod {
    pub allow_swipe: bool,
    pub allow_tap: bool,
}

impl DismissMethod {
    pub const ALL: Self = Self {
        allow_swipe: true,
        allow_tap: true,
    };

    pub const NONE: Self = Self {
        allow_swipe: false,
        allow_tap: false,
    };
}

/// Presentation style declared by the content. Half sheets require
/// [`PresentationStyle::Custom`]; anything else is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationStyle {
    Custom,
    Automatic,
    FullScreen,
}

/// How an auxiliary top-level view participates in the transition. A
/// `Slide` view follows the sheet's forward transform during scroll
/// compensation; a `Fade` view stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryTransitionStyle {
    Slide,
    Fade,
}

/// The presented content, as seen by the dismissal core.
pub trait PresentedContent {
    fn dismiss_method(&self) -> DismissMethod;

    fn presentation_style(&self) -> PresentationStyle;

    /// The embedded scrollable region, if the content declares one.
    fn scroll_region(&self) -> Option<Rc<dyn ScrollRegion>> {
        None
    }

    /// Transition style of the auxiliary top-level view, if declared.
    fn auxiliary_transition(&self) -> Option<AuxiliaryTransitionStyle> {
        None
    }
}

/// Scroll-position feedback from the embedded scrollable region.
///
/// `top_inset` is resolved once by the integration layer (safe-area or
/// content inset, whichever the platform uses); the core never branches on
/// platform versions.
pub trait ScrollRegion {
    /// Current vertical content offset; negative means overscrolled past
    /// the top.
    fn content_offset_y(&self) -> f32;

    fn is_dragging(&self) -> bool;

    fn is_decelerating(&self) -> bool;

    fn top_inset(&self) -> f32;

    /// Dragging or decelerating. Inputs arriving while the region is
    /// scrolling are suppressed.
    fn is_scrolling(&self) -> bool {
        self.is_dragging() || self.is_decelerating()
    }
}

/// Fire-and-forget haptic cues. Injected so tests can substitute a
/// recording or no-op engine.
pub trait HapticEngine {
    /// Warm the engine up when an interactive drag begins.
    fn prepare(&self);

    /// The commit cue, fired when a dismissal becomes inevitable.
    fn impact(&self);
}

/// Haptic engine that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHaptics;

impl HapticEngine for NoopHaptics {
    fn prepare(&self) {}
    fn impact(&self) {}
}

/// Layer-transform sink the scroll compensator writes through. Values are
/// vertical translations in logical pixels; zero restores the resting
/// position.
pub trait SurfaceTransforms {
    /// The sheet's wrapping surface.
    fn set_sheet_translation(&self, y: f32);

    /// The scroll region's own layer, translated opposite the surface so
    /// its content appears stationary under the finger.
    fn set_scroll_region_translation(&self, y: f32);

    /// The auxiliary top-level view, driven only for `Slide` style.
    fn set_auxiliary_translation(&self, y: f32);
}

/// The presentation-lifecycle collaborator that actually tears the sheet
/// down. Completion flows back through
/// [`crate::TransitionController::animation_completed`].
pub trait PresentationLifecycle {
    /// Begin a dismissal with the animator attached as the interactive
    /// driver; the transition may be reversed.
    fn begin_interactive_dismiss(&self);

    /// Begin a full, non-interactive dismissal (tap and scroll paths).
    fn begin_non_interactive_dismiss(&self);

    /// The sheet's content height changed; re-layout the presentation.
    fn update_sheet_height(&self);
}

/// The opaque animator boundary the controller drives.
pub trait TransitionAnimator {
    /// Interactive progress update, `progress` in `[0, 1]`.
    fn update(&self, progress: f32);

    /// Animate from the current progress to fully dismissed.
    fn finish(&self);

    /// Animate from the current progress back to fully presented.
    fn cancel(&self);
}
