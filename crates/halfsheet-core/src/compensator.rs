//! Scroll-driven drag compensation.
//!
//! Overscrolling the embedded list past its top pulls the sheet down: the
//! wrapping surface follows the finger while the scroll region's layer is
//! translated the opposite way, so the list content appears stationary
//! instead of double-scrolling. Pulling past the dismissal breakpoint is a
//! second, independent path to dismissal that never enters the gesture
//! states.

use std::rc::Rc;

use crate::capability::SurfaceTransforms;

/// What a scroll-offset change did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationEffect {
    /// Offset was not an overscroll (or the inset swallowed it); nothing
    /// was touched.
    Ignored,
    /// Transforms were applied; the pull is still below the breakpoint.
    Applied,
    /// Transforms were applied and the pull reached the breakpoint. The
    /// controller must cancel the scroll observation and request a
    /// non-interactive dismissal.
    BreakpointCrossed,
}

/// Converts negative scroll offsets into opposing surface translations.
///
/// Cheap to clone: the controller clones it out of its state cell before
/// touching the transform sink, so a re-entrant callback can never observe
/// a held borrow.
#[derive(Clone)]
pub struct ScrollCompensator {
    surfaces: Rc<dyn SurfaceTransforms>,
    auxiliary_slides: bool,
    breakpoint: f32,
}

impl ScrollCompensator {
    pub fn new(surfaces: Rc<dyn SurfaceTransforms>, auxiliary_slides: bool, breakpoint: f32) -> Self {
        Self {
            surfaces,
            auxiliary_slides,
            breakpoint,
        }
    }

    /// Apply compensation for a new content offset.
    ///
    /// Offsets with `y >= 0` are ignored. For an overscroll, the meaningful
    /// pull is `full_offset = offset_y + top_inset`; a non-negative
    /// `full_offset` means the inset absorbed it.
    pub fn offset_changed(&self, offset_y: f32, top_inset: f32) -> CompensationEffect {
        if offset_y >= 0.0 {
            return CompensationEffect::Ignored;
        }

        let full_offset = offset_y + top_inset;
        if full_offset >= 0.0 {
            return CompensationEffect::Ignored;
        }

        // Opposing transforms of equal magnitude.
        self.surfaces.set_sheet_translation(-full_offset);
        self.surfaces.set_scroll_region_translation(full_offset);
        if self.auxiliary_slides {
            self.surfaces.set_auxiliary_translation(-full_offset);
        }

        if -full_offset >= self.breakpoint {
            CompensationEffect::BreakpointCrossed
        } else {
            CompensationEffect::Applied
        }
    }

    /// Restore all layers to their resting positions.
    pub fn reset(&self) {
        self.surfaces.set_sheet_translation(0.0);
        self.surfaces.set_scroll_region_translation(0.0);
        if self.auxiliary_slides {
            self.surfaces.set_auxiliary_translation(0.0);
        }
    }
}
