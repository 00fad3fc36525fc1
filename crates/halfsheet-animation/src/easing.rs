//! Easing curves and the tween specification for settle animations.

/// Easing functions for the settle tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Decelerating cubic, the default feel for a sheet snapping back.
    EaseOut,
    /// Material standard curve.
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseOut => EASE_OUT.value_at(fraction),
            Easing::FastOutSlowIn => FAST_OUT_SLOW_IN.value_at(fraction),
        }
    }
}

const EASE_OUT: UnitBezier = UnitBezier::new(0.0, 0.0, 0.58, 1.0);
const FAST_OUT_SLOW_IN: UnitBezier = UnitBezier::new(0.4, 0.0, 0.2, 1.0);

/// A cubic bezier pinned at (0,0) and (1,1), holding only the two inner
/// control points.
struct UnitBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl UnitBezier {
    const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// One axis of the curve in Bernstein form. The endpoint terms for
    /// p0 = 0 and p3 = 1 vanish.
    fn axis(p1: f32, p2: f32, t: f32) -> f32 {
        let s = 1.0 - t;
        3.0 * s * s * t * p1 + 3.0 * s * t * t * p2 + t * t * t
    }

    /// y of the curve at horizontal position x.
    ///
    /// x(t) is non-decreasing for control x values in [0, 1], so a plain
    /// bisection on t converges; 24 halvings put t within 2^-24.
    fn value_at(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let mut lo = 0.0f32;
        let mut hi = 1.0f32;
        for _ in 0..24 {
            let mid = 0.5 * (lo + hi);
            if Self::axis(self.x1, self.x2, mid) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self::axis(self.y1, self.y2, 0.5 * (lo + hi))
    }
}

/// Tween specification: duration plus easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn duration_nanos(&self) -> u64 {
        (self.duration_millis * 1_000_000).max(1)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}
