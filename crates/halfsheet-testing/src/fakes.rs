//! Recording fakes for the controller's collaborator traits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use halfsheet_core::{
    AuxiliaryTransitionStyle, DismissMethod, HapticEngine, PresentationLifecycle,
    PresentationStyle, PresentedContent, ScrollRegion, SurfaceTransforms, TransitionAnimator,
};

/// Shared chronological event log. Fakes push named events into one trace
/// so tests can assert ordering across collaborators.
#[derive(Clone, Default)]
pub struct TraceLog {
    events: Rc<RefCell<Vec<String>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &str) {
        self.events.borrow_mut().push(event.to_owned());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }

    /// Index of the first occurrence, or `None`.
    pub fn position(&self, event: &str) -> Option<usize> {
        self.events.borrow().iter().position(|e| e == event)
    }

    /// Assert `before` occurs and precedes the first occurrence of `after`.
    pub fn assert_order(&self, before: &str, after: &str) {
        let events = self.events.borrow();
        let b = events.iter().position(|e| e == before);
        let a = events.iter().position(|e| e == after);
        match (b, a) {
            (Some(b), Some(a)) => assert!(b < a, "{before:?} at {b} not before {after:?} at {a}"),
            _ => panic!("missing events: {before:?} -> {b:?}, {after:?} -> {a:?} in {events:?}"),
        }
    }
}

/// Haptic engine that records its cues.
pub struct RecordingHaptics {
    trace: TraceLog,
}

impl RecordingHaptics {
    pub fn new(trace: TraceLog) -> Self {
        Self { trace }
    }
}

impl HapticEngine for RecordingHaptics {
    fn prepare(&self) {
        self.trace.record("haptics.prepare");
    }

    fn impact(&self) {
        self.trace.record("haptics.impact");
    }
}

/// Animator boundary that records instructions and progress values.
pub struct RecordingAnimator {
    trace: TraceLog,
    updates: RefCell<Vec<f32>>,
}

impl RecordingAnimator {
    pub fn new(trace: TraceLog) -> Self {
        Self {
            trace,
            updates: RefCell::new(Vec::new()),
        }
    }

    pub fn updates(&self) -> Vec<f32> {
        self.updates.borrow().clone()
    }

    pub fn finish_count(&self) -> usize {
        self.trace.count("animator.finish")
    }

    pub fn cancel_count(&self) -> usize {
        self.trace.count("animator.cancel")
    }
}

impl TransitionAnimator for RecordingAnimator {
    fn update(&self, progress: f32) {
        self.updates.borrow_mut().push(progress);
        self.trace.record("animator.update");
    }

    fn finish(&self) {
        self.trace.record("animator.finish");
    }

    fn cancel(&self) {
        self.trace.record("animator.cancel");
    }
}

/// Presentation lifecycle that records requests.
pub struct RecordingLifecycle {
    trace: TraceLog,
}

impl RecordingLifecycle {
    pub fn new(trace: TraceLog) -> Self {
        Self { trace }
    }

    pub fn interactive_count(&self) -> usize {
        self.trace.count("lifecycle.begin_interactive")
    }

    pub fn non_interactive_count(&self) -> usize {
        self.trace.count("lifecycle.begin_non_interactive")
    }
}

impl PresentationLifecycle for RecordingLifecycle {
    fn begin_interactive_dismiss(&self) {
        self.trace.record("lifecycle.begin_interactive");
    }

    fn begin_non_interactive_dismiss(&self) {
        self.trace.record("lifecycle.begin_non_interactive");
    }

    fn update_sheet_height(&self) {
        self.trace.record("lifecycle.update_height");
    }
}

/// Transform sink exposing the last written translations.
#[derive(Default)]
pub struct RecordingSurfaces {
    pub sheet: Cell<f32>,
    pub scroll_region: Cell<f32>,
    pub auxiliary: Cell<f32>,
    pub writes: Cell<u32>,
}

impl RecordingSurfaces {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceTransforms for RecordingSurfaces {
    fn set_sheet_translation(&self, y: f32) {
        self.sheet.set(y);
        self.writes.set(self.writes.get() + 1);
    }

    fn set_scroll_region_translation(&self, y: f32) {
        self.scroll_region.set(y);
        self.writes.set(self.writes.get() + 1);
    }

    fn set_auxiliary_translation(&self, y: f32) {
        self.auxiliary.set(y);
        self.writes.set(self.writes.get() + 1);
    }
}

/// Scroll region with settable state.
#[derive(Default)]
pub struct TestScrollRegion {
    pub offset_y: Cell<f32>,
    pub dragging: Cell<bool>,
    pub decelerating: Cell<bool>,
    pub inset: Cell<f32>,
}

impl TestScrollRegion {
    pub fn with_top_inset(inset: f32) -> Rc<Self> {
        let region = Rc::new(Self::default());
        region.inset.set(inset);
        region
    }
}

impl ScrollRegion for TestScrollRegion {
    fn content_offset_y(&self) -> f32 {
        self.offset_y.get()
    }

    fn is_dragging(&self) -> bool {
        self.dragging.get()
    }

    fn is_decelerating(&self) -> bool {
        self.decelerating.get()
    }

    fn top_inset(&self) -> f32 {
        self.inset.get()
    }
}

/// Presented content with configurable capabilities.
pub struct TestContent {
    method: Cell<DismissMethod>,
    style: PresentationStyle,
    region: Option<Rc<TestScrollRegion>>,
    auxiliary: Option<AuxiliaryTransitionStyle>,
}

impl TestContent {
    pub fn new(method: DismissMethod) -> Self {
        Self {
            method: Cell::new(method),
            style: PresentationStyle::Custom,
            region: None,
            auxiliary: None,
        }
    }

    pub fn with_style(mut self, style: PresentationStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_region(mut self, region: Rc<TestScrollRegion>) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_auxiliary(mut self, style: AuxiliaryTransitionStyle) -> Self {
        self.auxiliary = Some(style);
        self
    }

    /// Change permissions mid-presentation, as content may.
    pub fn set_dismiss_method(&self, method: DismissMethod) {
        self.method.set(method);
    }
}

impl PresentedContent for TestContent {
    fn dismiss_method(&self) -> DismissMethod {
        self.method.get()
    }

    fn presentation_style(&self) -> PresentationStyle {
        self.style
    }

    fn scroll_region(&self) -> Option<Rc<dyn ScrollRegion>> {
        self.region
            .as_ref()
            .map(|region| region.clone() as Rc<dyn ScrollRegion>)
    }

    fn auxiliary_transition(&self) -> Option<AuxiliaryTransitionStyle> {
        self.auxiliary
    }
}
