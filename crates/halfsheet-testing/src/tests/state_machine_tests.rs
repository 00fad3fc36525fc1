//! Drag and tap paths through the transition state machine.

use halfsheet_core::{
    BreakpointPolicy, DismissMethod, GesturePhase, InteractionMode, PresentationStyle,
    SettleOutcome, DISMISS_BREAKPOINT,
};

use crate::fakes::{TestContent, TestScrollRegion};
use crate::robot::SheetHarness;
use crate::tests::{began, changed, ended, sample, SOURCE_HEIGHT};

fn swipeable() -> SheetHarness {
    SheetHarness::present(TestContent::new(DismissMethod::ALL))
}

#[test]
fn downward_begin_enters_interactive_drag() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));

    assert_eq!(harness.controller.mode(), InteractionMode::InteractiveDrag);
    assert_eq!(harness.lifecycle.interactive_count(), 1);
    harness
        .trace
        .assert_order("haptics.prepare", "lifecycle.begin_interactive");
}

#[test]
fn non_downward_begin_never_starts_a_drag() {
    let harness = swipeable();
    harness.controller.handle_pan(began(0.0));
    harness.controller.handle_pan(began(-250.0));

    assert_eq!(harness.controller.mode(), InteractionMode::Idle);
    assert!(harness.trace.events().is_empty());
}

#[test]
fn pan_is_inert_when_swipe_is_disallowed() {
    let harness = SheetHarness::present(TestContent::new(DismissMethod {
        allow_swipe: false,
        allow_tap: true,
    }));
    harness.controller.handle_pan(began(400.0));

    assert_eq!(harness.controller.mode(), InteractionMode::Idle);
    assert_eq!(harness.lifecycle.interactive_count(), 0);
}

#[test]
fn pan_is_inert_while_scroll_region_scrolls() {
    let region = TestScrollRegion::with_top_inset(0.0);
    region.decelerating.set(true);
    let harness = SheetHarness::present(TestContent::new(DismissMethod::ALL).with_region(region));

    harness.controller.handle_pan(began(400.0));
    assert_eq!(harness.controller.mode(), InteractionMode::Idle);
}

#[test]
fn drag_below_breakpoint_cancels_and_returns_to_idle() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(changed(120.0));
    harness.controller.handle_pan(ended(150.0));

    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Cancel)
    );
    assert_eq!(harness.animator.cancel_count(), 1);
    assert_eq!(harness.trace.count("haptics.impact"), 0);

    harness.complete_animation();
    assert_eq!(harness.controller.mode(), InteractionMode::Idle);
    assert!(harness.controller.gestures_enabled());
    assert_eq!(harness.dismissed_count.get(), 0);
}

#[test]
fn release_exactly_at_breakpoint_commits() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(changed(100.0));
    harness.controller.handle_pan(ended(DISMISS_BREAKPOINT));

    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Commit)
    );
    harness.trace.assert_order("haptics.impact", "animator.finish");

    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
}

#[test]
fn crossing_the_breakpoint_commits_mid_gesture() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness
        .controller
        .handle_pan(changed(DISMISS_BREAKPOINT + 30.0));

    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Commit)
    );
    assert!(!harness.controller.gestures_enabled());
    assert_eq!(harness.animator.finish_count(), 1);
    harness.trace.assert_order("haptics.impact", "animator.finish");

    // Late events from the still-live platform recognizer are ignored.
    harness.controller.handle_pan(changed(500.0));
    harness.controller.handle_pan(ended(520.0));
    assert_eq!(harness.animator.finish_count(), 1);
    assert_eq!(harness.animator.cancel_count(), 0);
    assert_eq!(harness.trace.count("haptics.impact"), 1);

    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
}

#[test]
fn completion_fires_exactly_once() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(ended(400.0));

    harness.complete_animation();
    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
    assert!(harness.observation_cancelled.get());
}

#[test]
fn progress_stays_clamped_for_any_translation() {
    // A huge breakpoint keeps the whole sequence interactive.
    let harness = SheetHarness::present_with_policy(
        TestContent::new(DismissMethod::ALL),
        BreakpointPolicy::new(1.0e9),
    );
    harness.controller.handle_pan(began(400.0));
    for translation in [-500.0, 50.0, 0.0, 10_000.0, SOURCE_HEIGHT * 4.0] {
        harness.controller.handle_pan(changed(translation));
    }

    let updates = harness.animator.updates();
    assert_eq!(updates.len(), 5);
    assert!(updates.iter().all(|p| (0.0..=1.0).contains(p)), "{updates:?}");
    assert_eq!(updates[0], 0.0);
    assert_eq!(updates[3], 1.0);
}

#[test]
fn cancelled_gesture_settles_like_an_ended_one() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness
        .controller
        .handle_pan(sample(GesturePhase::Cancelled, 90.0, 0.0));

    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Cancel)
    );
}

#[test]
fn begin_during_settle_is_dropped() {
    let harness = swipeable();
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(ended(50.0));
    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Cancel)
    );

    harness.controller.handle_pan(began(400.0));
    assert_eq!(
        harness.controller.mode(),
        InteractionMode::Settling(SettleOutcome::Cancel)
    );
    assert_eq!(harness.lifecycle.interactive_count(), 1);
}

#[test]
fn state_machine_is_reusable_until_the_final_commit() {
    let harness = swipeable();

    // First attempt backs out.
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(ended(60.0));
    harness.complete_animation();
    assert_eq!(harness.controller.mode(), InteractionMode::Idle);

    // Second attempt commits; capability checks were untouched.
    harness.controller.handle_pan(began(400.0));
    harness.controller.handle_pan(ended(DISMISS_BREAKPOINT + 1.0));
    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
}

#[test]
fn tap_requests_a_non_interactive_dismissal() {
    let harness = SheetHarness::present(TestContent::new(DismissMethod::ALL));
    harness.controller.handle_tap();

    // Interactive tracking is bypassed entirely.
    assert_eq!(harness.controller.mode(), InteractionMode::Idle);
    assert_eq!(harness.lifecycle.non_interactive_count(), 1);

    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
}

#[test]
fn second_tap_while_dismissing_is_inert() {
    let harness = SheetHarness::present(TestContent::new(DismissMethod::ALL));
    harness.controller.handle_tap();
    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 1);

    harness.complete_animation();
    assert_eq!(harness.dismissed_count.get(), 1);
}

#[test]
fn tap_is_inert_when_disallowed() {
    let harness = SheetHarness::present(TestContent::new(DismissMethod {
        allow_swipe: true,
        allow_tap: false,
    }));
    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 0);
}

#[test]
fn tap_waits_for_the_scroll_region_to_stop() {
    let region = TestScrollRegion::with_top_inset(0.0);
    region.dragging.set(true);
    let harness =
        SheetHarness::present(TestContent::new(DismissMethod::ALL).with_region(region.clone()));

    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 0);

    region.dragging.set(false);
    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 1);
}

#[test]
fn dismiss_method_can_change_between_attempts() {
    let harness = SheetHarness::present(TestContent::new(DismissMethod::NONE));
    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 0);

    harness.content.set_dismiss_method(DismissMethod::ALL);
    harness.controller.handle_tap();
    assert_eq!(harness.lifecycle.non_interactive_count(), 1);
}

#[test]
fn height_change_forwards_to_the_presentation() {
    let harness = swipeable();
    harness.controller.notify_height_changed();
    assert_eq!(harness.trace.count("lifecycle.update_height"), 1);
}

#[test]
#[should_panic(expected = "custom presentation style")]
fn attaching_non_custom_content_is_a_configuration_error() {
    SheetHarness::present(
        TestContent::new(DismissMethod::ALL).with_style(PresentationStyle::Automatic),
    );
}
