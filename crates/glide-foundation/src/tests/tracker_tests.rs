use super::*;

#[test]
fn test_samples_are_cumulative_from_down() {
    let mut tracker = GestureTracker::new();
    assert_eq!(
        tracker.track(PointerInput::down(0, 10.0, 400.0)),
        Some(GestureSample::default())
    );
    let first = tracker.track(PointerInput::moved(10, 12.0, 390.0)).expect("tracking");
    let second = tracker.track(PointerInput::moved(20, 15.0, 370.0)).expect("tracking");
    assert_eq!((first.dx, first.dy), (2.0, -10.0));
    assert_eq!((second.dx, second.dy), (5.0, -30.0));
}

#[test]
fn test_release_velocity_is_per_millisecond() {
    let mut tracker = GestureTracker::new();
    tracker.track(PointerInput::down(0, 0.0, 0.0));
    for step in 1..=4 {
        tracker.track(PointerInput::moved(step * 10, 0.0, step as f32 * 15.0));
    }
    let release = tracker.track(PointerInput::up(50, 0.0, 75.0)).expect("tracking");
    assert!((release.vy - 1.5).abs() < 0.15, "got {}", release.vy);
    assert_eq!(release.vx, 0.0);
    assert!(!tracker.is_tracking());
}

#[test]
fn test_release_velocity_is_capped() {
    let mut tracker = GestureTracker::with_max_velocity(2_000.0);
    tracker.track(PointerInput::down(0, 0.0, 0.0));
    tracker.track(PointerInput::moved(5, 0.0, 200.0));
    let release = tracker.track(PointerInput::up(10, 0.0, 400.0)).expect("tracking");
    assert_eq!(release.vy, 2.0);
}

#[test]
fn test_events_without_down_are_ignored() {
    let mut tracker = GestureTracker::new();
    assert_eq!(tracker.track(PointerInput::moved(0, 0.0, 10.0)), None);
    assert_eq!(tracker.track(PointerInput::up(5, 0.0, 10.0)), None);
}

#[test]
fn test_cancel_ends_tracking() {
    let mut tracker = GestureTracker::new();
    tracker.track(PointerInput::down(0, 0.0, 0.0));
    assert_eq!(tracker.track(PointerInput::cancel(10)), None);
    assert!(!tracker.is_tracking());
    assert_eq!(tracker.track(PointerInput::moved(20, 0.0, 10.0)), None);
}
