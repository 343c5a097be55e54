use super::*;
use glide_testing::{Recorder, TestRuntime};

#[test]
fn test_easing_endpoints() {
    for easing in [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
        Easing::FastOutLinearEasing,
    ] {
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?}");
        assert_eq!(easing.transform(-0.5), 0.0, "{easing:?}");
        assert_eq!(easing.transform(1.5), 1.0, "{easing:?}");
    }
}

#[test]
fn test_fast_out_slow_in_leads_linear() {
    let eased = Easing::FastOutSlowInEasing.transform(0.5);
    assert!(eased > 0.5, "material standard curve is ahead at midpoint: {eased}");
    let symmetric = Easing::EaseInOut.transform(0.5);
    assert!((symmetric - 0.5).abs() < 1e-3);
}

#[test]
fn test_spec_fraction_respects_delay() {
    let spec = TweenSpec::linear(100).with_delay(50);
    assert_eq!(spec.fraction_at(20.0), 0.0);
    assert!((spec.fraction_at(100.0) - 0.5).abs() < 1e-6);
    assert_eq!(spec.fraction_at(400.0), 1.0);
}

#[test]
fn test_tween_reaches_target_and_completes() {
    let mut runtime = TestRuntime::new();
    let position = PositionCell::new(0.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let outcomes = Recorder::new();

    tween.animate_to(300.0, TweenSpec::linear(100), outcomes.sink());
    assert!(tween.is_running());
    assert_eq!(tween.target(), Some(300.0));
    assert_eq!(position.writer(), Writer::Tween);

    runtime.run_frames(3);
    let midway = position.get();
    assert!(midway > 0.0 && midway < 300.0, "midway value {midway}");

    runtime.run_until_idle(100);
    assert_eq!(position.get(), 300.0);
    assert_eq!(outcomes.values(), vec![TweenOutcome::Completed(300.0)]);
    assert_eq!(position.writer(), Writer::Host);
    assert!(!tween.is_running());
}

#[test]
fn test_tween_values_are_monotonic() {
    let mut runtime = TestRuntime::new();
    let position = PositionCell::new(400.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let values = Recorder::new();
    let _subscription = position.subscribe(values.sink());

    tween.animate_to(100.0, TweenSpec::default(), |_| {});
    runtime.run_until_idle(100);

    let values = values.values();
    assert_eq!(values.last(), Some(&100.0));
    for pair in values.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn test_cancel_reports_current_value() {
    let mut runtime = TestRuntime::new();
    let position = PositionCell::new(0.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let outcomes = Recorder::new();

    tween.animate_to(300.0, TweenSpec::linear(200), outcomes.sink());
    runtime.run_frames(2);
    let value = position.get();

    tween.cancel();
    tween.cancel();

    assert_eq!(outcomes.values(), vec![TweenOutcome::Cancelled(value)]);
    assert!(runtime.is_idle());
    assert_eq!(position.writer(), Writer::Host);
}

#[test]
fn test_retarget_cancels_previous() {
    let mut runtime = TestRuntime::new();
    let position = PositionCell::new(0.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let first = Recorder::new();
    let second = Recorder::new();

    tween.animate_to(300.0, TweenSpec::linear(200), first.sink());
    runtime.run_frames(2);
    tween.animate_to(-50.0, TweenSpec::linear(100), second.sink());
    runtime.run_until_idle(100);

    assert_eq!(first.len(), 1);
    assert!(!first.values()[0].is_completed());
    assert_eq!(second.values(), vec![TweenOutcome::Completed(-50.0)]);
    assert_eq!(position.get(), -50.0);
}

#[test]
fn test_zero_duration_snaps() {
    let runtime = TestRuntime::new();
    let position = PositionCell::new(10.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let outcomes = Recorder::new();

    tween.animate_to(90.0, TweenSpec::linear(0), outcomes.sink());

    assert_eq!(position.get(), 90.0);
    assert_eq!(outcomes.values(), vec![TweenOutcome::Completed(90.0)]);
    assert!(runtime.is_idle());
}

#[test]
fn test_non_finite_target_is_ignored() {
    let runtime = TestRuntime::new();
    let position = PositionCell::new(10.0);
    let tween = Tween::new(position.clone(), runtime.handle());
    let outcomes = Recorder::new();

    tween.animate_to(f32::NAN, TweenSpec::default(), outcomes.sink());

    assert_eq!(position.get(), 10.0);
    assert_eq!(outcomes.values(), vec![TweenOutcome::Cancelled(10.0)]);
    assert!(!tween.is_running());
}
