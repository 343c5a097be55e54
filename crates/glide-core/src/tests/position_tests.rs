use crate::{clamp_position, DraggableRange, MotionConfig, PositionCell, RangeError, Writer};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_listeners_receive_writes_until_disposed() {
    let cell = PositionCell::new(0.0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_in_listener = Rc::clone(&seen);
    let subscription = cell.subscribe(move |value| seen_in_listener.borrow_mut().push(value));

    assert!(cell.set(Writer::Host, 10.0));
    assert!(cell.set(Writer::Host, 20.0));
    subscription.dispose();
    assert!(cell.set(Writer::Host, 30.0));

    assert_eq!(seen.borrow().as_slice(), &[10.0, 20.0]);
    assert_eq!(cell.listener_count(), 0);
    assert_eq!(cell.get(), 30.0);
}

#[test]
fn test_repeated_value_is_not_re_broadcast() {
    let cell = PositionCell::new(5.0);
    let count = Rc::new(RefCell::new(0));
    let count_in_listener = Rc::clone(&count);
    let _subscription = cell.subscribe(move |_| *count_in_listener.borrow_mut() += 1);

    cell.set(Writer::Host, 5.0);
    cell.set(Writer::Host, 6.0);
    cell.set(Writer::Host, 6.0);

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_non_finite_values_are_rejected() {
    let cell = PositionCell::new(1.0);
    assert!(!cell.set(Writer::Host, f32::NAN));
    assert!(!cell.set(Writer::Host, f32::INFINITY));
    assert_eq!(cell.get(), 1.0);
    assert_eq!(PositionCell::new(f32::NAN).get(), 0.0);
}

#[test]
fn test_ownership_moves_between_writers() {
    let cell = PositionCell::new(0.0);
    assert_eq!(cell.acquire(Writer::Flick), Writer::Host);
    assert!(cell.set(Writer::Flick, -3.0));

    cell.release(Writer::Drag);
    assert_eq!(cell.writer(), Writer::Flick);

    cell.release(Writer::Flick);
    assert_eq!(cell.writer(), Writer::Host);
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "owns it"))]
fn test_writes_from_non_owner_are_rejected() {
    let cell = PositionCell::new(0.0);
    cell.acquire(Writer::Drag);
    assert!(!cell.set(Writer::Flick, 4.0));
    assert_eq!(cell.get(), 0.0);
}

#[test]
fn test_listener_may_read_the_cell() {
    let cell = PositionCell::new(0.0);
    let reader = cell.clone();
    let seen = Rc::new(RefCell::new(None));
    let seen_in_listener = Rc::clone(&seen);
    let _subscription = cell.subscribe(move |_| {
        *seen_in_listener.borrow_mut() = Some(reader.get());
    });

    cell.set(Writer::Host, 42.0);
    assert_eq!(*seen.borrow(), Some(42.0));
}

#[test]
fn test_range_validation() {
    assert_eq!(
        DraggableRange::new(10.0, 0.0),
        Err(RangeError::Inverted {
            bottom: 10.0,
            top: 0.0
        })
    );
    assert!(matches!(
        DraggableRange::new(f32::NAN, 0.0),
        Err(RangeError::NonFinite { .. })
    ));

    let range = DraggableRange::new(-100.0, 400.0).expect("valid range");
    assert_eq!(range.span(), 500.0);
    assert_eq!(range.clamp(900.0), 400.0);
    assert_eq!(range.clamp(-900.0), -100.0);
    assert!(range.contains(0.0));
    assert!(range.is_at_boundary(400.0));
    assert!(!range.is_at_boundary(399.0));
}

#[test]
fn test_clamp_position_keeps_value_inside() {
    assert_eq!(clamp_position(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_position(-1.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_position(11.0, 0.0, 10.0), 10.0);
}

#[test]
fn test_motion_config_defaults() {
    let config = MotionConfig::default();
    assert_eq!(config.time_constant_ms, 325.0);
    assert_eq!(config.min_delta_threshold, 0.5);
    assert_eq!(config.min_distance_threshold, 0.24);
    assert_eq!(config.min_velocity_threshold, 0.1);
    assert_eq!(config.prediction_horizon_steps, 60);
    assert!(config.is_valid());
    assert!(!config.with_default_friction(0.0).is_valid());
    assert!(!config.with_time_constant(f32::NAN).is_valid());
}
