use super::*;
use glide_testing::Recorder;

#[derive(Clone, Debug, PartialEq)]
enum MomentumCall {
    Stop,
    Start { from: f32, velocity: f32 },
}

#[derive(Default)]
struct FakeMomentum {
    calls: RefCell<Vec<MomentumCall>>,
}

impl FakeMomentum {
    fn calls(&self) -> Vec<MomentumCall> {
        self.calls.borrow().clone()
    }

    fn starts(&self) -> Vec<MomentumCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, MomentumCall::Start { .. }))
            .collect()
    }
}

impl MomentumDriver for FakeMomentum {
    fn stop_momentum(&self) {
        self.calls.borrow_mut().push(MomentumCall::Stop);
    }

    fn start_momentum(&self, from_value: f32, velocity: f32) {
        self.calls.borrow_mut().push(MomentumCall::Start {
            from: from_value,
            velocity,
        });
    }
}

fn arbiter_at(value: f32) -> (GestureArbiter, PositionCell, Rc<FakeMomentum>) {
    let position = PositionCell::new(value);
    let momentum = Rc::new(FakeMomentum::default());
    let range = DraggableRange::new(0.0, 500.0).expect("valid range");
    let arbiter = GestureArbiter::new(position.clone(), range, momentum.clone());
    (arbiter, position, momentum)
}

#[test]
fn test_capture_distance_threshold() {
    let (arbiter, _, _) = arbiter_at(200.0);
    assert!(!arbiter.should_capture(200.0, &GestureSample::vertical(0.1, 0.0)));
    assert!(!arbiter.should_capture(200.0, &GestureSample::vertical(-0.1, 0.0)));
    assert!(arbiter.should_capture(200.0, &GestureSample::vertical(0.3, 0.0)));
    assert!(arbiter.should_capture(200.0, &GestureSample::vertical(-0.3, 0.0)));
}

#[test]
fn test_capture_at_rails_only_inward() {
    let (arbiter, _, _) = arbiter_at(0.0);
    // At the bottom: finger up opens, finger down would push past the rail.
    assert!(arbiter.should_capture(0.0, &GestureSample::vertical(-20.0, 0.0)));
    assert!(!arbiter.should_capture(0.0, &GestureSample::vertical(20.0, 0.0)));
    // At the top: the opposite.
    assert!(arbiter.should_capture(500.0, &GestureSample::vertical(20.0, 0.0)));
    assert!(!arbiter.should_capture(500.0, &GestureSample::vertical(-20.0, 0.0)));
}

#[test]
fn test_capture_rejected_when_disabled_or_outside() {
    let (arbiter, _, _) = arbiter_at(200.0);
    assert!(!arbiter.should_capture(600.0, &GestureSample::vertical(10.0, 0.0)));
    assert!(!arbiter.should_capture(200.0, &GestureSample::vertical(f32::NAN, 0.0)));
    arbiter.set_allow_dragging(false);
    assert!(!arbiter.should_capture(200.0, &GestureSample::vertical(10.0, 0.0)));
}

#[test]
fn test_drag_maps_screen_delta_to_position() {
    let (arbiter, position, momentum) = arbiter_at(200.0);
    let starts = Recorder::new();
    arbiter.set_on_drag_start(starts.sink());

    arbiter.on_grant(200.0);
    assert_eq!(momentum.calls(), vec![MomentumCall::Stop]);
    assert_eq!(starts.values(), vec![200.0]);
    assert!(arbiter.is_dragging());
    assert_eq!(position.writer(), Writer::Drag);

    // Finger moves down 50: panel closes by 50.
    assert_eq!(arbiter.on_move(&GestureSample::vertical(50.0, 0.0)), 150.0);
    assert_eq!(position.get(), 150.0);
    // Finger moves up past the top: clamped.
    assert_eq!(arbiter.on_move(&GestureSample::vertical(-900.0, 0.0)), 500.0);
    assert_eq!(arbiter.on_move(&GestureSample::vertical(900.0, 0.0)), 0.0);
}

#[test]
fn test_fast_release_starts_momentum_after_drag_end() {
    let (arbiter, _, momentum) = arbiter_at(200.0);
    let starts_seen_at_end = Recorder::new();
    {
        let momentum = Rc::clone(&momentum);
        let sink = starts_seen_at_end.sink();
        arbiter.set_on_drag_end(move |_| sink(momentum.starts().len()));
    }

    arbiter.on_grant(200.0);
    arbiter.on_move(&GestureSample::vertical(-40.0, 0.0));
    arbiter.on_release(&GestureSample::vertical(-40.0, -1.5));

    assert_eq!(
        momentum.starts(),
        vec![MomentumCall::Start {
            from: 240.0,
            velocity: -1.5
        }]
    );
    // on_drag_end ran before momentum started.
    assert_eq!(starts_seen_at_end.values(), vec![0]);
    assert!(!arbiter.is_dragging());
}

#[test]
fn test_slow_release_rests() {
    let (arbiter, position, momentum) = arbiter_at(200.0);
    let ends = Recorder::new();
    arbiter.set_on_drag_end(ends.sink());

    arbiter.on_grant(200.0);
    arbiter.on_move(&GestureSample::vertical(10.0, 0.0));
    arbiter.on_release(&GestureSample::vertical(10.0, 0.05));

    assert!(momentum.starts().is_empty());
    assert_eq!(ends.values(), vec![190.0]);
    assert_eq!(position.writer(), Writer::Host);
}

#[test]
fn test_momentum_disabled() {
    let (arbiter, _, momentum) = arbiter_at(200.0);
    arbiter.set_allow_momentum(false);
    arbiter.on_grant(200.0);
    arbiter.on_release(&GestureSample::vertical(0.0, 4.0));
    assert!(momentum.starts().is_empty());
}

#[test]
fn test_terminate_never_starts_momentum() {
    let (arbiter, _, momentum) = arbiter_at(200.0);
    let ends = Recorder::new();
    arbiter.set_on_drag_end(ends.sink());

    arbiter.on_grant(200.0);
    arbiter.on_move(&GestureSample::vertical(-30.0, -3.0));
    arbiter.on_terminate();

    assert!(momentum.starts().is_empty());
    assert_eq!(ends.values(), vec![230.0]);
    assert!(arbiter.drag_session().is_none());
}

#[test]
fn test_release_after_range_shrink_is_void() {
    let (arbiter, position, momentum) = arbiter_at(100.0);
    let ends = Recorder::new();
    arbiter.set_on_drag_end(ends.sink());

    arbiter.on_grant(100.0);
    arbiter.on_move(&GestureSample::vertical(20.0, 0.0));
    assert_eq!(position.get(), 80.0);

    arbiter.set_range(DraggableRange::new(150.0, 500.0).expect("valid range"));
    arbiter.on_release(&GestureSample::vertical(20.0, 3.0));

    assert!(ends.is_empty());
    assert!(momentum.starts().is_empty());
    assert!(!arbiter.is_dragging());
}

#[test]
fn test_range_change_mid_drag_clamps_next_move() {
    let (arbiter, _, _) = arbiter_at(300.0);
    arbiter.on_grant(300.0);
    arbiter.set_range(DraggableRange::new(0.0, 320.0).expect("valid range"));
    assert_eq!(arbiter.on_move(&GestureSample::vertical(-50.0, 0.0)), 320.0);
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "without on_grant"))]
fn test_move_without_grant() {
    let (arbiter, position, _) = arbiter_at(200.0);
    assert_eq!(arbiter.on_move(&GestureSample::vertical(50.0, 0.0)), 200.0);
    assert_eq!(position.get(), 200.0);
}

#[test]
#[cfg_attr(debug_assertions, should_panic(expected = "without on_grant"))]
fn test_release_without_grant() {
    let (arbiter, _, momentum) = arbiter_at(200.0);
    arbiter.on_release(&GestureSample::vertical(0.0, 5.0));
    assert!(momentum.calls().is_empty());
}

#[test]
fn test_drag_session_lives_from_grant_to_release() {
    let (arbiter, position, _) = arbiter_at(120.0);
    assert_eq!(arbiter.drag_session(), None);

    arbiter.on_grant(120.0);
    arbiter.on_move(&GestureSample::vertical(-40.0, 0.0));
    assert_eq!(
        arbiter.drag_session(),
        Some(DragSession {
            start_position: 120.0
        })
    );

    arbiter.on_release(&GestureSample::vertical(-40.0, 0.0));
    assert_eq!(arbiter.drag_session(), None);
    assert!(!arbiter.is_dragging());
    assert_eq!(position.writer(), Writer::Host);
}
