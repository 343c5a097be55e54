use crate::{Clock, DefaultScheduler, Runtime, RuntimeScheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CountingScheduler {
    requests: AtomicUsize,
}

impl RuntimeScheduler for CountingScheduler {
    fn schedule_frame(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct FixedClock {
    nanos: AtomicU64,
}

impl Clock for FixedClock {
    fn now_nanos(&self) -> u64 {
        self.nanos.load(Ordering::SeqCst)
    }
}

fn runtime_with_clock() -> (Runtime, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::default());
    (Runtime::new(Arc::new(DefaultScheduler), clock.clone()), clock)
}

#[test]
fn test_registering_a_callback_requests_a_frame() {
    let scheduler = Arc::new(CountingScheduler::default());
    let runtime = Runtime::new(scheduler.clone(), Arc::new(FixedClock::default()));

    let _registration = runtime.frame_clock().with_frame_nanos(|_| {});

    assert_eq!(scheduler.requests.load(Ordering::SeqCst), 1);
    assert!(runtime.needs_frame());
    assert!(runtime.has_frame_callbacks());
}

#[test]
fn test_drain_runs_callbacks_with_frame_time() {
    let (runtime, _) = runtime_with_clock();
    let seen = Rc::new(Cell::new(0u64));
    let seen_in_cb = Rc::clone(&seen);

    let _registration = runtime
        .frame_clock()
        .with_frame_nanos(move |time| seen_in_cb.set(time));
    runtime.drain_frame_callbacks(16_000_000);

    assert_eq!(seen.get(), 16_000_000);
    assert!(!runtime.needs_frame());
}

#[test]
fn test_dropping_registration_cancels_callback() {
    let (runtime, _) = runtime_with_clock();
    let fired = Rc::new(Cell::new(false));
    let fired_in_cb = Rc::clone(&fired);

    let registration = runtime
        .frame_clock()
        .with_frame_nanos(move |_| fired_in_cb.set(true));
    drop(registration);
    runtime.drain_frame_callbacks(0);

    assert!(!fired.get());
    assert!(!runtime.has_frame_callbacks());
}

#[test]
fn test_callbacks_registered_during_drain_wait_for_next_frame() {
    let (runtime, _) = runtime_with_clock();
    let clock = runtime.frame_clock();
    let frames = Rc::new(RefCell::new(Vec::new()));
    let nested = Rc::new(RefCell::new(None));

    let frames_outer = Rc::clone(&frames);
    let nested_slot = Rc::clone(&nested);
    let clock_inner = clock.clone();
    let _outer = clock.with_frame_millis(move |ms| {
        frames_outer.borrow_mut().push(("outer", ms));
        let frames_inner = Rc::clone(&frames_outer);
        let registration =
            clock_inner.with_frame_millis(move |ms| frames_inner.borrow_mut().push(("inner", ms)));
        *nested_slot.borrow_mut() = Some(registration);
    });

    runtime.drain_frame_callbacks(16_000_000);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 16)]);

    runtime.drain_frame_callbacks(32_000_000);
    assert_eq!(frames.borrow().as_slice(), &[("outer", 16), ("inner", 32)]);
}

#[test]
fn test_callback_cancelled_by_earlier_callback_in_same_frame_does_not_run() {
    let (runtime, _) = runtime_with_clock();
    let clock = runtime.frame_clock();
    let fired = Rc::new(Cell::new(false));
    let fired_in_cb = Rc::clone(&fired);
    let victim = Rc::new(RefCell::new(None));
    let victim_slot = Rc::clone(&victim);

    let _first = clock.with_frame_nanos(move |_| {
        if let Some(registration) = victim_slot.borrow_mut().take() {
            drop(registration);
        }
    });
    *victim.borrow_mut() = Some(clock.with_frame_nanos(move |_| fired_in_cb.set(true)));

    runtime.drain_frame_callbacks(0);
    assert!(!fired.get());
}

#[test]
fn test_handle_is_inert_after_runtime_drop() {
    let (runtime, clock) = runtime_with_clock();
    clock.nanos.store(5_000_000, Ordering::SeqCst);
    let handle = runtime.handle();
    assert_eq!(handle.now_nanos(), 5_000_000);
    assert_eq!(handle.elapsed_millis(1_000_000), 4.0);

    drop(runtime);

    assert!(!handle.is_alive());
    assert_eq!(handle.now_nanos(), 0);
    let registration = handle.frame_clock().with_frame_nanos(|_| {});
    assert!(!registration.is_active());
}
