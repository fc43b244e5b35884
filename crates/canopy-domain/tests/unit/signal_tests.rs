//! Readiness signal tests

use std::cell::RefCell;
use std::rc::Rc;

use canopy_domain::entities::ReadinessSignal;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let make = move |tag: &'static str| {
        let sink = sink.clone();
        Box::new(move || sink.borrow_mut().push(tag)) as Box<dyn FnOnce()>
    };
    (log, make)
}

#[test]
fn test_subscribers_fire_in_order_on_fire() {
    let signal = ReadinessSignal::new();
    let (log, make) = recorder();

    signal.subscribe(make("a"));
    signal.subscribe(make("b"));
    assert!(log.borrow().is_empty());
    assert_eq!(signal.pending_count(), 2);

    assert!(signal.fire());
    assert_eq!(*log.borrow(), vec!["a", "b"]);
    assert_eq!(signal.pending_count(), 0);
}

#[test]
fn test_subscribe_after_fire_runs_immediately() {
    let signal = ReadinessSignal::new();
    let (log, make) = recorder();

    signal.fire();
    signal.subscribe(make("late"));
    assert_eq!(*log.borrow(), vec!["late"]);
}

#[test]
fn test_second_fire_is_a_no_op() {
    let signal = ReadinessSignal::new();
    let (log, make) = recorder();

    signal.subscribe(make("once"));
    assert!(signal.fire());
    assert!(!signal.fire());
    assert!(signal.is_ready());
    assert_eq!(*log.borrow(), vec!["once"]);
}

#[test]
fn test_callback_may_subscribe_during_fire() {
    let signal = Rc::new(ReadinessSignal::new());
    let (log, make) = recorder();

    let inner = signal.clone();
    let nested = make("nested");
    signal.subscribe(move || inner.subscribe(nested));
    signal.fire();

    assert_eq!(*log.borrow(), vec!["nested"]);
}
