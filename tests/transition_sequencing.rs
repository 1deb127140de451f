//! Integration tests for transition hook ordering and cancellation

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use viewkit::transition::{Done, ElementId, Phase, TransitionSequencer, TransitionSpec};
use viewkit::Registry;

type Log = Rc<RefCell<Vec<String>>>;

/// A transition that records every hook it sees; `enter`/`leave` stash their done handle
fn recording(css: bool, log: &Log, pending: &Rc<RefCell<Vec<Done>>>) -> TransitionSpec {
    let hook = |name: &'static str| {
        let log = log.clone();
        move |el: ElementId| log.borrow_mut().push(format!("{} {}", name, el))
    };
    let deferred = |name: &'static str| {
        let log = log.clone();
        let pending = pending.clone();
        move |el: ElementId, done: Done| {
            log.borrow_mut().push(format!("{} {}", name, el));
            pending.borrow_mut().push(done);
        }
    };

    TransitionSpec::new()
        .with_css(css)
        .before_enter(hook("beforeEnter"))
        .enter(deferred("enter"))
        .after_enter(hook("afterEnter"))
        .enter_cancelled(hook("enterCancelled"))
        .before_leave(hook("beforeLeave"))
        .leave(deferred("leave"))
        .after_leave(hook("afterLeave"))
        .leave_cancelled(hook("leaveCancelled"))
}

fn setup(css: bool) -> (Registry, Log, Rc<RefCell<Vec<Done>>>) {
    let log: Log = Rc::default();
    let pending = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    registry.register_transition("fade", recording(css, &log, &pending));
    (registry, log, pending)
}

#[test]
fn test_enter_order_waits_for_done() {
    let (registry, log, pending) = setup(false);
    let sequencer = TransitionSequencer::new(registry.transitions());
    let el = ElementId(1);

    sequencer.on_insert(el, "fade");
    assert_eq!(*log.borrow(), vec!["beforeEnter #1", "enter #1"]);
    assert_eq!(sequencer.phase(el), Phase::Entering);

    // CSS signals do not finish a JavaScript-driven transition
    assert!(!sequencer.on_transition_end(el));
    assert_eq!(sequencer.phase(el), Phase::Entering);

    let done = pending.borrow_mut().pop().expect("Should have a done handle");
    done.call();
    assert_eq!(*log.borrow(), vec!["beforeEnter #1", "enter #1", "afterEnter #1"]);
    assert_eq!(sequencer.phase(el), Phase::Idle);
}

#[test]
fn test_remove_during_enter_cancels() {
    let (registry, log, pending) = setup(false);
    let sequencer = TransitionSequencer::new(registry.transitions());
    let el = ElementId(7);

    sequencer.on_insert(el, "fade");
    let stale = pending.borrow_mut().pop().expect("Should have a done handle");
    sequencer.on_remove(el, "fade");
    assert_eq!(sequencer.phase(el), Phase::Leaving);

    // The cancelled enter cycle completing late changes nothing
    stale.call();
    assert_eq!(sequencer.phase(el), Phase::Leaving);

    pending.borrow_mut().pop().expect("Should have a done handle").call();
    assert_eq!(
        *log.borrow(),
        vec![
            "beforeEnter #7",
            "enter #7",
            "enterCancelled #7",
            "beforeLeave #7",
            "leave #7",
            "afterLeave #7",
        ]
    );
    assert!(!log.borrow().iter().any(|l| l.starts_with("afterEnter")));
}

#[test]
fn test_css_driven_completes_on_transition_end() {
    let (registry, log, _pending) = setup(true);
    let sequencer = TransitionSequencer::new(registry.transitions());
    let el = ElementId(3);

    sequencer.on_insert(el, "fade");
    assert_eq!(sequencer.active_class(el).as_deref(), Some("fade-enter"));
    assert!(sequencer.on_transition_end(el));
    assert_eq!(sequencer.active_class(el), None);

    sequencer.on_remove(el, "fade");
    assert_eq!(sequencer.active_class(el).as_deref(), Some("fade-leave"));
    assert!(sequencer.on_transition_end(el));

    assert_eq!(
        *log.borrow(),
        vec![
            "beforeEnter #3",
            "enter #3",
            "afterEnter #3",
            "beforeLeave #3",
            "leave #3",
            "afterLeave #3",
        ]
    );
}

#[test]
fn test_custom_leave_class() {
    let mut registry = Registry::new();
    registry.register_transition(
        "expand",
        TransitionSpec::new().with_leave_class("customLeaveClassName"),
    );
    let sequencer = TransitionSequencer::new(registry.transitions());
    let el = ElementId(2);

    sequencer.on_insert(el, "expand");
    assert_eq!(sequencer.active_class(el).as_deref(), Some("expand-enter"));
    sequencer.on_remove(el, "expand");
    assert_eq!(sequencer.active_class(el).as_deref(), Some("customLeaveClassName"));
}

#[test]
fn test_hookless_javascript_transition_is_immediate() {
    let mut registry = Registry::new();
    registry.register_transition("instant", TransitionSpec::new().with_css(false));
    let sequencer = TransitionSequencer::new(registry.transitions());

    sequencer.on_insert(ElementId(9), "instant");
    assert_eq!(sequencer.phase(ElementId(9)), Phase::Idle);
    assert_eq!(sequencer.in_flight(), 0);
}

#[test]
fn test_unknown_transition_is_ignored() {
    let registry = Registry::new();
    let sequencer = TransitionSequencer::new(registry.transitions());

    sequencer.on_insert(ElementId(1), "nope");
    sequencer.on_remove(ElementId(1), "nope");
    assert_eq!(sequencer.phase(ElementId(1)), Phase::Idle);
    assert!(!sequencer.on_transition_end(ElementId(1)));
}

#[test]
fn test_sequencer_borrows_app_registry() {
    let (registry, log, pending) = setup(false);
    let sequencer = TransitionSequencer::from(&registry);

    sequencer.on_insert(ElementId(4), "fade");
    assert_eq!(sequencer.phase(ElementId(4)), Phase::Entering);
    pending.borrow_mut().pop().expect("Should have a done handle").call();
    assert_eq!(sequencer.phase(ElementId(4)), Phase::Idle);
    assert_eq!(log.borrow().last().map(String::as_str), Some("afterEnter #4"));
}
