//! Per-element enter/leave state machine
//!
//! ```text
//! on_insert: [cancel in-flight] -> beforeEnter -> enter(done) ... -> afterEnter
//! on_remove: [cancel in-flight] -> beforeLeave -> leave(done) ... -> afterLeave
//! ```
//!
//! The `after*` hook fires only once the cycle completes: through the
//! [`Done`] handle for JavaScript-driven transitions, or through
//! [`TransitionSequencer::on_transition_end`] for CSS-driven ones. Starting
//! a new cycle on an element whose previous cycle is still running fires the
//! previous cycle's `*Cancelled` hook first; stopping any external animation
//! is up to that hook.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::hooks::{ElementId, HookKind, TransitionSpec};
use super::registry::TransitionRegistry;
use crate::registry::Registry;

/// Where an element is in its transition lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Entering,
    Leaving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Enter,
    Leave,
}

impl Direction {
    fn before(self) -> HookKind {
        match self {
            Direction::Enter => HookKind::BeforeEnter,
            Direction::Leave => HookKind::BeforeLeave,
        }
    }

    fn main(self) -> HookKind {
        match self {
            Direction::Enter => HookKind::Enter,
            Direction::Leave => HookKind::Leave,
        }
    }

    fn after(self) -> HookKind {
        match self {
            Direction::Enter => HookKind::AfterEnter,
            Direction::Leave => HookKind::AfterLeave,
        }
    }

    fn cancelled(self) -> HookKind {
        match self {
            Direction::Enter => HookKind::EnterCancelled,
            Direction::Leave => HookKind::LeaveCancelled,
        }
    }
}

struct InFlight {
    direction: Direction,
    cycle: u64,
    name: String,
    spec: Rc<TransitionSpec>,
}

#[derive(Default)]
struct State {
    next_cycle: u64,
    in_flight: HashMap<ElementId, InFlight>,
}

/// One-shot completion handle passed to `enter` and `leave` hooks.
///
/// Calling it finishes the cycle it was issued for. It may be called
/// from inside the hook or kept and called later; if that cycle was
/// cancelled in the meantime the call does nothing.
pub struct Done {
    element: ElementId,
    cycle: u64,
    state: Weak<RefCell<State>>,
}

impl Done {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn call(self) {
        if let Some(state) = self.state.upgrade() {
            complete(&state, self.element, Some(self.cycle));
        }
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done")
            .field("element", &self.element)
            .field("cycle", &self.cycle)
            .finish()
    }
}

fn fire(spec: &TransitionSpec, kind: HookKind, element: ElementId) {
    if let Some(hook) = spec.plain_hook(kind) {
        tracing::debug!(%element, hook = %kind, "firing transition hook");
        hook(element);
    }
}

/// Finish the in-flight cycle of `element`. With `cycle` set, only that
/// cycle is finished. Returns whether anything completed.
fn complete(state: &RefCell<State>, element: ElementId, cycle: Option<u64>) -> bool {
    let finished = {
        let Ok(mut s) = state.try_borrow_mut() else {
            tracing::warn!(%element, "transition state busy; completion dropped");
            return false;
        };
        let matches = s
            .in_flight
            .get(&element)
            .is_some_and(|f| cycle.map_or(true, |c| c == f.cycle));
        if matches {
            s.in_flight.remove(&element)
        } else {
            None
        }
    };

    match finished {
        Some(flight) => {
            tracing::debug!(%element, transition = %flight.name, "transition complete");
            fire(&flight.spec, flight.direction.after(), element);
            true
        }
        None => {
            tracing::warn!(%element, ?cycle, "ignoring completion for a cycle no longer in flight");
            false
        }
    }
}

/// Drives transition hooks for elements inserted and removed by the renderer
pub struct TransitionSequencer<'r> {
    registry: &'r TransitionRegistry,
    state: Rc<RefCell<State>>,
}

impl<'r> From<&'r Registry> for TransitionSequencer<'r> {
    /// Sequence the transitions registered on an app registry
    fn from(registry: &'r Registry) -> Self {
        Self::new(registry.transitions())
    }
}

impl<'r> TransitionSequencer<'r> {
    pub fn new(registry: &'r TransitionRegistry) -> Self {
        Self {
            registry,
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    /// The renderer inserted `element` with transition `name`
    pub fn on_insert(&self, element: ElementId, name: &str) {
        self.start(element, name, Direction::Enter);
    }

    /// The renderer is removing `element` with transition `name`
    pub fn on_remove(&self, element: ElementId, name: &str) {
        self.start(element, name, Direction::Leave);
    }

    /// The renderer observed the end of a CSS transition or animation on
    /// `element`. Ignored for transitions that are not CSS-driven.
    pub fn on_transition_end(&self, element: ElementId) -> bool {
        let css_driven = self
            .state
            .borrow()
            .in_flight
            .get(&element)
            .map(|f| f.spec.css_driven);
        match css_driven {
            Some(true) => complete(&self.state, element, None),
            Some(false) => {
                tracing::debug!(%element, "transition end ignored; waiting for done");
                false
            }
            None => false,
        }
    }

    /// Interrupt the in-flight cycle of `element`, firing its cancelled hook.
    /// Returns false when nothing was in flight.
    pub fn cancel(&self, element: ElementId) -> bool {
        let Some(flight) = self.state.borrow_mut().in_flight.remove(&element) else {
            return false;
        };
        tracing::debug!(%element, transition = %flight.name, "transition cancelled");
        fire(&flight.spec, flight.direction.cancelled(), element);
        true
    }

    pub fn phase(&self, element: ElementId) -> Phase {
        match self.state.borrow().in_flight.get(&element) {
            Some(f) if f.direction == Direction::Enter => Phase::Entering,
            Some(_) => Phase::Leaving,
            None => Phase::Idle,
        }
    }

    /// CSS class the renderer should apply while a CSS-driven cycle runs
    pub fn active_class(&self, element: ElementId) -> Option<String> {
        let state = self.state.borrow();
        let flight = state.in_flight.get(&element)?;
        if !flight.spec.css_driven {
            return None;
        }
        Some(match flight.direction {
            Direction::Enter => flight.spec.enter_class_for(&flight.name),
            Direction::Leave => flight.spec.leave_class_for(&flight.name),
        })
    }

    /// Number of elements with a cycle in flight
    pub fn in_flight(&self) -> usize {
        self.state.borrow().in_flight.len()
    }

    fn start(&self, element: ElementId, name: &str, direction: Direction) {
        self.cancel(element);

        let Some(spec) = self.registry.get(name) else {
            tracing::debug!(%element, transition = %name, "unknown transition; nothing to run");
            return;
        };

        let cycle = {
            let mut state = self.state.borrow_mut();
            state.next_cycle += 1;
            let cycle = state.next_cycle;
            state.in_flight.insert(
                element,
                InFlight {
                    direction,
                    cycle,
                    name: name.to_string(),
                    spec: Rc::clone(&spec),
                },
            );
            cycle
        };

        fire(&spec, direction.before(), element);

        match spec.done_hook(direction.main()) {
            Some(hook) => {
                tracing::debug!(%element, hook = %direction.main(), "firing transition hook");
                hook(
                    element,
                    Done {
                        element,
                        cycle,
                        state: Rc::downgrade(&self.state),
                    },
                );
            }
            None if !spec.css_driven => {
                complete(&self.state, element, Some(cycle));
            }
            // CSS-driven with no hook: wait for on_transition_end
            None => {}
        }
    }
}
