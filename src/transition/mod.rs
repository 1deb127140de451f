//! Enter/leave transitions
//!
//! Transitions are registered by name with a [`TransitionSpec`] holding up
//! to eight hooks. The external renderer reports insertions and removals to
//! a [`TransitionSequencer`], which fires the hooks in order.
//!
//! # Example
//!
//! ```rust
//! use viewkit::transition::{
//!     ElementId, Phase, TransitionRegistry, TransitionSequencer, TransitionSpec,
//! };
//!
//! let mut registry = TransitionRegistry::new();
//! registry.register(
//!     "fade",
//!     TransitionSpec::new()
//!         .with_css(false)
//!         .enter(|_el, done| done.call()),
//! );
//!
//! let sequencer = TransitionSequencer::new(&registry);
//! sequencer.on_insert(ElementId(1), "fade");
//! assert_eq!(sequencer.phase(ElementId(1)), Phase::Idle);
//! ```

mod hooks;
mod registry;
mod sequencer;

pub use hooks::{DoneHook, ElementId, Hook, HookKind, TransitionSpec};
pub use registry::TransitionRegistry;
pub use sequencer::{Done, Phase, TransitionSequencer};
