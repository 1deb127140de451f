//! Slot resolution: distributing parent-supplied content into the
//! insertion points a component template declares.
//!
//! Rules, applied per declared slot in template order:
//!
//! - a named slot takes the last fragment tagged with its name,
//! - the default slot takes the first untagged fragment,
//! - otherwise the slot's fallback content is used, if any,
//! - otherwise the slot renders nothing.
//!
//! Fragments tagged with a name that no slot declares are dropped. A name
//! declared more than once receives the same fragment at every occurrence.

use std::collections::{HashMap, HashSet};

/// An insertion point declared by a template
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<C> {
    /// None for the default slot
    pub name: Option<String>,
    /// Inline content rendered when nothing is supplied
    pub fallback: Option<C>,
}

impl<C> Slot<C> {
    pub fn default_slot() -> Self {
        Self {
            name: None,
            fallback: None,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: C) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// Content supplied by the parent, optionally tagged with a slot name
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<C> {
    pub slot: Option<String>,
    pub content: C,
}

impl<C> Fragment<C> {
    pub fn untagged(content: C) -> Self {
        Self {
            slot: None,
            content,
        }
    }

    pub fn tagged(slot: impl Into<String>, content: C) -> Self {
        Self {
            slot: Some(slot.into()),
            content,
        }
    }
}

/// What ends up in a slot
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<C> {
    /// Content supplied by the parent
    Supplied(C),
    /// The slot's own fallback content
    Fallback(C),
    /// Nothing to render
    Empty,
}

impl<C> Resolved<C> {
    pub fn into_content(self) -> Option<C> {
        match self {
            Resolved::Supplied(c) | Resolved::Fallback(c) => Some(c),
            Resolved::Empty => None,
        }
    }

    pub fn is_supplied(&self) -> bool {
        matches!(self, Resolved::Supplied(_))
    }
}

/// Resolve every declared slot against the supplied fragments.
///
/// The output has one entry per slot, in the same order as `slots`.
pub fn resolve_slots<C: Clone>(slots: &[Slot<C>], fragments: &[Fragment<C>]) -> Vec<Resolved<C>> {
    let mut named: HashMap<&str, &C> = HashMap::new();
    for fragment in fragments {
        if let Some(name) = &fragment.slot {
            // Later fragments overwrite earlier ones
            named.insert(name.as_str(), &fragment.content);
        }
    }
    let default = fragments.iter().find(|f| f.slot.is_none()).map(|f| &f.content);

    let declared: HashSet<&str> = slots.iter().filter_map(|s| s.name.as_deref()).collect();
    for name in named.keys().filter(|n| !declared.contains(*n)) {
        tracing::debug!(slot = %name, "dropping content for undeclared slot");
    }

    slots
        .iter()
        .map(|slot| {
            let supplied = match &slot.name {
                Some(name) => named.get(name.as_str()).copied(),
                None => default,
            };
            match (supplied, &slot.fallback) {
                (Some(content), _) => Resolved::Supplied(content.clone()),
                (None, Some(fallback)) => Resolved::Fallback(fallback.clone()),
                (None, None) => Resolved::Empty,
            }
        })
        .collect()
}
