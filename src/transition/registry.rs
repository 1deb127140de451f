//! Registry of named transitions

use std::collections::HashMap;
use std::rc::Rc;

use super::hooks::TransitionSpec;

#[derive(Debug, Default)]
pub struct TransitionRegistry {
    transitions: HashMap<String, Rc<TransitionSpec>>,
}

impl TransitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transition, replacing any previous one of the same name
    pub fn register(&mut self, name: impl Into<String>, spec: TransitionSpec) {
        let name = name.into();
        tracing::debug!(transition = %name, css = spec.css_driven, "registered transition");
        self.transitions.insert(name, Rc::new(spec));
    }

    pub fn get(&self, name: &str) -> Option<Rc<TransitionSpec>> {
        self.transitions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transitions.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transitions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
