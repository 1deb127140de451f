//! The explicit registry object shared by instances and sequencers
//!
//! Created once at startup, filled by registration calls, then lent by
//! reference to [`Instance::create`](crate::Instance::create) and
//! [`TransitionSequencer::new`](crate::transition::TransitionSequencer::new).

use std::rc::Rc;

use crate::component::{ComponentDefinition, ComponentRegistry};
use crate::error::ParseError;
use crate::parser::Template;
use crate::partial::PartialRegistry;
use crate::transition::{TransitionRegistry, TransitionSpec};

#[derive(Debug, Default)]
pub struct Registry {
    components: ComponentRegistry,
    partials: PartialRegistry,
    transitions: TransitionRegistry,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component; last registration for a name wins
    pub fn register(
        &mut self,
        name: impl Into<String>,
        def: impl Into<ComponentDefinition>,
    ) -> Rc<ComponentDefinition> {
        self.components.register(name, def)
    }

    /// Look up a registered component
    pub fn resolve(&self, name: &str) -> Option<Rc<ComponentDefinition>> {
        self.components.resolve(name)
    }

    /// Register a partial template
    pub fn register_partial(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), Vec<ParseError>> {
        self.partials.register(name, source)
    }

    pub fn partial(&self, name: &str) -> Option<Rc<Template>> {
        self.partials.get(name)
    }

    /// Register a transition; last registration for a name wins
    pub fn register_transition(&mut self, name: impl Into<String>, spec: TransitionSpec) {
        self.transitions.register(name, spec);
    }

    pub fn transition(&self, name: &str) -> Option<Rc<TransitionSpec>> {
        self.transitions.get(name)
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn partials(&self) -> &PartialRegistry {
        &self.partials
    }

    pub fn transitions(&self) -> &TransitionRegistry {
        &self.transitions
    }
}
