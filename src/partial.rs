//! Partials: named template snippets spliced in with `<partial name="...">`

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::ParseError;
use crate::parser::{self, Template};

/// Registry of partial templates
#[derive(Debug, Default)]
pub struct PartialRegistry {
    partials: HashMap<String, Rc<Template>>,
}

impl PartialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a partial, replacing any previous one of the same name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<(), Vec<ParseError>> {
        let name = name.into();
        let template = parser::parse(source)?;
        let replaced = self.partials.insert(name.clone(), Rc::new(template)).is_some();
        tracing::debug!(partial = %name, replaced, "registered partial");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Rc<Template>> {
        self.partials.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.partials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}
