//! Component registry for storing and retrieving component definitions

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::error::ParseError;
use crate::instance::Scope;
use crate::parser::{self, Template};
use crate::value::{DataBag, Value};

/// Factory producing a fresh data bag per instantiation
pub type DataFactory = Rc<dyn Fn() -> DataBag>;

/// Behavior function bound to an instance or component
pub type Method = Rc<dyn Fn(&mut Scope<'_>, &[Value])>;

/// A reusable template + data + behavior blueprint
#[derive(Clone, Default)]
pub struct ComponentDefinition {
    /// Registered name; empty until the definition is registered or nested
    pub name: String,
    /// Template source
    pub template: String,
    /// Declared prop names (camelCase)
    pub props: Vec<String>,
    /// Components visible only inside this component's template
    pub components: BTreeMap<String, Rc<ComponentDefinition>>,
    /// Behavior functions
    pub methods: BTreeMap<String, Method>,
    data: Option<DataFactory>,
    parsed: OnceCell<Result<Rc<Template>, Vec<ParseError>>>,
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("template", &self.template)
            .field("props", &self.props)
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

impl ComponentDefinition {
    /// Start an explicit definition
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::default()
    }

    /// Produce a fresh data bag; empty when no factory was given
    pub fn data(&self) -> DataBag {
        self.data.as_ref().map(|f| f()).unwrap_or_default()
    }

    /// Look up a component declared locally in this definition
    pub fn local(&self, tag: &str) -> Option<&Rc<ComponentDefinition>> {
        self.components.get(tag)
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Parsed template, parsed once and cached
    pub fn parsed_template(&self) -> Result<Rc<Template>, Vec<ParseError>> {
        self.parsed
            .get_or_init(|| parser::parse(&self.template).map(Rc::new))
            .clone()
    }

    fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Builder for the explicit definition path
#[derive(Default)]
pub struct ComponentBuilder {
    def: ComponentDefinition,
}

impl ComponentBuilder {
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.def.template = template.into();
        self
    }

    pub fn prop(mut self, name: impl Into<String>) -> Self {
        self.def.props.push(name.into());
        self
    }

    /// Declare a component local to this one
    pub fn component(
        mut self,
        name: impl Into<String>,
        def: impl Into<ComponentDefinition>,
    ) -> Self {
        let name = name.into();
        let def = def.into().named(name.clone());
        self.def.components.insert(name, Rc::new(def));
        self
    }

    pub fn data(mut self, factory: impl Fn() -> DataBag + 'static) -> Self {
        self.def.data = Some(Rc::new(factory));
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Scope<'_>, &[Value]) + 'static,
    ) -> Self {
        self.def.methods.insert(name.into(), Rc::new(f));
        self
    }

    pub fn build(self) -> ComponentDefinition {
        self.def
    }
}

/// Structural literal for the inline definition path.
///
/// ```rust
/// use viewkit::component::{ComponentDefinition, ComponentOptions};
///
/// let def: ComponentDefinition = ComponentOptions {
///     template: "<div>child sugar</div>".into(),
///     ..Default::default()
/// }
/// .into();
/// assert_eq!(def.template, "<div>child sugar</div>");
/// ```
#[derive(Default)]
pub struct ComponentOptions {
    pub template: String,
    pub props: Vec<String>,
    pub components: Vec<(String, ComponentDefinition)>,
    pub data: Option<DataFactory>,
    pub methods: Vec<(String, Method)>,
}

impl From<ComponentOptions> for ComponentDefinition {
    fn from(options: ComponentOptions) -> Self {
        ComponentDefinition {
            name: String::new(),
            template: options.template,
            props: options.props,
            components: options
                .components
                .into_iter()
                .map(|(name, def)| {
                    let def = def.named(name.clone());
                    (name, Rc::new(def))
                })
                .collect(),
            methods: options.methods.into_iter().collect(),
            data: options.data,
            parsed: OnceCell::new(),
        }
    }
}

impl From<ComponentBuilder> for ComponentDefinition {
    fn from(builder: ComponentBuilder) -> Self {
        builder.build()
    }
}

/// Registry for storing component definitions
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Rc<ComponentDefinition>>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under `name`, replacing any previous one.
    ///
    /// Returns the stored definition; `resolve(name)` hands out this same
    /// object until the name is registered again.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        def: impl Into<ComponentDefinition>,
    ) -> Rc<ComponentDefinition> {
        let name = name.into();
        let def = Rc::new(def.into().named(name.clone()));
        let replaced = self.components.insert(name.clone(), Rc::clone(&def)).is_some();
        tracing::debug!(component = %name, replaced, "registered component");
        def
    }

    /// Look up a component by name
    pub fn resolve(&self, name: &str) -> Option<Rc<ComponentDefinition>> {
        self.components.get(name).cloned()
    }

    /// Borrow a component by name
    pub fn get(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.get(name).map(|d| d.as_ref())
    }

    /// Check if a component exists
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::bag;

    #[test]
    fn test_registry_register_and_resolve() {
        let mut registry = ComponentRegistry::new();
        let stored = registry.register(
            "my-component",
            ComponentDefinition::builder().template("<div>A custom component!</div>"),
        );

        let resolved = registry.resolve("my-component").expect("Should resolve");
        assert!(Rc::ptr_eq(&stored, &resolved));
        assert_eq!(resolved.name, "my-component");
        assert!(registry.contains("my-component"));
    }

    #[test]
    fn test_registry_last_write_wins() {
        let mut registry = ComponentRegistry::new();
        let first = registry.register("box", ComponentDefinition::builder().template("<b>1</b>"));
        let second = registry.register("box", ComponentDefinition::builder().template("<b>2</b>"));

        let resolved = registry.resolve("box").expect("Should resolve");
        assert!(Rc::ptr_eq(&second, &resolved));
        assert!(!Rc::ptr_eq(&first, &resolved));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_not_found() {
        let registry = ComponentRegistry::new();
        assert!(registry.resolve("nope").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_builder_and_literal_paths_agree() {
        let built = ComponentDefinition::builder()
            .template("<div>parent sugar<child-sugar></child-sugar></div>")
            .component(
                "child-sugar",
                ComponentDefinition::builder().template("<div>child sugar</div>"),
            )
            .build();

        let literal: ComponentDefinition = ComponentOptions {
            template: "<div>parent sugar<child-sugar></child-sugar></div>".into(),
            components: vec![(
                "child-sugar".into(),
                ComponentOptions {
                    template: "<div>child sugar</div>".into(),
                    ..Default::default()
                }
                .into(),
            )],
            ..Default::default()
        }
        .into();

        assert_eq!(built.template, literal.template);
        let a = built.local("child-sugar").expect("Should have child");
        let b = literal.local("child-sugar").expect("Should have child");
        assert_eq!(a.name, b.name);
        assert_eq!(a.template, b.template);
    }

    #[test]
    fn test_data_factory_is_fresh() {
        let def = ComponentDefinition::builder()
            .data(|| bag([("msg", "hello")]))
            .build();

        let mut first = def.data();
        first.insert("msg".into(), "changed".into());
        assert_eq!(def.data()["msg"], Value::from("hello"));
    }

    #[test]
    fn test_parsed_template_is_cached() {
        let def = ComponentDefinition::builder().template("<p>x</p>").build();
        let a = def.parsed_template().expect("Should parse");
        let b = def.parsed_template().expect("Should parse");
        assert!(Rc::ptr_eq(&a, &b));
    }
}
