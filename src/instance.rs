//! Instances: a mount target bound to a data bag, behavior functions and
//! local components
//!
//! Messages from a child to an ancestor are passed explicitly: [`Instance::call`]
//! returns whatever the method dispatched, and the caller hands each message
//! to the intended ancestor with [`Instance::deliver`].

use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

use crate::component::{
    ComponentDefinition, ComposeError, Composer, LocalComponents, Method, ResolutionContext,
};
use crate::error::{format_parse_errors, ParseError};
use crate::parser::{self, Node};
use crate::registry::Registry;
use crate::renderer::to_html;
use crate::value::{lookup, DataBag, Value};
use crate::RenderConfig;

/// Errors from driving an instance
#[derive(Debug, Error)]
pub enum InstanceError {
    /// No method of that name on the instance
    #[error("unknown method '{name}' on instance {el}")]
    UnknownMethod { el: String, name: String },

    /// The instance's own template does not parse
    #[error("template of {el} does not parse: {}", format_parse_errors(errors))]
    Parse { el: String, errors: Vec<ParseError> },

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// A message dispatched towards an ancestor
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub event: String,
    pub payload: Vec<Value>,
}

/// Outcome of delivering a message
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// A listener ran; carries anything it dispatched in turn
    Handled(Vec<Message>),
    /// No listener for the event
    Unhandled,
}

/// What a behavior function can see and do
pub struct Scope<'a> {
    data: &'a mut DataBag,
    outbox: &'a mut Vec<Message>,
}

impl<'a> Scope<'a> {
    pub fn data(&self) -> &DataBag {
        self.data
    }

    pub fn data_mut(&mut self) -> &mut DataBag {
        self.data
    }

    /// Look up a dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(self.data, path)
    }

    /// String value of a top-level key; empty when absent or not a string
    pub fn get_str(&self, key: &str) -> &str {
        self.data.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Mutable list under `key`, created empty if absent.
    /// None when the key holds something other than a list.
    pub fn list_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        self.data
            .entry(key.to_string())
            .or_insert_with(|| Value::List(Vec::new()))
            .as_list_mut()
    }

    /// Send a message towards the ancestors
    pub fn dispatch(&mut self, event: impl Into<String>, payload: Vec<Value>) {
        self.outbox.push(Message {
            event: event.into(),
            payload,
        });
    }
}

/// Construction options for an [`Instance`]
#[derive(Clone, Default)]
pub struct InstanceConfig {
    /// Mount target selector, e.g. `#app`
    pub el: String,
    pub template: Option<String>,
    pub data: DataBag,
    pub methods: BTreeMap<String, Method>,
    pub components: LocalComponents,
    /// Event name -> method run when a child dispatches that event
    pub listeners: BTreeMap<String, String>,
}

impl std::fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceConfig")
            .field("el", &self.el)
            .field("template", &self.template)
            .field("data", &self.data)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("components", &self.components)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl InstanceConfig {
    pub fn new(el: impl Into<String>) -> Self {
        Self {
            el: el.into(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_data(mut self, data: DataBag) -> Self {
        self.data = data;
        self
    }

    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Scope<'_>, &[Value]) + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(f));
        self
    }

    /// Declare a component local to this instance
    pub fn component(
        mut self,
        name: impl Into<String>,
        def: impl Into<ComponentDefinition>,
    ) -> Self {
        let name = name.into();
        let mut def = def.into();
        def.name = name.clone();
        self.components.insert(name, Rc::new(def));
        self
    }

    /// Run `method` when a child dispatches `event`
    pub fn listen(mut self, event: impl Into<String>, method: impl Into<String>) -> Self {
        self.listeners.insert(event.into(), method.into());
        self
    }
}

/// A mounted binding of data and behavior
pub struct Instance<'r> {
    el: String,
    template: Option<String>,
    data: DataBag,
    methods: BTreeMap<String, Method>,
    components: LocalComponents,
    listeners: BTreeMap<String, String>,
    registry: &'r Registry,
}

impl<'r> Instance<'r> {
    /// Create an instance; component lookups go to `registry`
    pub fn create(config: InstanceConfig, registry: &'r Registry) -> Self {
        tracing::debug!(el = %config.el, methods = config.methods.len(), "instance created");
        Self {
            el: config.el,
            template: config.template,
            data: config.data,
            methods: config.methods,
            components: config.components,
            listeners: config.listeners,
            registry,
        }
    }

    /// Create an instance from a component definition with a fresh data bag
    pub fn from_component(
        def: &ComponentDefinition,
        el: impl Into<String>,
        registry: &'r Registry,
    ) -> Self {
        let config = InstanceConfig {
            el: el.into(),
            template: Some(def.template.clone()),
            data: def.data(),
            methods: def.methods.clone(),
            components: def.components.clone(),
            listeners: BTreeMap::new(),
        };
        Self::create(config, registry)
    }

    pub fn el(&self) -> &str {
        &self.el
    }

    pub fn data(&self) -> &DataBag {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataBag {
        &mut self.data
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.data, path)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Invoke a behavior function. Returns the messages it dispatched.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Vec<Message>, InstanceError> {
        let method = self
            .methods
            .get(name)
            .cloned()
            .ok_or_else(|| InstanceError::UnknownMethod {
                el: self.el.clone(),
                name: name.to_string(),
            })?;

        let mut outbox = Vec::new();
        let mut scope = Scope {
            data: &mut self.data,
            outbox: &mut outbox,
        };
        method(&mut scope, args);
        tracing::debug!(el = %self.el, method = %name, dispatched = outbox.len(), "method called");
        Ok(outbox)
    }

    /// Hand a child's message to this instance's listener, if any
    pub fn deliver(&mut self, message: &Message) -> Result<Delivery, InstanceError> {
        let Some(method) = self.listeners.get(&message.event).cloned() else {
            tracing::debug!(el = %self.el, event = %message.event, "no listener");
            return Ok(Delivery::Unhandled);
        };
        let dispatched = self.call(&method, &message.payload)?;
        Ok(Delivery::Handled(dispatched))
    }

    /// Compose the instance template into plain nodes
    pub fn compose(&self) -> Result<Vec<Node>, InstanceError> {
        let Some(source) = &self.template else {
            return Ok(Vec::new());
        };
        let template = parser::parse(source).map_err(|errors| InstanceError::Parse {
            el: self.el.clone(),
            errors,
        })?;
        let ctx = ResolutionContext::new(&self.data, &self.components);
        Ok(Composer::new(self.registry).compose(&template, &ctx)?)
    }

    /// Render the instance template to HTML with default configuration
    pub fn render(&self) -> Result<String, InstanceError> {
        self.render_with_config(&RenderConfig::default())
    }

    pub fn render_with_config(&self, config: &RenderConfig) -> Result<String, InstanceError> {
        let mut nodes = self.compose()?;
        if config.wrap_mount {
            nodes = vec![Node::Element(mount_element(&self.el, nodes))];
        }
        Ok(to_html(&nodes, &config.html))
    }
}

/// `#app` -> `<div id="app">`, `.app` -> `<div class="app">`
fn mount_element(el: &str, children: Vec<Node>) -> parser::Element {
    let mut mount = parser::Element::new("div");
    if let Some(id) = el.strip_prefix('#') {
        mount = mount.with_attr("id", id);
    } else if let Some(class) = el.strip_prefix('.') {
        mount = mount.with_attr("class", class);
    }
    mount.children = children;
    mount
}

/// Call `method` on `child` and deliver everything it dispatched to `parent`.
/// Returns how many messages a listener handled.
pub fn call_and_dispatch(
    child: &mut Instance<'_>,
    parent: &mut Instance<'_>,
    method: &str,
    args: &[Value],
) -> Result<usize, InstanceError> {
    let mut handled = 0;
    for message in child.call(method, args)? {
        if let Delivery::Handled(_) = parent.deliver(&message)? {
            handled += 1;
        }
    }
    Ok(handled)
}
