//! Component resolution - expands component tags, slots and partials into
//! plain elements

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use thiserror::Error;

use crate::error::{format_parse_errors, ParseError};
use crate::parser::ast::{Element, Node, Template};
use crate::registry::Registry;
use crate::renderer::escape_text;
use crate::slot::{resolve_slots, Fragment, Resolved, Slot};
use crate::value::{lookup, DataBag, Value};

use super::registry::ComponentDefinition;

/// Local component table: tag -> definition
pub type LocalComponents = BTreeMap<String, Rc<ComponentDefinition>>;

/// Content supplied for a component's slots, keyed by slot name (None = default)
type SuppliedSlots = HashMap<Option<String>, Vec<Node>>;

/// Errors that can occur while composing a template
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A component template failed to parse
    #[error("template of {component} does not parse: {}", format_parse_errors(errors))]
    Parse {
        component: String,
        errors: Vec<ParseError>,
    },

    /// A component (directly or indirectly) contains itself
    #[error("circular component reference detected: {chain}")]
    CircularReference { chain: String },
}

/// Context for composing one template
#[derive(Debug)]
pub struct ResolutionContext<'s> {
    /// Data visible to interpolations
    pub data: &'s DataBag,
    /// Components visible only in this scope
    pub locals: &'s LocalComponents,
    /// Components and partials currently being expanded (cycle detection)
    pub chain: Vec<String>,
    /// Supplied content for the slots of the component being expanded
    slots: Option<&'s SuppliedSlots>,
}

impl<'s> ResolutionContext<'s> {
    /// Create a root context
    pub fn new(data: &'s DataBag, locals: &'s LocalComponents) -> Self {
        Self {
            data,
            locals,
            chain: Vec::new(),
            slots: None,
        }
    }

    /// Check if a component is currently being expanded
    pub fn is_resolving(&self, name: &str) -> bool {
        self.chain.iter().any(|c| c == name)
    }

    /// Create a nested context for a component's own template
    fn nested<'n>(
        &self,
        name: &str,
        data: &'n DataBag,
        locals: &'n LocalComponents,
        slots: &'n SuppliedSlots,
    ) -> ResolutionContext<'n> {
        let mut chain = self.chain.clone();
        chain.push(name.to_string());
        ResolutionContext {
            data,
            locals,
            chain,
            slots: Some(slots),
        }
    }

    /// Same scope, one more entry on the expansion chain
    fn entering(&self, name: String) -> Self {
        let mut chain = self.chain.clone();
        chain.push(name);
        Self {
            data: self.data,
            locals: self.locals,
            chain,
            slots: self.slots,
        }
    }

    /// Same scope without slot distribution, for fallback content
    fn without_slots(&self) -> Self {
        Self {
            data: self.data,
            locals: self.locals,
            chain: self.chain.clone(),
            slots: None,
        }
    }

    /// Error for expanding `name` again while it is on the chain
    fn circular(&self, name: &str) -> ComposeError {
        let mut chain = self.chain.clone();
        chain.push(name.to_string());
        ComposeError::CircularReference {
            chain: chain.join(" -> "),
        }
    }
}

/// Expands templates against a registry
pub struct Composer<'r> {
    registry: &'r Registry,
}

impl<'r> Composer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Compose a parsed template into plain nodes
    pub fn compose(
        &self,
        template: &Template,
        ctx: &ResolutionContext<'_>,
    ) -> Result<Vec<Node>, ComposeError> {
        let mut out = Vec::new();
        self.compose_nodes(&template.nodes, ctx, &mut out)?;
        Ok(out)
    }

    fn compose_nodes(
        &self,
        nodes: &[Node],
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        for node in nodes {
            self.compose_node(node, ctx, out)?;
        }
        Ok(())
    }

    fn compose_node(
        &self,
        node: &Node,
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        match node {
            Node::Text(text) => out.push(Node::Text(text.clone())),
            Node::Interpolation(path) => {
                let value = lookup(ctx.data, path).map(|v| v.to_string()).unwrap_or_default();
                out.push(Node::Text(escape_text(&value)));
            }
            Node::Element(el) => match el.tag.as_str() {
                "slot" => self.compose_slot(el, ctx, out)?,
                "partial" => self.compose_partial(el, ctx, out)?,
                "component" => match dynamic_name(el, ctx.data) {
                    Some(name) => self.compose_tag(&name, el, ctx, out)?,
                    None => tracing::debug!("dynamic component without a name"),
                },
                tag => self.compose_tag(tag, el, ctx, out)?,
            },
        }
        Ok(())
    }

    /// Expand a tag: a component if one resolves, otherwise a plain element
    fn compose_tag(
        &self,
        tag: &str,
        el: &Element,
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        let resolved = ctx
            .locals
            .get(tag)
            .cloned()
            .or_else(|| self.registry.resolve(tag));

        if let Some(def) = resolved {
            return self.expand_component(&def, el, ctx, out);
        }

        // Custom element names contain a hyphen; an unresolved one renders nothing
        if tag.contains('-') || el.tag == "component" {
            tracing::debug!(component = %tag, "unresolved component ignored");
            return Ok(());
        }

        let mut children = Vec::new();
        self.compose_nodes(&el.children, ctx, &mut children)?;
        out.push(Node::Element(Element {
            tag: el.tag.clone(),
            attrs: el.attrs.clone(),
            children,
        }));
        Ok(())
    }

    fn expand_component(
        &self,
        def: &ComponentDefinition,
        el: &Element,
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        if ctx.is_resolving(&def.name) {
            return Err(ctx.circular(&def.name));
        }

        let template = def.parsed_template().map_err(|errors| ComposeError::Parse {
            component: def.name.clone(),
            errors,
        })?;

        let mut data = def.data();
        for prop in &def.props {
            if let Some(value) = prop_value(el, prop, ctx.data) {
                data.insert(prop.clone(), value);
            }
        }

        // Supplied content is composed in the parent's scope
        let fragments = self.collect_fragments(el, ctx)?;

        let mut slots = Vec::new();
        self.declared_slots(&template.nodes, &mut Vec::new(), &mut slots);
        let supplied: SuppliedSlots = resolve_slots(&slots, &fragments)
            .into_iter()
            .zip(slots)
            .filter_map(|(resolved, slot)| match resolved {
                Resolved::Supplied(content) => Some((slot.name, content)),
                _ => None,
            })
            .collect();

        tracing::debug!(component = %def.name, supplied = supplied.len(), "expanding component");
        let child_ctx = ctx.nested(&def.name, &data, &def.components, &supplied);
        self.compose_nodes(&template.nodes, &child_ctx, out)
    }

    /// Slot markers a template declares, including those reached through
    /// partials. Fallback content stays with each marker.
    fn declared_slots(
        &self,
        nodes: &[Node],
        partials: &mut Vec<String>,
        out: &mut Vec<Slot<Vec<Node>>>,
    ) {
        for node in nodes {
            let Node::Element(el) = node else { continue };
            if el.is_slot() {
                out.push(Slot {
                    name: el.slot_name().map(str::to_string),
                    fallback: None,
                });
            } else if el.tag == "partial" {
                let name = el.attr("name").unwrap_or_default();
                if partials.iter().any(|p| p == name) {
                    continue;
                }
                if let Some(partial) = self.registry.partial(name) {
                    partials.push(name.to_string());
                    self.declared_slots(&partial.nodes, partials, out);
                    partials.pop();
                }
            } else {
                self.declared_slots(&el.children, partials, out);
            }
        }
    }

    /// Split a component tag's children into slot fragments.
    ///
    /// Each child carrying `slot="x"` is its own tagged fragment; all other
    /// non-blank children form a single untagged fragment.
    fn collect_fragments(
        &self,
        el: &Element,
        ctx: &ResolutionContext<'_>,
    ) -> Result<Vec<Fragment<Vec<Node>>>, ComposeError> {
        let mut fragments = Vec::new();
        let mut untagged = Vec::new();
        let mut has_untagged = false;

        for child in &el.children {
            let target = child.as_element().and_then(|c| c.slot_target());
            match target {
                Some(name) => {
                    let mut content = Vec::new();
                    self.compose_node(child, ctx, &mut content)?;
                    fragments.push(Fragment::tagged(name, content));
                }
                None => {
                    has_untagged |= !child.is_blank();
                    self.compose_node(child, ctx, &mut untagged)?;
                }
            }
        }

        if has_untagged {
            fragments.push(Fragment::untagged(untagged));
        }
        Ok(fragments)
    }

    fn compose_slot(
        &self,
        el: &Element,
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        let Some(supplied) = ctx.slots else {
            // Outside a component: render the fallback
            return self.compose_nodes(&el.children, ctx, out);
        };

        match supplied.get(&el.slot_name().map(str::to_string)) {
            Some(nodes) => out.extend(nodes.iter().cloned()),
            // Each marker falls back to its own children
            None => self.compose_nodes(&el.children, &ctx.without_slots(), out)?,
        }
        Ok(())
    }

    fn compose_partial(
        &self,
        el: &Element,
        ctx: &ResolutionContext<'_>,
        out: &mut Vec<Node>,
    ) -> Result<(), ComposeError> {
        let name = el.attr("name").unwrap_or_default();
        let key = format!("partial:{}", name);
        if ctx.is_resolving(&key) {
            return Err(ctx.circular(&key));
        }
        match self.registry.partial(name) {
            Some(partial) => self.compose_nodes(&partial.nodes, &ctx.entering(key), out),
            None => {
                tracing::debug!(partial = %name, "unresolved partial ignored");
                Ok(())
            }
        }
    }
}

/// Component name of `<component is="x">` or `<component :is="path">`
fn dynamic_name(el: &Element, data: &DataBag) -> Option<String> {
    if let Some(name) = el.attr("is").filter(|n| !n.is_empty()) {
        return Some(name.to_string());
    }
    let path = el.attr(":is").or_else(|| el.attr("v-bind:is"))?;
    lookup(data, path).and_then(Value::as_str).map(str::to_string)
}

/// Value for a declared prop from the component tag's attributes.
///
/// `myMsg` is fed by `my-msg="literal"`, `:my-msg="path"` or
/// `v-bind:my-msg="path"`; bound paths are looked up in the parent scope.
fn prop_value(el: &Element, prop: &str, parent: &DataBag) -> Option<Value> {
    let kebab = to_kebab_case(prop);
    for name in [kebab.as_str(), prop] {
        if let Some(path) = el
            .attr(&format!(":{}", name))
            .or_else(|| el.attr(&format!("v-bind:{}", name)))
        {
            return lookup(parent, path).cloned();
        }
        if let Some(literal) = el.attr(name) {
            return Some(Value::from(literal));
        }
    }
    None
}

/// `myMessage` -> `my-message`
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
