//! Component system for reusable view blueprints
//!
//! This module provides the infrastructure for defining, storing, and
//! expanding components. A component bundles a template, a data factory,
//! behavior functions and its own local components. Templates reference
//! components by tag name; the [`Composer`] replaces those tags with the
//! component's template, distributing the tag's children into slots.
//!
//! # Example
//!
//! ```rust
//! use viewkit::component::ComponentDefinition;
//! use viewkit::value::bag;
//! use viewkit::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     "greeter",
//!     ComponentDefinition::builder()
//!         .template("<div>{{msg}}</div>")
//!         .data(|| bag([("msg", "hi")])),
//! );
//! assert!(registry.resolve("greeter").is_some());
//! ```

mod registry;
mod resolver;

pub use registry::{
    ComponentBuilder, ComponentDefinition, ComponentOptions, ComponentRegistry, DataFactory,
    Method,
};
pub use resolver::{to_kebab_case, ComposeError, Composer, LocalComponents, ResolutionContext};
