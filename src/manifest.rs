//! App manifests
//!
//! A manifest declares a whole app in TOML: the root instance, global
//! components (with their own local components), partials and CSS-driven
//! transitions. Behavior functions and JavaScript hooks cannot be written in
//! TOML; attach those to the loaded [`Registry`] and [`InstanceConfig`] in code.
//!
//! ```toml
//! [instance]
//! el = "#app"
//! template = "<my-component></my-component>"
//!
//! [components.my-component]
//! template = "<div>{{ msg }}</div>"
//! data = { msg = "A custom component!" }
//!
//! [partials]
//! my-partial = "<p>This is a partial!</p>"
//!
//! [transitions.expand]
//! enter_class = "expand-in"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::component::ComponentDefinition;
use crate::error::{format_parse_errors, ParseError};
use crate::instance::{Instance, InstanceConfig};
use crate::registry::Registry;
use crate::transition::TransitionSpec;
use crate::value::DataBag;

/// Errors that can occur when loading a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Partial '{name}' does not parse: {}", format_parse_errors(errors))]
    TemplateError {
        name: String,
        errors: Vec<ParseError>,
    },
}

/// A loaded app: registry plus root instance configuration
#[derive(Debug)]
pub struct Manifest {
    /// Optional name for the app
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub registry: Registry,
    pub instance: InstanceConfig,
}

/// TOML structure for deserializing manifests
#[derive(Deserialize)]
struct TomlManifest {
    metadata: Option<TomlMetadata>,
    instance: Option<TomlInstance>,
    #[serde(default)]
    components: BTreeMap<String, TomlComponent>,
    #[serde(default)]
    partials: BTreeMap<String, String>,
    #[serde(default)]
    transitions: BTreeMap<String, TomlTransition>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlInstance {
    #[serde(default = "default_el")]
    el: String,
    template: Option<String>,
    #[serde(default)]
    data: DataBag,
    #[serde(default)]
    components: BTreeMap<String, TomlComponent>,
}

#[derive(Deserialize)]
struct TomlComponent {
    #[serde(default)]
    template: String,
    #[serde(default)]
    props: Vec<String>,
    #[serde(default)]
    data: DataBag,
    #[serde(default)]
    components: BTreeMap<String, TomlComponent>,
}

#[derive(Deserialize)]
struct TomlTransition {
    #[serde(default = "default_css")]
    css: bool,
    enter_class: Option<String>,
    leave_class: Option<String>,
}

fn default_el() -> String {
    "#app".to_string()
}

fn default_css() -> bool {
    true
}

impl TomlComponent {
    fn into_definition(self) -> ComponentDefinition {
        let mut builder = ComponentDefinition::builder().template(self.template);
        for prop in self.props {
            builder = builder.prop(prop);
        }
        for (name, local) in self.components {
            builder = builder.component(name, local.into_definition());
        }
        // Each instance gets its own copy of the declared data
        let data = self.data;
        builder.data(move || data.clone()).build()
    }
}

impl TomlTransition {
    fn into_spec(self) -> TransitionSpec {
        let mut spec = TransitionSpec::new().with_css(self.css);
        if let Some(class) = self.enter_class {
            spec = spec.with_enter_class(class);
        }
        if let Some(class) = self.leave_class {
            spec = spec.with_leave_class(class);
        }
        spec
    }
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let parsed: TomlManifest = toml::from_str(content)?;

        let mut registry = Registry::new();
        for (name, component) in parsed.components {
            registry.register(name, component.into_definition());
        }
        for (name, source) in parsed.partials {
            registry
                .register_partial(name.clone(), &source)
                .map_err(|errors| ManifestError::TemplateError { name, errors })?;
        }
        for (name, transition) in parsed.transitions {
            registry.register_transition(name, transition.into_spec());
        }

        let instance = match parsed.instance {
            Some(toml) => {
                let mut config = InstanceConfig::new(toml.el).with_data(toml.data);
                config.template = toml.template;
                for (name, local) in toml.components {
                    config = config.component(name, local.into_definition());
                }
                config
            }
            None => InstanceConfig::new(default_el()),
        };

        tracing::debug!(
            components = registry.components().len(),
            partials = registry.partials().len(),
            transitions = registry.transitions().len(),
            "manifest loaded"
        );

        Ok(Manifest {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            registry,
            instance,
        })
    }

    /// Create the root instance against this manifest's registry
    pub fn mount(&self) -> Instance<'_> {
        Instance::create(self.instance.clone(), &self.registry)
    }
}
