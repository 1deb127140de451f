//! viewkit - component composition for declarative view templates
//!
//! This library provides a template parser, a component registry with slot
//! distribution, partials, a transition hook sequencer and data-bound
//! instances that render to HTML.
//!
//! # Example
//!
//! ```rust
//! use viewkit::component::ComponentDefinition;
//! use viewkit::value::DataBag;
//! use viewkit::{render_template, Registry};
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     "my-component",
//!     ComponentDefinition::builder().template("<div>A custom component!</div>"),
//! );
//!
//! let html =
//!     render_template("<my-component></my-component>", &registry, &DataBag::new()).unwrap();
//! assert_eq!(html, "<div>A custom component!</div>");
//! ```

pub mod component;
pub mod error;
pub mod instance;
pub mod manifest;
pub mod parser;
pub mod partial;
pub mod registry;
pub mod renderer;
pub mod slot;
pub mod transition;
pub mod value;

pub use component::{ComponentDefinition, ComposeError};
pub use error::ParseError;
pub use instance::{Instance, InstanceConfig, InstanceError};
pub use manifest::Manifest;
pub use parser::{parse, Template};
pub use registry::Registry;
pub use renderer::HtmlConfig;

use thiserror::Error;

use component::{Composer, LocalComponents, ResolutionContext};
use error::format_parse_errors;
use value::DataBag;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during composition
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// HTML output configuration
    pub html: HtmlConfig,
    /// Wrap an instance's output in its mount element (`#app` -> `<div id="app">`)
    pub wrap_mount: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML configuration
    pub fn with_html(mut self, config: HtmlConfig) -> Self {
        self.html = config;
        self
    }

    /// Shorthand for pretty-printed HTML
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.html = self.html.with_pretty_print(pretty);
        self
    }

    /// Enable or disable wrapping in the mount element
    pub fn with_wrap_mount(mut self, wrap: bool) -> Self {
        self.wrap_mount = wrap;
        self
    }
}

/// Render template source against a registry and a data bag
pub fn render_template(
    source: &str,
    registry: &Registry,
    data: &DataBag,
) -> Result<String, RenderError> {
    render_template_with_config(source, registry, data, &RenderConfig::default())
}

/// Render template source with custom configuration
///
/// # Example
///
/// ```rust
/// use viewkit::value::bag;
/// use viewkit::{render_template_with_config, Registry, RenderConfig};
///
/// let config = RenderConfig::new().with_pretty_print(true);
/// let html = render_template_with_config(
///     "<ul><li>{{ a }}</li><li>{{ b }}</li></ul>",
///     &Registry::new(),
///     &bag([("a", "one"), ("b", "two")]),
///     &config,
/// )
/// .unwrap();
/// assert_eq!(html, "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>");
/// ```
pub fn render_template_with_config(
    source: &str,
    registry: &Registry,
    data: &DataBag,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let template = parse(source)?;

    let locals = LocalComponents::new();
    let ctx = ResolutionContext::new(data, &locals);
    let nodes = Composer::new(registry).compose(&template, &ctx)?;

    Ok(renderer::to_html(&nodes, &config.html))
}
