//! HTML renderer for composed templates
//!
//! This module takes composed nodes and produces an HTML string.

pub mod config;
pub mod html;

pub use config::HtmlConfig;
pub use html::{escape_text, to_html};
