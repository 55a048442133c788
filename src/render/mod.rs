//! Rendering module for presenting edit scripts.

mod html;
mod json;
mod options;
pub mod visitor;

pub use html::{escape_html, HtmlRenderer, Rendered};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, RenderStyles};
pub use visitor::{walk, walk_script, DiffVisitor};
