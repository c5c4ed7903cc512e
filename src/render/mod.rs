//! Rendering module for dlgview.
//!
//! Turns a resolved layout into an HTML preview or a JSON document.

mod html;
mod json;

pub use html::{render_control, render_error_page, render_layout, render_page, write_html};
pub use json::{layout_to_json, write_layout_json, LayoutJson};
