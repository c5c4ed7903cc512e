//! dlgview - Dialog descriptor previewer
//!
//! A library for parsing game UI dialog descriptors (class blocks with
//! `x`/`y`/`w`/`h` properties) and laying their controls out on a fixed
//! 2200x1500 canvas for preview.

pub mod cli;
pub mod dialog;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;
pub mod validation;

pub use dialog::DialogPreview;
pub use discovery::{collect_descriptors, load_config, scan_directory, PreviewConfig};
pub use error::{DlgError, Result};
pub use parser::{parse_descriptor, Incomplete, Location, ParsedDialog};
pub use render::{layout_to_json, render_page, write_html, LayoutJson};
pub use types::{
    resolve_geometry, Control, Field, Geometry, GeometryError, Layout, MarginMode,
    ResolvedControl, SCALE_X, SCALE_Y,
};
pub use validation::{validate_dialog, Diagnostic, Severity, ValidationResult};
