//! Core domain types for dlgview.
//!
//! - `Control` - a parsed class block with raw positional fields
//! - `Layout` - resolved pixel geometry, optionally margin-normalized
//! - `MarginMode` - the preview mode toggle

mod control;
mod layout;

pub use control::{Control, Display, Field, Property, SCALE_X, SCALE_Y};
pub use layout::{
    extract_leading_number, resolve_geometry, Geometry, GeometryError, Layout, MarginMode,
    ResolvedControl,
};
