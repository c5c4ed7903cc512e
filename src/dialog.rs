//! Parse, resolve and lay out one descriptor.

use crate::error::Result;
use crate::parser::{parse_descriptor, ParsedDialog};
use crate::types::{resolve_geometry, GeometryError, Layout, MarginMode};

/// A descriptor ready for rendering.
#[derive(Debug, Clone)]
pub struct DialogPreview {
    /// Parser output, kept for validation and source navigation.
    pub parsed: ParsedDialog,
    /// Controls with geometry, with the margin mode applied.
    pub layout: Layout,
    /// Controls left out of the layout, one entry per failing field.
    pub geometry_errors: Vec<GeometryError>,
    pub mode: MarginMode,
}

impl DialogPreview {
    /// Parse `source` and build its layout in the given mode.
    pub fn from_source(source: &str, mode: MarginMode) -> Result<Self> {
        let parsed = parse_descriptor(source)?;
        let geometry = resolve_geometry(&parsed.controls);

        Ok(Self {
            layout: geometry.layout.with_mode(mode),
            geometry_errors: geometry.errors,
            parsed,
            mode,
        })
    }

    /// Name of the display class.
    pub fn display_name(&self) -> &str {
        &self.parsed.display.name
    }
}
