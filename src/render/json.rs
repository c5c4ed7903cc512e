//! JSON export of a resolved layout.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::dialog::DialogPreview;
use crate::error::{DlgError, Result};
use crate::types::{GeometryError, MarginMode, ResolvedControl};

/// Serialized layout document.
#[derive(Debug, Serialize)]
pub struct LayoutJson<'a> {
    pub display: &'a str,
    pub mode: MarginMode,
    pub normalized: bool,
    pub controls: &'a [ResolvedControl],
    pub errors: &'a [GeometryError],
}

impl<'a> LayoutJson<'a> {
    pub fn new(preview: &'a DialogPreview) -> Self {
        Self {
            display: preview.display_name(),
            mode: preview.mode,
            normalized: preview.layout.is_normalized(),
            controls: preview.layout.controls(),
            errors: &preview.geometry_errors,
        }
    }
}

/// Serialize a preview's layout as pretty JSON.
pub fn layout_to_json(preview: &DialogPreview) -> Result<String> {
    serde_json::to_string_pretty(&LayoutJson::new(preview)).map_err(|e| DlgError::Render {
        message: format!("Failed to serialize layout: {}", e),
        help: None,
    })
}

/// Write a preview's layout as JSON.
pub fn write_layout_json(preview: &DialogPreview, path: &Path) -> Result<()> {
    let json = layout_to_json(preview)?;
    fs::write(path, json).map_err(|e| DlgError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write layout JSON: {}", e),
    })
}
