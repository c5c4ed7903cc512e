//! Checks run against a parsed descriptor.
//!
//! Each check takes a `&DialogPreview` and returns its findings.

use std::collections::HashMap;

use crate::dialog::DialogPreview;
use crate::types::{resolve_geometry, SCALE_X, SCALE_Y};

use super::diagnostic::Diagnostic;

pub const GEOMETRY_MISSING: &str = "dlgview::geometry-missing";
pub const INCOMPLETE: &str = "dlgview::incomplete";
pub const DUPLICATE_IDC: &str = "dlgview::duplicate-idc";
pub const ZERO_SIZE: &str = "dlgview::zero-size";
pub const OFFSCREEN: &str = "dlgview::offscreen";

/// Controls with a positional field that has no numeric literal.
pub fn check_geometry(preview: &DialogPreview) -> Vec<Diagnostic> {
    preview
        .geometry_errors
        .iter()
        .map(|e| {
            Diagnostic::error(GEOMETRY_MISSING, e.to_string())
                .at(e.offset)
                .with_help(format!(
                    "Give `{}` a numeric value, e.g. `{} = 0.1;`",
                    e.field, e.field
                ))
        })
        .collect()
}

/// The scan ran out of input before the display closed.
pub fn check_incomplete(preview: &DialogPreview) -> Vec<Diagnostic> {
    let Some(incomplete) = &preview.parsed.incomplete else {
        return Vec::new();
    };
    vec![Diagnostic::warning(
        INCOMPLETE,
        format!("Descriptor is incomplete: {}", incomplete),
    )
    .at(incomplete.stopped_at)
    .with_help("Check for a missing `}` or `};`; controls after this point are not shown")]
}

/// Two controls sharing an `idc`.
pub fn check_duplicate_idc(preview: &DialogPreview) -> Vec<Diagnostic> {
    let mut seen: HashMap<i64, &str> = HashMap::new();
    let mut out = Vec::new();

    for control in &preview.parsed.controls {
        let Some(idc) = control.idc else { continue };
        // -1 is the conventional "no id" value
        if idc < 0 {
            continue;
        }
        if let Some(first) = seen.get(&idc) {
            out.push(
                Diagnostic::warning(
                    DUPLICATE_IDC,
                    format!(
                        "Control '{}' reuses idc {} from '{}'",
                        control.name, idc, first
                    ),
                )
                .at(control.offset),
            );
        } else {
            seen.insert(idc, &control.name);
        }
    }

    out
}

/// Controls that resolve to no visible area.
pub fn check_zero_size(preview: &DialogPreview) -> Vec<Diagnostic> {
    preview
        .layout
        .controls()
        .iter()
        .filter(|c| c.width <= 0.0 || c.height <= 0.0)
        .map(|c| {
            Diagnostic::warning(
                ZERO_SIZE,
                format!("Control '{}' has zero width or height", c.name),
            )
            .at(c.offset)
        })
        .collect()
}

/// Controls reaching past the virtual screen in original coordinates.
pub fn check_offscreen(preview: &DialogPreview) -> Vec<Diagnostic> {
    let original = resolve_geometry(&preview.parsed.controls).layout;
    original
        .controls()
        .iter()
        .filter(|c| c.right() > SCALE_X || c.bottom() > SCALE_Y)
        .map(|c| {
            Diagnostic::warning(
                OFFSCREEN,
                format!("Control '{}' extends past the screen edge", c.name),
            )
            .at(c.offset)
            .with_help("Positions are fractions of the screen; x + w and y + h should stay within 1")
        })
        .collect()
}
