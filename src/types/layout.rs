//! Pixel layout resolved from parsed controls.
//!
//! Geometry resolution takes the leading numeric literal of each raw
//! positional field and multiplies it by the axis scale. Trailing
//! arithmetic is not evaluated: `"0.1 * 3"` resolves as `0.1`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use miette::Diagnostic;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::control::{Control, Field};

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("valid number pattern"));

/// Extract the first run of digits and decimal points from a raw field.
///
/// Returns `None` when the field has no run, or the run is not a number
/// (a lone `.` or `1.2.3`).
pub fn extract_leading_number(raw: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// A positional field with no numeric literal.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Serialize)]
#[error("Control '{control}' has no numeric value for `{field}`")]
#[diagnostic(code(dlgview::geometry_missing))]
pub struct GeometryError {
    /// Name of the failing control.
    pub control: String,
    /// Byte offset of the control declaration.
    pub offset: usize,
    /// The field that failed to resolve.
    pub field: Field,
}

/// A control with resolved pixel geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedControl {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub idc: Option<i64>,
    pub idd: Option<i64>,
    pub offset: usize,
    pub pos_x: f64,
    pub pos_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ResolvedControl {
    /// Resolve one control, collecting every field that fails.
    pub fn resolve(control: &Control) -> Result<Self, Vec<GeometryError>> {
        let mut values = [0.0; 4];
        let mut errors = Vec::new();

        for (slot, field) in values.iter_mut().zip(Field::ALL) {
            match control.raw_field(field).and_then(extract_leading_number) {
                Some(n) => *slot = n * field.scale(),
                None => errors.push(GeometryError {
                    control: control.name.clone(),
                    offset: control.offset,
                    field,
                }),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let [pos_x, pos_y, width, height] = values;
        Ok(Self {
            name: control.name.clone(),
            kind: control.kind.clone(),
            idc: control.idc,
            idd: control.idd,
            offset: control.offset,
            pos_x,
            pos_y,
            width,
            height,
        })
    }

    /// Right edge in pixels.
    pub fn right(&self) -> f64 {
        self.pos_x + self.width
    }

    /// Bottom edge in pixels.
    pub fn bottom(&self) -> f64 {
        self.pos_y + self.height
    }
}

/// How margins are presented in a preview.
///
/// Serialized as the integer mode setting: `0` truncates margins, `1`
/// keeps original coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MarginMode {
    /// Shift controls so the leftmost/topmost sits at the origin.
    #[default]
    Truncated,
    /// Keep coordinates as resolved.
    Original,
}

impl TryFrom<u8> for MarginMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MarginMode::Truncated),
            1 => Ok(MarginMode::Original),
            other => Err(format!("invalid mode {other}, expected 0 or 1")),
        }
    }
}

impl From<MarginMode> for u8 {
    fn from(mode: MarginMode) -> Self {
        match mode {
            MarginMode::Truncated => 0,
            MarginMode::Original => 1,
        }
    }
}

impl FromStr for MarginMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "truncated" => Ok(MarginMode::Truncated),
            "1" | "original" => Ok(MarginMode::Original),
            other => Err(format!(
                "invalid mode '{other}', expected 0 (truncated) or 1 (original)"
            )),
        }
    }
}

impl fmt::Display for MarginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginMode::Truncated => write!(f, "truncated"),
            MarginMode::Original => write!(f, "original"),
        }
    }
}

/// Ordered controls with pixel geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    controls: Vec<ResolvedControl>,
    normalized: bool,
}

impl Layout {
    pub fn new(controls: Vec<ResolvedControl>) -> Self {
        Self {
            controls,
            normalized: false,
        }
    }

    pub fn controls(&self) -> &[ResolvedControl] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Whether margins have been normalized.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Shift every control so the minimum x and y become zero.
    ///
    /// Applies at most once per layout; calling it on a normalized layout
    /// returns it unchanged.
    pub fn normalize_margins(mut self) -> Self {
        if self.normalized {
            return self;
        }
        self.normalized = true;

        let Some(min_x) = self.controls.iter().map(|c| c.pos_x).reduce(f64::min) else {
            return self;
        };
        let min_y = self
            .controls
            .iter()
            .map(|c| c.pos_y)
            .fold(f64::INFINITY, f64::min);

        for control in &mut self.controls {
            control.pos_x -= min_x;
            control.pos_y -= min_y;
        }
        self
    }

    /// Apply a margin mode.
    pub fn with_mode(self, mode: MarginMode) -> Self {
        match mode {
            MarginMode::Truncated => self.normalize_margins(),
            MarginMode::Original => self,
        }
    }

    /// Find a control by name.
    pub fn get(&self, name: &str) -> Option<&ResolvedControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    /// Width and height of the box enclosing all controls, from the origin.
    pub fn extent(&self) -> (f64, f64) {
        self.controls.iter().fold((0.0_f64, 0.0_f64), |(w, h), c| {
            (w.max(c.right()), h.max(c.bottom()))
        })
    }
}

/// Result of geometry resolution over a control list.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Controls whose four fields all resolved, in source order.
    pub layout: Layout,
    /// One entry per failing (control, field) pair.
    pub errors: Vec<GeometryError>,
}

/// Resolve pixel geometry for every control.
///
/// A control with a failing field is left out of the layout and reported
/// in `errors`; it is never placed at a zero default.
pub fn resolve_geometry(controls: &[Control]) -> Geometry {
    let mut resolved = Vec::with_capacity(controls.len());
    let mut errors = Vec::new();

    for control in controls {
        match ResolvedControl::resolve(control) {
            Ok(r) => resolved.push(r),
            Err(e) => errors.extend(e),
        }
    }

    Geometry {
        layout: Layout::new(resolved),
        errors,
    }
}
