//! Control records produced by the descriptor parser.
//!
//! A control is one nested class block of a dialog descriptor:
//!
//! ```text
//! class Title: RscText {
//!     idc = 1000;
//!     x = 0.1; y = 0.05;
//!     w = 0.3; h = 0.04;
//! };
//! ```
//!
//! Positional fields are kept exactly as written. Pixel geometry is derived
//! later by [`resolve_geometry`](super::resolve_geometry).

use std::fmt;

use serde::Serialize;

/// Horizontal scale from normalized descriptor units to preview pixels.
pub const SCALE_X: f64 = 2200.0;

/// Vertical scale from normalized descriptor units to preview pixels.
pub const SCALE_Y: f64 = 1500.0;

/// A property name the parser stores on a control.
///
/// Every other assignment in a class block is ignored, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Type,
    Name,
    Idc,
    Idd,
    X,
    Y,
    W,
    H,
}

impl Property {
    /// Look up a recognized property by its (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let property = match name.to_ascii_lowercase().as_str() {
            "type" => Property::Type,
            "name" => Property::Name,
            "idc" => Property::Idc,
            "idd" => Property::Idd,
            "x" => Property::X,
            "y" => Property::Y,
            "w" => Property::W,
            "h" => Property::H,
            _ => return None,
        };
        Some(property)
    }
}

/// One of the four positional fields of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    X,
    Y,
    W,
    H,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::X, Field::Y, Field::W, Field::H];

    /// Scale factor for the axis this field lives on.
    pub fn scale(self) -> f64 {
        match self {
            Field::X | Field::W => SCALE_X,
            Field::Y | Field::H => SCALE_Y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::W => "w",
            Field::H => "h",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed class block with its recognized properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Control {
    /// Class name from the declaration.
    pub name: String,

    /// Declared base class (`class Title: RscText`), if any.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub idc: Option<i64>,
    pub idd: Option<i64>,

    /// Raw positional values, exactly as written.
    pub x: Option<String>,
    pub y: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,

    /// Byte offset of the `class` keyword in the source.
    pub offset: usize,
}

/// The outermost class of a descriptor. Same record shape as a control,
/// never emitted into the control list.
pub type Display = Control;

impl Control {
    /// Create a control from its class declaration.
    pub fn new(name: impl Into<String>, kind: Option<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            offset,
            ..Self::default()
        }
    }

    /// Store a recognized property value.
    ///
    /// Values are trimmed and unquoted. `idc`/`idd` are kept only when the
    /// value is an integer literal; macro names and expressions are dropped.
    pub fn set_property(&mut self, property: Property, value: &str) {
        let value = unquote(value.trim());
        match property {
            Property::Type => self.kind = Some(value.to_string()),
            Property::Name => self.name = value.to_string(),
            Property::Idc => self.idc = value.parse().ok(),
            Property::Idd => self.idd = value.parse().ok(),
            Property::X => self.x = Some(value.to_string()),
            Property::Y => self.y = Some(value.to_string()),
            Property::W => self.w = Some(value.to_string()),
            Property::H => self.h = Some(value.to_string()),
        }
    }

    /// The raw text of a positional field.
    pub fn raw_field(&self, field: Field) -> Option<&str> {
        match field {
            Field::X => self.x.as_deref(),
            Field::Y => self.y.as_deref(),
            Field::W => self.w.as_deref(),
            Field::H => self.h.as_deref(),
        }
    }

    /// Whether any positional field was declared.
    pub fn has_position(&self) -> bool {
        Field::ALL.iter().any(|&f| self.raw_field(f).is_some())
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
