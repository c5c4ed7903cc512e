//! Parser for dialog descriptor files.
//!
//! A descriptor is a config-style text file: an outer display class with
//! nested control classes, each holding `name = value;` properties.
//!
//! ```text
//! class MyDialog {
//!     idd = 4100;
//!     class Controls {
//!         class Title: RscText {
//!             idc = 1000;
//!             x = 0.1; y = 0.05; w = 0.5; h = 0.04;
//!         };
//!     };
//! };
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use dlgview::parser::parse_descriptor;
//!
//! let source = std::fs::read_to_string("dialogs/shop.hpp")?;
//! let parsed = parse_descriptor(&source)?;
//!
//! for control in &parsed.controls {
//!     println!("{} at offset {}", control.name, control.offset);
//! }
//! ```

mod header;
mod scanner;
mod source;
pub mod span;
pub mod state;

pub use header::{match_assignment, match_class_header, Assignment, ClassHeader};
pub use scanner::{parse_descriptor, Incomplete, ParsedDialog};
pub use source::{mask_source, Cursor, Segment, SegmentKind};
pub use span::{offset_to_location, Location};
pub use state::{transition, ScanState, Step, Transition};
