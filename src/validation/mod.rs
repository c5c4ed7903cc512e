//! Validation for dialog descriptors.
//!
//! Runs a suite of checks against a parsed descriptor and reports errors
//! and warnings. Used by `dlgview validate` and by `preview`/`list` to
//! surface skipped controls.

mod checks;
mod diagnostic;

pub use checks::{DUPLICATE_IDC, GEOMETRY_MISSING, INCOMPLETE, OFFSCREEN, ZERO_SIZE};
pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::dialog::DialogPreview;
use crate::output::Printer;
use crate::parser::offset_to_location;

/// Run all checks against a descriptor.
pub fn validate_dialog(preview: &DialogPreview) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.extend(checks::check_geometry(preview));
    result.extend(checks::check_incomplete(preview));
    result.extend(checks::check_duplicate_idc(preview));
    result.extend(checks::check_zero_size(preview));
    result.extend(checks::check_offscreen(preview));

    result.sort();
    result
}

/// Print diagnostics for one file to stderr.
pub fn print_diagnostics(printer: &Printer, file: &str, source: &str, result: &ValidationResult) {
    for d in result.iter() {
        let location = match d.offset {
            Some(offset) => format!("{}:{}", file, offset_to_location(source, offset)),
            None => file.to_string(),
        };
        eprintln!(
            "{}[{}]: {}",
            printer.severity(&d.severity.to_string(), d.is_error()),
            d.code,
            d.message
        );
        eprintln!("  {} {}", printer.dim("-->"), location);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.cyan("help:"), help);
        }
    }
}
