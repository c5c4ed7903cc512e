//! Validate command implementation.
//!
//! Parses each descriptor and runs the validation checks without
//! rendering anything.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::dialog::DialogPreview;
use crate::discovery::{collect_descriptors, load_config};
use crate::error::{DlgError, Result};
use crate::output::{display_path, plural, Printer};
use crate::validation::{print_diagnostics, validate_dialog};

use super::read_descriptor;

/// Check descriptors for problems without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Descriptor files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Totals across all validated files.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Summary {
    fn failed(&self, strict: bool) -> bool {
        self.errors > 0 || (strict && self.warnings > 0)
    }
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let config = load_config(".")?;
    let (files, missing) = collect_descriptors(&args.paths, &config);

    for path in &missing {
        printer.error("Missing", &display_path(path));
    }
    if files.is_empty() {
        return Err(DlgError::Validation {
            message: "No descriptor files found".to_string(),
            help: Some(format!(
                "Pass descriptor files or directories containing .{} files",
                config.extensions.join(", .")
            )),
        });
    }

    let mut summary = Summary {
        errors: missing.len(),
        ..Summary::default()
    };
    for file in &files {
        let (errors, warnings) = validate_file(file, config.mode, printer)?;
        summary.files += 1;
        summary.errors += errors;
        summary.warnings += warnings;
    }

    let message = format!(
        "{}: {}, {}",
        plural(summary.files, "file", "files"),
        plural(summary.errors, "error", "errors"),
        plural(summary.warnings, "warning", "warnings")
    );

    if summary.failed(args.strict) {
        printer.error("Failed", &message);
        return Err(DlgError::Validation {
            message: format!("{} found", plural(summary.errors, "error", "errors")),
            help: args
                .strict
                .then(|| "Warnings count as errors with --strict".to_string()),
        });
    }

    printer.success("Validated", &message);
    Ok(())
}

/// Validate one file, printing its diagnostics. Returns (errors, warnings).
fn validate_file(
    file: &Path,
    mode: crate::types::MarginMode,
    printer: &Printer,
) -> Result<(usize, usize)> {
    let source = read_descriptor(file)?;
    let name = display_path(file);
    log::debug!("validating {}", name);

    let preview = match DialogPreview::from_source(&source, mode) {
        Ok(preview) => preview,
        Err(DlgError::NoDisplayFound) => {
            printer.error("Invalid", &format!("{}: no display class found", name));
            return Ok((1, 0));
        }
        Err(e) => return Err(e),
    };

    let result = validate_dialog(&preview);
    print_diagnostics(printer, &name, &source, &result);
    Ok((result.error_count(), result.warning_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn printer() -> Printer {
        Printer::with_color(false)
    }

    #[test]
    fn test_validate_clean_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("menu.hpp");
        fs::write(
            &file,
            "class Menu { class Play: RscButton { idc = 1; x = 0.4; y = 0.4; w = 0.2; h = 0.05; }; };",
        )
        .unwrap();

        let args = ValidateArgs {
            paths: vec![file],
            strict: false,
        };
        assert!(run(args, &printer()).is_ok());
    }

    #[test]
    fn test_validate_missing_geometry_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("broken.hpp");
        fs::write(&file, "class Menu { class Play { x = 0.4; y = 0.4; w = 0.2; }; };").unwrap();

        let result = validate_file(&file, crate::types::MarginMode::Truncated, &printer()).unwrap();
        assert_eq!(result, (1, 0));

        let args = ValidateArgs {
            paths: vec![file],
            strict: false,
        };
        assert!(matches!(run(args, &printer()), Err(DlgError::Validation { .. })));
    }

    #[test]
    fn test_no_display_counts_as_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("defines.hpp");
        fs::write(&file, "#define GUI_GRID 0.025\n").unwrap();

        let result = validate_file(&file, crate::types::MarginMode::Truncated, &printer()).unwrap();
        assert_eq!(result, (1, 0));
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("dupes.hpp");
        fs::write(
            &file,
            "class D { class A { idc = 5; x = 0; y = 0; w = 0.1; h = 0.1; }; class B { idc = 5; x = 0.2; y = 0; w = 0.1; h = 0.1; }; };",
        )
        .unwrap();

        let lenient = ValidateArgs {
            paths: vec![file.clone()],
            strict: false,
        };
        assert!(run(lenient, &printer()).is_ok());

        let strict = ValidateArgs {
            paths: vec![file],
            strict: true,
        };
        assert!(run(strict, &printer()).is_err());
    }

    #[test]
    fn test_validate_nothing_found() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            paths: vec![dir.path().to_path_buf()],
            strict: false,
        };
        assert!(run(args, &printer()).is_err());
    }

    #[test]
    fn test_summary_failed() {
        let clean = Summary { files: 2, errors: 0, warnings: 1 };
        assert!(!clean.failed(false));
        assert!(clean.failed(true));
        assert!(Summary { files: 1, errors: 1, warnings: 0 }.failed(false));
    }
}
