//! Locate command implementation.
//!
//! Prints `path:line:column` for a control declaration, the format editors
//! accept for jump-to-location.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{DlgError, Result};
use crate::output::display_path;
use crate::parser::{offset_to_location, parse_descriptor, Location, ParsedDialog};

use super::read_descriptor;

/// Print the source location of a control declaration
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Descriptor file to search
    pub file: PathBuf,

    /// Control (or display) class name
    pub control: String,
}

pub fn run(args: LocateArgs) -> Result<()> {
    let source = read_descriptor(&args.file)?;
    let parsed = parse_descriptor(&source)?;
    let location = locate(&parsed, &source, &args.control)?;

    println!("{}", format_location(&args.file, location));
    Ok(())
}

/// Find the declaration of `name`. The display itself matches too.
pub fn locate(parsed: &ParsedDialog, source: &str, name: &str) -> Result<Location> {
    let offset = if parsed.display.name == name {
        Some(parsed.display.offset)
    } else {
        parsed.control(name).map(|c| c.offset)
    };

    match offset {
        Some(offset) => Ok(offset_to_location(source, offset)),
        None => {
            let known: Vec<&str> = parsed.controls.iter().map(|c| c.name.as_str()).collect();
            Err(DlgError::Validation {
                message: format!("No control named '{}' in {}", name, parsed.display.name),
                help: (!known.is_empty()).then(|| format!("Known controls: {}", known.join(", "))),
            })
        }
    }
}

fn format_location(file: &Path, location: Location) -> String {
    format!("{}:{}", display_path(file), location)
}
