//! List command implementation.
//!
//! Prints the controls of a descriptor to stdout, as a table or as JSON.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::dialog::DialogPreview;
use crate::discovery::load_config;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::parser::offset_to_location;
use crate::render::layout_to_json;
use crate::types::MarginMode;

use super::read_descriptor;

/// List the controls of a descriptor
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Descriptor file to list
    pub file: PathBuf,

    /// Margin mode: 0 = truncated, 1 = original coordinates
    #[arg(long)]
    pub mode: Option<MarginMode>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let config = load_config(".")?;
    let mode = args.mode.unwrap_or(config.mode);
    let source = read_descriptor(&args.file)?;
    let preview = DialogPreview::from_source(&source, mode)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        writeln!(stdout, "{}", layout_to_json(&preview)?)?;
    } else {
        write_table(&mut stdout, &preview, &source)?;
    }

    for error in &preview.geometry_errors {
        printer.warning("Skipped", &error.to_string());
    }
    printer.info(
        "Listed",
        &format!(
            "{} in {}",
            plural(preview.layout.len(), "control", "controls"),
            preview.display_name()
        ),
    );
    Ok(())
}

/// Write one row per laid-out control.
pub fn write_table(out: &mut impl Write, preview: &DialogPreview, source: &str) -> io::Result<()> {
    let name_width = preview
        .layout
        .controls()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let type_width = preview
        .layout
        .controls()
        .iter()
        .filter_map(|c| c.kind.as_ref().map(String::len))
        .max()
        .unwrap_or(0)
        .max("TYPE".len());

    writeln!(
        out,
        "{:<name_width$}  {:<type_width$}  {:>6}  {:>8}  {:>8}  {:>8}  {:>8}  LINE",
        "NAME", "TYPE", "IDC", "X", "Y", "W", "H"
    )?;

    for c in preview.layout.controls() {
        let idc = c.idc.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:<name_width$}  {:<type_width$}  {:>6}  {:>8.1}  {:>8.1}  {:>8.1}  {:>8.1}  {}",
            c.name,
            c.kind.as_deref().unwrap_or("-"),
            idc,
            c.pos_x,
            c.pos_y,
            c.width,
            c.height,
            offset_to_location(source, c.offset),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_table() {
        let source = "class D {\n  class Title: RscText { idc = 7; x = 0.1; y = 0.1; w = 0.5; h = 0.05; };\n  class Ok { x = 0.2; y = 0.2; w = 0.1; h = 0.1; };\n};";
        let preview = DialogPreview::from_source(source, MarginMode::Original).unwrap();

        let mut out = Vec::new();
        write_table(&mut out, &preview, source).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "Title  RscText       7     220.0     150.0    1100.0      75.0  2:3"
        );
        assert!(lines[2].starts_with("Ok     -             -     440.0     300.0"));
    }
}
