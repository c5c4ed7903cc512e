//! Preview command implementation.
//!
//! Renders a descriptor to `<output>/<stem>.html`, optionally re-rendering
//! whenever the file changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::dialog::DialogPreview;
use crate::discovery::{load_config, PreviewConfig};
use crate::error::{DlgError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::{render_error_page, render_page, write_html, write_layout_json};
use crate::types::MarginMode;

use super::read_descriptor;

/// Render a descriptor to an HTML preview
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Descriptor file to preview
    pub file: PathBuf,

    /// Margin mode: 0 = truncated, 1 = original coordinates
    #[arg(long)]
    pub mode: Option<MarginMode>,

    /// Output directory (default from dlgview.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Also write the layout as JSON next to the HTML
    #[arg(long)]
    pub json: bool,

    /// Re-render when the file changes
    #[arg(long, short)]
    pub watch: bool,
}

/// Settings resolved from args and config.
struct PreviewJob {
    file: PathBuf,
    mode: MarginMode,
    html_path: PathBuf,
    json_path: Option<PathBuf>,
}

impl PreviewJob {
    fn new(args: &PreviewArgs, config: &PreviewConfig) -> Self {
        let output = args.output.clone().unwrap_or_else(|| config.output.clone());
        let stem = args
            .file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dialog".to_string());

        Self {
            file: args.file.clone(),
            mode: args.mode.unwrap_or(config.mode),
            html_path: output.join(format!("{}.html", stem)),
            json_path: args.json.then(|| output.join(format!("{}.json", stem))),
        }
    }

    /// Render once. A descriptor with no display still gets an error page
    /// so an open preview shows what went wrong.
    fn render(&self, printer: &Printer) -> Result<()> {
        let source = read_descriptor(&self.file)?;

        let preview = match DialogPreview::from_source(&source, self.mode) {
            Ok(preview) => preview,
            Err(e) => {
                write_html(&render_error_page(&e.to_string()), &self.html_path)?;
                return Err(e);
            }
        };

        log::debug!(
            "{}: {} parsed, {} laid out",
            self.file.display(),
            preview.parsed.controls.len(),
            preview.layout.len()
        );

        for error in &preview.geometry_errors {
            printer.warning("Skipping", &error.to_string());
        }
        if let Some(incomplete) = &preview.parsed.incomplete {
            printer.warning("Incomplete", &incomplete.to_string());
        }

        write_html(&render_page(&preview, &source), &self.html_path)?;
        if let Some(json_path) = &self.json_path {
            write_layout_json(&preview, json_path)?;
        }

        printer.success(
            "Rendered",
            &format!(
                "{} ({}, {} mode) -> {}",
                preview.display_name(),
                plural(preview.layout.len(), "control", "controls"),
                self.mode,
                display_path(&self.html_path)
            ),
        );
        Ok(())
    }
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    let config = load_config(".")?;
    let job = PreviewJob::new(&args, &config);

    printer.status("Rendering", &display_path(&job.file));

    if !args.watch {
        return job.render(printer);
    }

    if let Err(e) = job.render(printer) {
        printer.error("Failed", &e.to_string());
    }
    watch(&job, printer)
}

/// Block, re-rendering on every change to the descriptor.
fn watch(job: &PreviewJob, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;

    // Editors often replace files on save, so watch the directory.
    let dir = match job.file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(watch_error)?;

    printer.info("Watching", &display_path(&job.file));

    for event in rx {
        match event {
            Ok(event) if is_change_to(&event, &job.file) => {
                log::debug!("change event: {:?}", event.kind);
                if let Err(e) = job.render(printer) {
                    printer.error("Failed", &e.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => printer.warning("Watch", &e.to_string()),
        }
    }

    Ok(())
}

/// Whether a watcher event touches `file`'s contents.
fn is_change_to(event: &Event, file: &Path) -> bool {
    let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == file.file_name())
}

fn watch_error(e: notify::Error) -> DlgError {
    DlgError::Io {
        path: PathBuf::from("."),
        message: format!("Failed to watch for changes: {}", e),
    }
}
