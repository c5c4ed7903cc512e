//! Init command implementation.
//!
//! Generates a `dlgview.yaml` with default settings and reports how many
//! descriptors the defaults would pick up.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::discovery::{scan_directory, PreviewConfig, CONFIG_FILENAME};
use crate::error::{DlgError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a dlgview project by generating dlgview.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing dlgview.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(DlgError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let config = PreviewConfig::default();
    let found = scan_directory(&args.path, &config);

    fs::write(&config_path, config.to_yaml()?).map_err(|e| DlgError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            CONFIG_FILENAME,
            plural(found.len(), "descriptor", "descriptors")
        ),
    );

    Ok(())
}
