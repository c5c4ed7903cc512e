//! Descriptor discovery and project configuration.
//!
//! Finds descriptor files in a project, either from paths given on the
//! command line or by scanning directories with the extensions listed in
//! `dlgview.yaml`.
//!
//! # Example
//!
//! ```ignore
//! use dlgview::discovery::{collect_descriptors, PreviewConfig};
//!
//! let config = PreviewConfig::load_or_default("dlgview.yaml".as_ref())?;
//! let (files, _missing) = collect_descriptors(&["ui".into()], &config);
//! println!("Found {} descriptors", files.len());
//! ```

mod config;
mod scanner;

use std::path::Path;

use crate::error::Result;

pub use config::PreviewConfig;
pub use scanner::{collect_descriptors, scan_directory};

/// The name of the config file.
pub const CONFIG_FILENAME: &str = "dlgview.yaml";

/// Load `dlgview.yaml` from a project root, or defaults when absent.
pub fn load_config(root: impl AsRef<Path>) -> Result<PreviewConfig> {
    PreviewConfig::load_or_default(&root.as_ref().join(CONFIG_FILENAME))
}
