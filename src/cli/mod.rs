pub mod completions;
pub mod init;
pub mod list;
pub mod locate;
pub mod preview;
pub mod validate;

use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::{DlgError, Result};

/// dlgview - Dialog descriptor previewer
#[derive(Parser, Debug)]
#[command(name = "dlgview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

impl Cli {
    /// Log level as an env_logger filter string.
    pub fn log_filter(&self) -> &str {
        match self.log_level.to_lowercase().as_str() {
            "error" => "error",
            "info" => "info",
            "debug" => "debug",
            "trace" => "trace",
            _ => "warn",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a descriptor to an HTML preview
    Preview(preview::PreviewArgs),

    /// List the controls of a descriptor
    List(list::ListArgs),

    /// Check descriptors for problems without rendering
    Validate(validate::ValidateArgs),

    /// Print the source location of a control declaration
    Locate(locate::LocateArgs),

    /// Initialize a dlgview project (generates dlgview.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Read a descriptor file.
pub(crate) fn read_descriptor(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| DlgError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read descriptor: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_preview() {
        let cli = Cli::try_parse_from(["dlgview", "preview", "ui/shop.hpp", "--mode", "1"]).unwrap();
        match cli.command {
            Commands::Preview(args) => {
                assert_eq!(args.file, Path::new("ui/shop.hpp"));
                assert_eq!(args.mode, Some(crate::types::MarginMode::Original));
            }
            other => panic!("expected preview, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        assert!(Cli::try_parse_from(["dlgview", "list", "a.hpp", "--mode", "7"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::try_parse_from(["dlgview", "--log-level", "DEBUG", "init"]).unwrap();
        assert_eq!(cli.log_filter(), "debug");

        let cli = Cli::try_parse_from(["dlgview", "init"]).unwrap();
        assert_eq!(cli.log_filter(), "warn");
    }
}
