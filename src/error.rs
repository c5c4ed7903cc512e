use miette::Diagnostic;
use thiserror::Error;

/// Main error type for dlgview operations
#[derive(Error, Diagnostic, Debug)]
pub enum DlgError {
    #[error("IO error: {0}")]
    #[diagnostic(code(dlgview::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(dlgview::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    /// The source has no outer display class at all.
    #[error("No display class found in descriptor")]
    #[diagnostic(
        code(dlgview::parse::no_display),
        help("A descriptor needs an outer class block, e.g. `class MyDialog`")
    )]
    NoDisplayFound,

    #[error("Config error: {message}")]
    #[diagnostic(code(dlgview::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(dlgview::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(dlgview::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, DlgError>;
