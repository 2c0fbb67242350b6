use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sprout operations
#[derive(Error, Diagnostic, Debug)]
pub enum SproutError {
    #[error("IO error: {0}")]
    #[diagnostic(code(sprout::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(sprout::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(sprout::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(sprout::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(sprout::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SproutError>;
