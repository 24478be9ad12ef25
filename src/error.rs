use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for decal-builder operations
#[derive(Error, Diagnostic, Debug)]
pub enum DecalError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(decal::io))]
    Io { path: PathBuf, message: String },

    #[error("Cannot decode image {path}: {message}")]
    #[diagnostic(code(decal::decode))]
    Decode { path: PathBuf, message: String },

    #[error("Normalization error: {message}")]
    #[diagnostic(code(decal::normalize))]
    Normalize { message: String },

    #[error("Geometry error: {message}")]
    #[diagnostic(code(decal::geometry))]
    Geometry { message: String },

    #[error("Template error: {message}")]
    #[diagnostic(code(decal::template))]
    Template {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cannot scan source folder {path}: {message}")]
    #[diagnostic(code(decal::discovery))]
    Discovery { path: PathBuf, message: String },

    #[error("Unknown category: {name}")]
    #[diagnostic(
        code(decal::category),
        help("Run `decal-builder categories` to list the valid names")
    )]
    InvalidCategory { name: String },

    #[error("Invalid job: {message}")]
    #[diagnostic(code(decal::job))]
    InvalidJob {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Settings error with {path}: {message}")]
    #[diagnostic(code(decal::settings))]
    Settings { path: PathBuf, message: String },

    #[error("Logging setup failed: {message}")]
    #[diagnostic(code(decal::logging))]
    Logging { message: String },
}

impl DecalError {
    /// Shorthand for a template structure error without help text.
    pub fn template(message: impl Into<String>) -> Self {
        DecalError::Template {
            message: message.into(),
            help: None,
        }
    }

    /// Whether this error came from reading or writing the filesystem.
    pub fn is_io(&self) -> bool {
        matches!(self, DecalError::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, DecalError>;
