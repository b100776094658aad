//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while registering ignore patterns
#[derive(Error, Debug)]
pub enum IgnoreError {
    #[error("Ignore pattern is empty")]
    EmptyPattern,

    #[error("Ignore pattern '{0}' is already registered")]
    DuplicatePattern(String),

    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur while normalizing VLAN trunk declarations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VlanError {
    #[error("Malformed VLAN id '{token}' in block '{block}'")]
    MalformedId { token: String, block: String },
}

/// Errors that can occur while loading a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Settings TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),

    #[error(transparent)]
    Ignore(#[from] IgnoreError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors raised by the folder scanner
#[derive(Error, Debug)]
pub enum FolderError {
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
