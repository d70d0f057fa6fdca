//! Error types for the vimplug compiler.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while compiling a plugin list.
///
/// A plugin without `config` or `hotkeys` is not an error; those fields are
/// optional and their absence is handled during generation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The plugin list could not be read from disk.
    #[error("failed to read plugin list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The plugin list is not valid JSON or does not have the expected shape.
    #[error("invalid plugin list {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON text is not a valid plugin list.
    #[error("invalid plugin list: {0}")]
    Decode(#[from] serde_json::Error),

    /// A generated file or directory could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
