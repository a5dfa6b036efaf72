//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = CrudError> = std::result::Result<T, E>;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum CrudError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No stub could be located for an artifact
    #[error("Stub not found: {0}")]
    StubNotFound(String),

    /// Stub text failed to render
    #[error("Failed to render stub '{name}': {message}")]
    Render {
        /// Stub name (e.g. `views/index`)
        name: String,
        /// Renderer message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Bulk declarative document does not exist
    #[error("Bulk document not found: {}", .0.display())]
    BulkNotFound(PathBuf),

    /// Bulk declarative document is not valid YAML for the expected shape
    #[error("Could not parse bulk document {}: {source}", .path.display())]
    BulkParse {
        /// Document path
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// Model name cannot be turned into a class name
    #[error("Invalid model name: '{0}'")]
    InvalidModelName(String),

    /// Artifact kind name is not one of the known kinds
    #[error("Unknown artifact kind: '{0}'")]
    UnknownArtifactKind(String),

    /// Glob pattern is malformed
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl CrudError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for CrudError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
