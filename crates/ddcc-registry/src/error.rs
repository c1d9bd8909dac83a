//! Error types for registry operations.
//!
//! These are the fatal conditions: anything here aborts the run. Data
//! problems inside the registry are reported as findings instead.

use std::path::PathBuf;

/// Errors that stop a check run outright.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A file could not be read, written, or renamed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON payload could not be parsed.
    #[error("failed to parse {label} JSON: {source}")]
    Parse {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render registry JSON: {0}")]
    Render(#[source] serde_json::Error),

    /// The remote endpoint could not be reached.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch of {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The document root does not have the registry shape.
    #[error("malformed registry document: {0}")]
    Shape(String),
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(label: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            label: label.into(),
            source,
        }
    }
}
