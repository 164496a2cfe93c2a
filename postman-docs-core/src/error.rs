//! Error types shared across the core pipeline.
//!
//! Each stage owns one enum. The CLI crate wraps all of them in `anyhow` at its boundary.

use std::path::PathBuf;

/// Failure to read or parse a Postman collection.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("failed to read collection {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse Postman collection: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure that stops page generation altogether.
///
/// Individual page writes never produce this; they are collected in the
/// generation report instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure to read or write the slug manifest file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write manifest {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure reported by a [`crate::contract::PagePublisher`].
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The request never produced a response (connection, TLS, timeout, ...).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The remote answered with a status the protocol does not expect.
    #[error("{method} {url} returned unexpected status {status}")]
    UnexpectedStatus {
        method: String,
        url: String,
        status: u16,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
