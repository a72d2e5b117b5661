//! Typed error types for the workspace shell.
//!
//! Core tab operations are total and never fail. Storage and snapshot
//! errors appear at the storage seam, where callers log them and fall back
//! to the default session state. [`ApiError`] is returned to the form that
//! was submitted.

use thiserror::Error;

/// Failure reading or writing the key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file for a key could not be read or written.
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        /// Storage key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the operation (quota, disabled, read-only).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure loading or saving a persisted tab snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a valid snapshot envelope.
    #[error("Malformed tab snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope carries a schema version this build does not read.
    #[error("Unsupported tab snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Failure building a backend API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The form failed client-side validation and was not sent.
    #[error("Invalid form: {0}")]
    Invalid(#[from] crate::forms::ValidationErrors),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
