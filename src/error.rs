//! Error types for kbharvest library.

use std::io;
use thiserror::Error;

/// Result type alias for kbharvest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and statistics processing.
///
/// Missing optional HTML structure is never an error; extraction falls back
/// to empty values instead. Errors are reserved for bad configuration and
/// for persisted statistics that cannot be trusted.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A persisted statistics snapshot could not be parsed or is missing fields.
    #[error("Corrupted statistics snapshot: {0}")]
    CorruptSnapshot(String),

    /// The base URL used for link resolution is not a valid absolute URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A CSS selector in the extraction options could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The statistics consumer of the ingestion pipeline went away.
    #[error("Pipeline channel error: {0}")]
    Channel(String),
}
