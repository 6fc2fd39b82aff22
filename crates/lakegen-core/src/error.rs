//! Error types for the lakegen core library.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the lakegen library.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source container unreachable or listing denied
    #[error("Listing unavailable for container '{container}': {message}")]
    ListingUnavailable { container: String, message: String },

    /// Empty source listing with a nonzero target count
    #[error("Cannot resample {requested} objects from an empty source listing")]
    InsufficientSourceData { requested: usize },

    /// Required trigger parameters missing
    #[error("Malformed work request: {0}")]
    MalformedRequest(String),

    /// A single object duplication failed
    #[error("Copy failed for '{key}': {message}")]
    CopyFailed { key: String, message: String },

    /// One or more copies in a dispatch batch failed
    #[error("{failed} of {attempted} copy operations failed")]
    DispatchFailed { failed: usize, attempted: usize },

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Queue error
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Storage backend error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Queue-specific errors
#[derive(Error, Debug)]
pub enum QueueError {
    /// Receiving a delivery failed
    #[error("Receive failed: {0}")]
    Receive(String),

    /// Acknowledging a delivery failed
    #[error("Delete failed: {0}")]
    Delete(String),

    /// A delivery arrived without the fields the trigger needs
    #[error("Malformed delivery: {0}")]
    MalformedDelivery(String),
}
