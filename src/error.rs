//! Error types for ref-tracker.
//!
//! Extraction itself never fails: heuristics degrade to "no match". These
//! errors cover the seams around it (selectors, storage, the refresh loop).

/// Error type for tracking operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A matcher could not be compiled as a CSS selector.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The snapshot store rejected a read or write.
    #[error("Store operation failed: {0}")]
    Store(String),

    /// A snapshot or message could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The current page could not be captured.
    #[error("Page capture failed: {0}")]
    Capture(String),

    /// Reading page input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The refresh loop has shut down and no longer accepts commands.
    #[error("Refresh loop is closed")]
    LoopClosed,
}

impl From<sled::Error> for Error {
    fn from(err: sled::Error) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type alias for tracking operations.
pub type Result<T> = std::result::Result<T, Error>;
