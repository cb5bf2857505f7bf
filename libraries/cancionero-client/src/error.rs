//! Error types for the Cancionero client.

use thiserror::Error;

/// Message shown for every network-level failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "Could not connect to the server";

/// Errors that can occur when talking to the catalog API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status.
    ///
    /// `message` is the server's `detail` field, or `HTTP <status>` when the
    /// body carried none.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never got a response (DNS, refused connection, timeout...).
    ///
    /// The payload keeps the underlying description for logs; the display
    /// text is always the generic message.
    #[error("Could not connect to the server")]
    Connection(String),

    /// A success response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Token contains characters that cannot go in a header
    #[error("Invalid bearer token")]
    InvalidToken,

    /// Token persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status of the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures where no response was received.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO error reading or writing the backing file
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file is not a JSON object of strings
    #[error("Corrupt storage file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Lock poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
