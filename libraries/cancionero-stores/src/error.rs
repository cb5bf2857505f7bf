//! Error types for the state stores

use cancionero_client::ApiError;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation needs a logged-in user and there is none
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The underlying API call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StoreError {
    /// True when the failure was a network-level one.
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Api(e) if e.is_connection())
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
