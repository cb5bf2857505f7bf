//! Cancionero Client
//!
//! HTTP client library for the Cancionero music catalog API.
//!
//! # Features
//!
//! - **Authentication**: register, JSON login, current user, token check
//! - **Users**: list, create, read, update, delete
//! - **Songs**: list, search, create, read, update, delete
//! - **Favorites**: list, add, remove per user
//! - **Token persistence**: pluggable [`KeyValueStore`]
//!
//! # Example
//!
//! ```ignore
//! use cancionero_client::{ApiClient, ClientConfig, JsonFileStore, Pagination};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Arc::new(JsonFileStore::new("./data/session.json"));
//!     let client = ApiClient::with_storage(ClientConfig::default(), storage)?;
//!
//!     let songs = client.list_songs(Pagination::default()).await?;
//!     println!("Found {} songs", songs.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod favorites;
mod songs;
mod storage;
mod types;
mod users;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, Result, StorageError, CONNECTION_ERROR_MESSAGE};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, AUTH_TOKEN_KEY};
pub use types::{
    ClientConfig, Credentials, Favorite, LoginResult, NewSong, NewUser, Pagination, Role, Song,
    SongQuery, SongUpdate, TokenVerification, User, UserUpdate, DEFAULT_BASE_URL,
};

// Re-exported so callers can build `RequestOptions` without naming reqwest
pub use reqwest::header;
pub use reqwest::Method;
