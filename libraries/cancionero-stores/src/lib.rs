//! Cancionero - Front-end State
//!
//! Observable state containers for Cancionero front ends.
//!
//! This crate provides:
//! - [`Observable`]: a value with subscribe/unsubscribe and update-by-transform
//! - [`AuthStore`]: the logged-in user, session restore from a persisted token
//! - [`PlayerStore`]: current song, play/pause flag, position and volume
//!
//! # Architecture
//!
//! Stores own their state; nothing is global. The auth store reaches the
//! network only through [`SessionBackend`], implemented by
//! [`cancionero_client::ApiClient`]. The player store never touches the
//! network.
//!
//! # Example
//!
//! ```rust
//! use cancionero_stores::{PlayerState, PlayerStore};
//!
//! let player = PlayerStore::new();
//! player.set_volume(40);
//! player.toggle_play_pause();
//! player.stop();
//!
//! assert_eq!(player.state(), PlayerState::default());
//! ```

pub mod auth;
pub mod error;
pub mod observable;
pub mod player;

pub use auth::{AuthStore, SessionBackend};
pub use error::{Result, StoreError};
pub use observable::{Observable, SubscriptionId};
pub use player::{PlayerState, PlayerStore, DEFAULT_VOLUME};
