//! Player UI state
//!
//! Network-free. Each transition is a pure function on [`PlayerState`];
//! [`PlayerStore`] applies them through [`Observable::update`].

use crate::observable::{Observable, SubscriptionId};
use cancionero_client::Song;
use serde::{Deserialize, Serialize};

/// Volume a fresh (or stopped) player starts at.
pub const DEFAULT_VOLUME: u8 = 70;

/// Snapshot of what the player shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub current_song: Option<Song>,
    pub is_playing: bool,
    /// Playback position in seconds
    pub current_time: f64,
    pub volume: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_song: None,
            is_playing: false,
            current_time: 0.0,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlayerState {
    /// Start `song` from the beginning. Volume is kept.
    pub fn playing(&self, song: Song) -> Self {
        Self {
            current_song: Some(song),
            is_playing: true,
            current_time: 0.0,
            ..self.clone()
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            is_playing: !self.is_playing,
            ..self.clone()
        }
    }

    pub fn paused(&self) -> Self {
        Self {
            is_playing: false,
            ..self.clone()
        }
    }

    /// Position is taken as-is; no bounds check against the song length.
    pub fn at_time(&self, current_time: f64) -> Self {
        Self {
            current_time,
            ..self.clone()
        }
    }

    /// Volume is taken as-is; no clamping.
    pub fn with_volume(&self, volume: u8) -> Self {
        Self {
            volume,
            ..self.clone()
        }
    }
}

/// Observable player state.
#[derive(Debug, Default)]
pub struct PlayerStore {
    state: Observable<PlayerState>,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlayerState {
        self.state.get()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PlayerState) + Send + Sync + 'static,
    {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    pub fn play_song(&self, song: Song) {
        self.state.update(|state| state.playing(song));
    }

    pub fn toggle_play_pause(&self) {
        self.state.update(PlayerState::toggled);
    }

    pub fn pause(&self) {
        self.state.update(PlayerState::paused);
    }

    pub fn set_current_time(&self, time: f64) {
        self.state.update(|state| state.at_time(time));
    }

    pub fn set_volume(&self, volume: u8) {
        self.state.update(|state| state.with_volume(volume));
    }

    /// Back to the default state, volume included.
    pub fn stop(&self) {
        self.state.set(PlayerState::default());
    }
}
