/// Shared application state
use crate::config::CliConfig;
use crate::error::Result;
use cancionero_client::{ApiClient, JsonFileStore};
use cancionero_stores::{AuthStore, PlayerState, PlayerStore};
use std::sync::Arc;
use tracing::debug;

/// Client and stores shared by every command
pub struct App {
    pub client: Arc<ApiClient>,
    pub auth: AuthStore,
    pub player: PlayerStore,
}

impl App {
    /// Build the client and stores from `config`.
    ///
    /// The session token is persisted in `config.session.token_file`.
    pub fn new(config: &CliConfig) -> Result<Self> {
        let storage = Arc::new(JsonFileStore::new(config.session.token_file.clone()));
        let client = Arc::new(ApiClient::with_storage(config.api.clone(), storage)?);

        let player = PlayerStore::new();
        player.subscribe(|state: &PlayerState| {
            debug!(
                playing = state.is_playing,
                song_id = ?state.current_song.as_ref().map(|s| s.id),
                "Player state changed"
            );
        });

        Ok(Self {
            auth: AuthStore::new(client.clone()),
            client,
            player,
        })
    }
}
