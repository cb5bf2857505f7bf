//! Favorites endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{Favorite, Song};

impl ApiClient {
    /// Songs the user marked as favorite.
    pub async fn list_favorites(&self, user_id: i64) -> Result<Vec<Song>> {
        self.request(
            &format!("/api/usuarios/{}/favoritos", user_id),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn add_favorite(&self, user_id: i64, song_id: i64) -> Result<Favorite> {
        self.request(
            &format!("/api/usuarios/{}/favoritos/{}", user_id, song_id),
            RequestOptions::post(),
        )
        .await
    }

    pub async fn remove_favorite(&self, user_id: i64, song_id: i64) -> Result<()> {
        self.request_discard(
            &format!("/api/usuarios/{}/favoritos/{}", user_id, song_id),
            RequestOptions::delete(),
        )
        .await
    }
}
