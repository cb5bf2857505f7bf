//! Song catalog endpoints.

use crate::client::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::types::{NewSong, Pagination, Song, SongQuery, SongUpdate};
use tracing::debug;

impl ApiClient {
    pub async fn list_songs(&self, page: Pagination) -> Result<Vec<Song>> {
        let endpoint = format!("/api/canciones?skip={}&limit={}", page.skip, page.limit);
        let songs: Vec<Song> = self.request(&endpoint, RequestOptions::get()).await?;

        debug!(count = songs.len(), "Fetched songs");
        Ok(songs)
    }

    /// Search by title, artist and genre. With no filters the server
    /// decides what to return.
    pub async fn search_songs(&self, query: &SongQuery) -> Result<Vec<Song>> {
        let params = query.to_query_string();
        let endpoint = if params.is_empty() {
            "/api/canciones/buscar".to_string()
        } else {
            format!("/api/canciones/buscar?{}", params)
        };

        let songs: Vec<Song> = self.request(&endpoint, RequestOptions::get()).await?;

        debug!(results = songs.len(), "Search complete");
        Ok(songs)
    }

    pub async fn get_song(&self, id: i64) -> Result<Song> {
        self.request(&format!("/api/canciones/{}", id), RequestOptions::get())
            .await
    }

    pub async fn create_song(&self, song: &NewSong) -> Result<Song> {
        self.request("/api/canciones", RequestOptions::post().json(song)?)
            .await
    }

    pub async fn update_song(&self, id: i64, update: &SongUpdate) -> Result<Song> {
        self.request(
            &format!("/api/canciones/{}", id),
            RequestOptions::put().json(update)?,
        )
        .await
    }

    pub async fn delete_song(&self, id: i64) -> Result<()> {
        self.request_discard(&format!("/api/canciones/{}", id), RequestOptions::delete())
            .await?;

        debug!(song_id = id, "Song deleted");
        Ok(())
    }
}
