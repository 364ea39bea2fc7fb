//! Playlist endpoints for the Rave API.

use crate::client::{endpoint, expect_success, parse, require_token, send_error};
use crate::error::{ClientError, Result};
use crate::types::{NewPlaylist, Playlist, PlaylistUpdate, SongRef};
use reqwest::Client;
use tracing::{debug, info};

/// Playlist client for the Rave API.
pub struct PlaylistsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: Option<&'a str>,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Playlists created by the token owner.
    pub async fn mine(&self) -> Result<Vec<Playlist>> {
        let url = endpoint(self.base_url, &["api", "playlists", "my-playlists"])?;
        debug!(url = %url, "Fetching my playlists");

        let response = self
            .http
            .get(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        let playlists: Vec<Playlist> = parse(response, "playlists").await?;
        debug!(count = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Fetch one playlist. Public.
    pub async fn get(&self, id: &str) -> Result<Playlist> {
        let url = endpoint(self.base_url, &["api", "playlists", id])?;
        debug!(url = %url, "Fetching playlist");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        parse(response, "playlist").await
    }

    /// Create a playlist. The name must not be blank.
    pub async fn create(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        if playlist.name.trim().is_empty() {
            return Err(ClientError::InvalidInput("Playlist name is required".into()));
        }

        let url = endpoint(self.base_url, &["api", "playlists"])?;
        debug!(url = %url, name = %playlist.name, "Creating playlist");

        let response = self
            .http
            .post(url)
            .bearer_auth(require_token(self.token)?)
            .json(playlist)
            .send()
            .await
            .map_err(send_error)?;

        let created: Playlist = parse(response, "playlist").await?;
        info!(playlist_id = %created.id, name = %created.name, "Playlist created");
        Ok(created)
    }

    /// Update name, photo or song list.
    pub async fn update(&self, id: &str, update: &PlaylistUpdate) -> Result<Playlist> {
        let url = endpoint(self.base_url, &["api", "playlists", id])?;
        debug!(url = %url, "Updating playlist");

        let response = self
            .http
            .patch(url)
            .bearer_auth(require_token(self.token)?)
            .json(update)
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "playlist").await
    }

    /// Delete a playlist the token owner created.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "playlists", id])?;
        debug!(url = %url, "Deleting playlist");

        let response = self
            .http
            .delete(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await?;
        info!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }

    /// Append a song.
    pub async fn add_song(&self, id: &str, song_id: &str) -> Result<Playlist> {
        let url = endpoint(self.base_url, &["api", "playlists", id, "songs"])?;
        debug!(url = %url, song_id = %song_id, "Adding song to playlist");

        let response = self
            .http
            .post(url)
            .bearer_auth(require_token(self.token)?)
            .json(&SongRef { song_id })
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "playlist").await
    }

    /// Remove a song.
    pub async fn remove_song(&self, id: &str, song_id: &str) -> Result<Playlist> {
        let url = endpoint(self.base_url, &["api", "playlists", id, "songs", song_id])?;
        debug!(url = %url, "Removing song from playlist");

        let response = self
            .http
            .delete(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "playlist").await
    }
}
