//! Song endpoints for the Rave API.

use crate::client::{endpoint, expect_success, parse, require_token, send_error};
use crate::error::{ClientError, Result};
use crate::types::{Song, StreamUrlResponse};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Song client for the Rave API.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    token: Option<&'a str>,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Search the web catalog.
    ///
    /// An empty query is rejected without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<Song>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::InvalidInput("Search query is required".into()));
        }

        let mut url = endpoint(self.base_url, &["api", "songs", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        debug!(url = %url, "Searching songs");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let songs: Vec<Song> = parse(response, "search results").await?;

        debug!(count = songs.len(), "Search complete");
        Ok(songs)
    }

    /// Time-limited playable URL for a song.
    pub async fn stream_url(&self, song_id: &str) -> Result<String> {
        let url = endpoint(self.base_url, &["api", "songs", "play", song_id])?;
        debug!(url = %url, song_id = %song_id, "Getting stream URL");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        let stream: StreamUrlResponse = parse(response, "stream URL response").await?;

        if stream.url.is_empty() {
            return Err(ClientError::NotFound(format!("No stream for {song_id}")));
        }
        Ok(stream.url)
    }

    /// Song details by web id.
    ///
    /// # Returns
    /// * `Ok(None)` - The catalog has no such song
    pub async fn by_web_id(&self, web_id: &str) -> Result<Option<Song>> {
        let url = endpoint(self.base_url, &["api", "songs", "web", web_id])?;
        debug!(url = %url, "Getting song details");

        let response = self.http.get(url).send().await.map_err(send_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        parse(response, "song").await.map(Some)
    }

    /// Ids of the token owner's liked songs.
    pub async fn liked(&self) -> Result<Vec<String>> {
        let url = endpoint(self.base_url, &["api", "users", "liked-songs"])?;
        debug!(url = %url, "Getting liked songs");

        let response = self
            .http
            .get(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        parse(response, "liked songs").await
    }

    /// Add a song to the liked list.
    pub async fn like(&self, song_id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "users", "liked-songs", song_id])?;
        debug!(url = %url, "Liking song");

        let response = self
            .http
            .post(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await
    }

    /// Remove a song from the liked list.
    pub async fn unlike(&self, song_id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "users", "liked-songs", song_id])?;
        debug!(url = %url, "Unliking song");

        let response = self
            .http
            .delete(url)
            .bearer_auth(require_token(self.token)?)
            .send()
            .await
            .map_err(send_error)?;

        expect_success(response).await
    }
}
