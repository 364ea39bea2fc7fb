//! Main Rave API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::events::{LibraryEvent, LibraryEvents};
use crate::playlists::PlaylistsClient;
use crate::songs::SongsClient;
use crate::types::{
    AuthResponse, ClientConfig, ErrorBody, NewPlaylist, Playlist, PlaylistUpdate, ProfileUpdate,
    Song, User,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

/// Main client for the Rave API.
///
/// Holds the bearer token and hands out short-lived [`Session`]s for the
/// endpoint groups. A 401 from any authenticated call clears the token.
///
/// # Example
///
/// ```ignore
/// use rave_client::{ClientConfig, RaveClient};
///
/// let client = RaveClient::new(ClientConfig::new("http://localhost:3000"))?;
/// client.login("me@example.com", "secret").await?;
///
/// let songs = client.search("daft punk").await?;
/// let url = client.stream_url(songs[0].track_id().unwrap()).await?;
/// ```
pub struct RaveClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
    events: Option<LibraryEvents>,
}

impl RaveClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Rave/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig {
                base_url,
                token: config.token,
            })),
            events: None,
        })
    }

    /// Publish library changes on `events`.
    #[must_use]
    pub fn with_events(mut self, events: LibraryEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Event bus this client publishes on, if any.
    pub fn events(&self) -> Option<&LibraryEvents> {
        self.events.as_ref()
    }

    /// Get the base URL.
    pub async fn base_url(&self) -> String {
        self.config.read().await.base_url.clone()
    }

    /// Check if the client has a token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.token.is_some()
    }

    /// Set the token directly (e.g., from stored credentials).
    pub async fn set_token(&self, token: impl Into<String>) {
        self.config.write().await.token = Some(token.into());
    }

    /// Get the current token.
    pub async fn token(&self) -> Option<String> {
        self.config.read().await.token.clone()
    }

    /// Clear the stored token (logout).
    pub async fn logout(&self) {
        self.config.write().await.token = None;
        info!("Logged out");
    }

    /// Snapshot of the connection settings for one or more calls.
    pub async fn session(&self) -> Session {
        let config = self.config.read().await;
        Session {
            http: self.http.clone(),
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Drop the token when the server rejected it.
    async fn observe<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(ClientError::AuthRequired) = &result {
            let mut config = self.config.write().await;
            if config.token.take().is_some() {
                warn!("Token rejected, cleared");
            }
        }
        result
    }

    fn publish(&self, event: LibraryEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }

    // ===== Users =====

    /// Create an account. The returned token is stored.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let response = self.session().await.auth().register(name, email, password).await?;
        self.set_token(response.token.clone()).await;
        Ok(response)
    }

    /// Login with email and password. The returned token is stored.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let response = self.session().await.auth().login(email, password).await?;
        self.set_token(response.token.clone()).await;
        Ok(response)
    }

    /// Profile of the logged-in user.
    pub async fn profile(&self) -> Result<User> {
        let result = self.session().await.auth().profile().await;
        self.observe(result).await
    }

    /// Update the logged-in user's profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let result = self.session().await.auth().update_profile(update).await;
        self.observe(result).await
    }

    /// Delete the logged-in account and forget the token.
    pub async fn delete_profile(&self) -> Result<()> {
        let result = self.session().await.auth().delete_profile().await;
        self.observe(result).await?;
        self.logout().await;
        Ok(())
    }

    // ===== Songs =====

    /// Search the catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Song>> {
        self.session().await.songs().search(query).await
    }

    /// Time-limited playable URL for a song.
    pub async fn stream_url(&self, song_id: &str) -> Result<String> {
        self.session().await.songs().stream_url(song_id).await
    }

    /// Look up a song by its web id; `None` if unknown.
    pub async fn song_by_web_id(&self, web_id: &str) -> Result<Option<Song>> {
        self.session().await.songs().by_web_id(web_id).await
    }

    /// Ids of the logged-in user's liked songs.
    pub async fn liked_songs(&self) -> Result<Vec<String>> {
        let result = self.session().await.songs().liked().await;
        self.observe(result).await
    }

    /// Like a song.
    pub async fn like(&self, song_id: &str) -> Result<()> {
        let result = self.session().await.songs().like(song_id).await;
        self.observe(result).await?;
        self.publish(LibraryEvent::SongLiked {
            song_id: song_id.to_string(),
        });
        Ok(())
    }

    /// Remove a song from the liked list.
    pub async fn unlike(&self, song_id: &str) -> Result<()> {
        let result = self.session().await.songs().unlike(song_id).await;
        self.observe(result).await?;
        self.publish(LibraryEvent::SongUnliked {
            song_id: song_id.to_string(),
        });
        Ok(())
    }

    // ===== Playlists =====

    /// Playlists owned by the logged-in user.
    pub async fn my_playlists(&self) -> Result<Vec<Playlist>> {
        let result = self.session().await.playlists().mine().await;
        self.observe(result).await
    }

    /// Fetch one playlist (no login needed).
    pub async fn playlist(&self, id: &str) -> Result<Playlist> {
        self.session().await.playlists().get(id).await
    }

    /// Create a playlist.
    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        let result = self.session().await.playlists().create(playlist).await;
        let created = self.observe(result).await?;
        self.publish(LibraryEvent::PlaylistCreated {
            playlist_id: created.id.clone(),
        });
        Ok(created)
    }

    /// Update a playlist's name, photo or songs.
    pub async fn update_playlist(&self, id: &str, update: &PlaylistUpdate) -> Result<Playlist> {
        let result = self.session().await.playlists().update(id, update).await;
        self.updated(result).await
    }

    /// Delete a playlist.
    pub async fn delete_playlist(&self, id: &str) -> Result<()> {
        let result = self.session().await.playlists().delete(id).await;
        self.observe(result).await?;
        self.publish(LibraryEvent::PlaylistDeleted {
            playlist_id: id.to_string(),
        });
        Ok(())
    }

    /// Append a song to a playlist.
    pub async fn add_song_to_playlist(&self, id: &str, song_id: &str) -> Result<Playlist> {
        let result = self.session().await.playlists().add_song(id, song_id).await;
        self.updated(result).await
    }

    /// Remove a song from a playlist.
    pub async fn remove_song_from_playlist(&self, id: &str, song_id: &str) -> Result<Playlist> {
        let result = self
            .session()
            .await
            .playlists()
            .remove_song(id, song_id)
            .await;
        self.updated(result).await
    }

    async fn updated(&self, result: Result<Playlist>) -> Result<Playlist> {
        let playlist = self.observe(result).await?;
        self.publish(LibraryEvent::PlaylistUpdated {
            playlist_id: playlist.id.clone(),
        });
        Ok(playlist)
    }
}

impl std::fmt::Debug for RaveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaveClient")
            .field("has_events", &self.events.is_some())
            .finish_non_exhaustive()
    }
}

/// Connection settings captured from a [`RaveClient`].
///
/// Sub-clients borrow from the session, so the token cannot change
/// underneath a call in progress.
#[derive(Debug, Clone)]
pub struct Session {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl Session {
    /// User endpoints.
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url, self.token.as_deref())
    }

    /// Song endpoints.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(&self.http, &self.base_url, self.token.as_deref())
    }

    /// Playlist endpoints.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(&self.http, &self.base_url, self.token.as_deref())
    }
}

// ===== Response handling shared by the sub-clients =====

/// Map a transport-level failure.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Endpoint URL under `base_url`, each segment percent-encoded.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| ClientError::InvalidUrl(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Token for an endpoint that needs one.
pub(crate) fn require_token(token: Option<&str>) -> Result<&str> {
    token.ok_or(ClientError::AuthRequired)
}

/// Message from an error response: the `error` field, else the raw body.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| {
            if text.is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                text
            }
        })
}

/// Turn a non-success response into an error.
pub(crate) async fn error_from(response: Response) -> ClientError {
    let status = response.status();
    let message = error_message(response).await;

    match status {
        StatusCode::UNAUTHORIZED => ClientError::AuthRequired,
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Parse a successful JSON body, or map the error status.
pub(crate) async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {what}: {e}")))
}

/// Accept any successful response, ignoring the body.
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        debug!(status = %response.status(), "Request succeeded");
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}
