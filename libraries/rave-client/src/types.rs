//! Types for Rave API requests and responses.

use rave_playback::{Track, PLACEHOLDER_ARTWORK};
use serde::{Deserialize, Serialize};

/// Configuration for connecting to the Rave API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Bearer token (if logged in)
    pub token: Option<String>,
}

impl ClientConfig {
    /// Create a config with just the URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: Some(token.into()),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

// =============================================================================
// Users
// =============================================================================

/// Request body for the register endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, rename = "likedSongs")]
    pub liked_songs: Vec<String>,
}

/// Response from register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Partial profile update; unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// =============================================================================
// Songs
// =============================================================================

/// Song record.
///
/// Catalog entries and search results use different id fields, so all of
/// them are optional; [`Song::track_id`] picks the one to play by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, rename = "webId", skip_serializing_if = "Option::is_none")]
    pub web_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Song {
    /// Identifier the stream endpoint understands (web id first).
    pub fn track_id(&self) -> Option<&str> {
        self.web_id
            .as_deref()
            .or(self.id.as_deref())
            .or(self.object_id.as_deref())
    }

    /// Convert to a queue entry, filling gaps with placeholders.
    ///
    /// `fallback_id` is used when the record carries no id of its own.
    pub fn to_track(&self, fallback_id: &str) -> Track {
        let id = self.track_id().unwrap_or(fallback_id);
        let name = if self.name.is_empty() {
            "Unknown Song"
        } else {
            &self.name
        };
        let artist = if self.artist.is_empty() {
            "Unknown Artist"
        } else {
            &self.artist
        };
        Track::new(
            id,
            name,
            artist,
            self.album.as_deref().unwrap_or("Unknown Album"),
            self.image
                .as_deref()
                .or(self.photo.as_deref())
                .unwrap_or(PLACEHOLDER_ARTWORK),
        )
    }
}

/// Response from the play endpoint.
#[derive(Debug, Deserialize)]
pub struct StreamUrlResponse {
    pub url: String,
}

// =============================================================================
// Playlists
// =============================================================================

/// Playlist record. `songs` holds song ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub songs: Vec<String>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Request body for playlist creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub name: String,
    pub photo: String,
    pub songs: Vec<String>,
}

/// Partial playlist update; unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub songs: Option<Vec<String>>,
}

/// Request body naming a song.
#[derive(Debug, Serialize)]
pub(crate) struct SongRef<'a> {
    #[serde(rename = "songId")]
    pub song_id: &'a str,
}
