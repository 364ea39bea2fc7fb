//! Core types for playback coordination

use serde::{Deserialize, Serialize};

/// Artwork shown when the catalog has none
pub const PLACEHOLDER_ARTWORK: &str = "/placeholder.svg";

/// Track reference held by a queue slot
///
/// Immutable once queued. The same id may appear in several slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog identifier (unique within the catalog)
    pub id: String,

    /// Display name
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Artwork URL
    pub image: String,
}

impl Track {
    /// Create a track reference
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            album: album.into(),
            image: image.into(),
        }
    }

    /// Placeholder for a track the catalog does not know about
    pub fn not_available(id: impl Into<String>) -> Self {
        Self::new(
            id,
            "Song Not Available",
            "Unknown Artist",
            "Unknown Album",
            PLACEHOLDER_ARTWORK,
        )
    }

    /// Placeholder for a track whose metadata lookup failed
    pub fn load_error(id: impl Into<String>) -> Self {
        Self::new(
            id,
            "Error Loading Song",
            "Unknown Artist",
            "Unknown Album",
            PLACEHOLDER_ARTWORK,
        )
    }
}

/// A resolved, time-limited audio URL and the track it was resolved for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// Track identifier the URL belongs to
    pub track_id: String,

    /// Playable URL
    pub url: String,
}

impl ResolvedSource {
    pub fn new(track_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            url: url.into(),
        }
    }
}

/// Conceptual coordinator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorPhase {
    /// Nothing selected, no source
    Empty,

    /// A track is selected but its source has not been resolved yet
    Resolving,

    /// Source assigned to the transport
    Ready,
}

/// Configuration for the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub initial_volume: f32,

    /// Start muted (default: false)
    pub muted: bool,

    /// UI seeks closer than this to the transport position are ignored (default: 0.5 s)
    pub seek_tolerance_secs: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            muted: false,
            seek_tolerance_secs: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.initial_volume, 1.0);
        assert!(!config.muted);
        assert_eq!(config.seek_tolerance_secs, 0.5);
    }

    #[test]
    fn config_fills_missing_fields() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"muted": true}"#).unwrap();
        assert!(config.muted);
        assert_eq!(config.initial_volume, 1.0);
    }

    #[test]
    fn placeholder_tracks_keep_id() {
        let missing = Track::not_available("abc");
        assert_eq!(missing.id, "abc");
        assert_eq!(missing.name, "Song Not Available");
        assert_eq!(missing.image, PLACEHOLDER_ARTWORK);

        let failed = Track::load_error("abc");
        assert_eq!(failed.name, "Error Loading Song");
        assert_eq!(failed.artist, "Unknown Artist");
    }
}
