//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
///
/// Raised at the collaborator seams (song resolution, audio transport).
/// Queue operations with bad indices are silent no-ops and never produce one.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Song resolution failed (not found, network error, ...)
    #[error("Could not resolve a playable source for {track_id}: {message}")]
    Resolution { track_id: String, message: String },

    /// Transport refused to start playback (autoplay policy, decode error)
    #[error("Transport rejected playback: {0}")]
    TransportRejected(String),

    /// Track metadata lookup failed
    #[error("Metadata unavailable for {0}")]
    MetadataUnavailable(String),
}

impl PlaybackError {
    /// Create a resolution error
    pub fn resolution(track_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            track_id: track_id.into(),
            message: message.into(),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
