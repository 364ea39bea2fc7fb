//! External collaborators
//!
//! The coordinator never performs I/O itself. Song resolution and track
//! metadata come from these traits; `rave-client` implements them over HTTP.

use crate::error::Result;
use crate::types::Track;
use async_trait::async_trait;
use tracing::warn;

/// Turns a track identifier into a playable (time-limited) audio URL
#[async_trait]
pub trait SongResolver: Send + Sync {
    /// Resolve a playable URL for `track_id`
    ///
    /// "Not found" and network failures are both reported as errors;
    /// the coordinator treats them the same way.
    async fn resolve(&self, track_id: &str) -> Result<String>;
}

/// Looks up display fields for a track identifier
#[async_trait]
pub trait TrackMetadataProvider: Send + Sync {
    /// Fetch metadata
    ///
    /// # Returns
    /// * `Ok(Some(track))` - Catalog knows the track
    /// * `Ok(None)` - Catalog has no such track
    /// * `Err(_)` - Lookup failed
    async fn track(&self, track_id: &str) -> Result<Option<Track>>;
}

/// Look up every id, substituting placeholder records
///
/// Never fails: unknown ids become "Song Not Available", failed lookups
/// become "Error Loading Song". Output order matches `ids`.
pub async fn tracks_with_placeholders<P>(provider: &P, ids: &[String]) -> Vec<Track>
where
    P: TrackMetadataProvider + ?Sized,
{
    let mut tracks = Vec::with_capacity(ids.len());
    for id in ids {
        let track = match provider.track(id).await {
            Ok(Some(track)) => track,
            Ok(None) => {
                warn!(track_id = %id, "Song not found");
                Track::not_available(id.as_str())
            }
            Err(e) => {
                warn!(track_id = %id, error = %e, "Error fetching song details");
                Track::load_error(id.as_str())
            }
        };
        tracks.push(track);
    }
    tracks
}
