//! Playback collaborators backed by the API.

use crate::client::RaveClient;
use async_trait::async_trait;
use rave_playback::{PlaybackError, Result, SongResolver, Track, TrackMetadataProvider};

#[async_trait]
impl SongResolver for RaveClient {
    async fn resolve(&self, track_id: &str) -> Result<String> {
        self.stream_url(track_id)
            .await
            .map_err(|e| PlaybackError::resolution(track_id, e.to_string()))
    }
}

#[async_trait]
impl TrackMetadataProvider for RaveClient {
    async fn track(&self, track_id: &str) -> Result<Option<Track>> {
        match self.song_by_web_id(track_id).await {
            Ok(song) => Ok(song.map(|s| s.to_track(track_id))),
            Err(e) => Err(PlaybackError::MetadataUnavailable(format!("{track_id}: {e}"))),
        }
    }
}
