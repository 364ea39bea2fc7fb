//! Shared coordinator handle
//!
//! Wraps a [`Coordinator`] in an async mutex together with the resolver.
//! The lock is released while the resolver runs, so commands such as
//! `clear_queue` can land between the start and the end of a resolution;
//! the generation check then drops the late result.

use crate::coordinator::{Coordinator, PlayerView, ResolutionOutcome};
use crate::events::CoordinatorEvent;
use crate::resolver::SongResolver;
use crate::transport::TransportEvent;
use crate::types::Track;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Cloneable, thread-safe access to one coordinator
#[derive(Clone)]
pub struct CoordinatorHandle {
    coordinator: Arc<Mutex<Coordinator>>,
    resolver: Arc<dyn SongResolver>,
}

impl CoordinatorHandle {
    pub fn new(coordinator: Coordinator, resolver: Arc<dyn SongResolver>) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
            resolver,
        }
    }

    /// Resolve `track_id` and play it
    ///
    /// `track` is appended to the queue on success when the id is not queued.
    pub async fn play_by_track_id(&self, track_id: &str, track: Option<Track>) -> ResolutionOutcome {
        let ticket = self.coordinator.lock().await.begin_resolution(track_id, track);
        let result = self.resolver.resolve(track_id).await;
        self.coordinator.lock().await.complete_resolution(ticket, result)
    }

    /// Resolve and play the track at the cursor
    ///
    /// Returns `None` when nothing is selected.
    pub async fn load_current(&self) -> Option<ResolutionOutcome> {
        let ticket = self.coordinator.lock().await.begin_load_current()?;
        let result = self.resolver.resolve(ticket.track_id()).await;
        Some(self.coordinator.lock().await.complete_resolution(ticket, result))
    }

    /// Advance and play the new current track
    pub async fn next(&self) -> Option<ResolutionOutcome> {
        if !self.coordinator.lock().await.next() {
            return None;
        }
        self.load_current().await
    }

    /// Step back and play the new current track
    pub async fn previous(&self) -> Option<ResolutionOutcome> {
        if !self.coordinator.lock().await.previous() {
            return None;
        }
        self.load_current().await
    }

    /// Select queue entry and play it
    pub async fn select(&self, index: usize) -> Option<ResolutionOutcome> {
        if !self.coordinator.lock().await.set_cursor(Some(index)) {
            return None;
        }
        self.load_current().await
    }

    /// Forward a transport event
    ///
    /// When playback ended and the queue advanced, the next track is
    /// resolved and started.
    pub async fn handle_transport_event(&self, event: TransportEvent) -> Option<ResolutionOutcome> {
        let advanced = self.coordinator.lock().await.handle_transport_event(event);
        if !advanced {
            return None;
        }
        debug!("Autoplaying next track");
        self.load_current().await
    }

    /// Run a synchronous command against the coordinator
    pub async fn with<R>(&self, f: impl FnOnce(&mut Coordinator) -> R) -> R {
        let mut coordinator = self.coordinator.lock().await;
        f(&mut coordinator)
    }

    /// Snapshot of the read model
    pub async fn view(&self) -> PlayerView {
        self.coordinator.lock().await.view()
    }

    /// Drain pending coordinator events
    pub async fn drain_events(&self) -> Vec<CoordinatorEvent> {
        self.coordinator.lock().await.drain_events()
    }
}

impl std::fmt::Debug for CoordinatorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlaybackError, Result};
    use crate::transport::NullTransport;
    use crate::types::PlaybackConfig;
    use async_trait::async_trait;

    struct EchoResolver;

    #[async_trait]
    impl SongResolver for EchoResolver {
        async fn resolve(&self, track_id: &str) -> Result<String> {
            if track_id == "missing" {
                return Err(PlaybackError::resolution(track_id, "Song not found"));
            }
            Ok(format!("https://cdn/{track_id}"))
        }
    }

    fn handle() -> CoordinatorHandle {
        let coordinator = Coordinator::new(PlaybackConfig::default(), Box::new(NullTransport::default()));
        CoordinatorHandle::new(coordinator, Arc::new(EchoResolver))
    }

    fn track(id: &str) -> Track {
        Track::new(id, id, "Artist", "Album", "/a.png")
    }

    #[tokio::test]
    async fn play_appends_and_starts() {
        let handle = handle();
        let outcome = handle.play_by_track_id("a", Some(track("a"))).await;

        assert_eq!(outcome, ResolutionOutcome::Applied);
        let view = handle.view().await;
        assert_eq!(view.queue_length, 1);
        assert_eq!(view.audio_url.as_deref(), Some("https://cdn/a"));
        assert!(view.controls.is_playing());
    }

    #[tokio::test]
    async fn next_resolves_new_track() {
        let handle = handle();
        handle
            .with(|c| {
                c.enqueue(track("a"));
                c.enqueue(track("b"));
            })
            .await;

        assert_eq!(handle.next().await, Some(ResolutionOutcome::Applied));
        let view = handle.view().await;
        assert_eq!(view.current_track.unwrap().id, "b");
        assert_eq!(view.audio_url.as_deref(), Some("https://cdn/b"));
    }

    #[tokio::test]
    async fn next_on_empty_queue_does_nothing() {
        let handle = handle();
        assert_eq!(handle.next().await, None);
        assert_eq!(handle.previous().await, None);
    }

    #[tokio::test]
    async fn select_out_of_range() {
        let handle = handle();
        handle.with(|c| c.enqueue(track("a"))).await;
        assert_eq!(handle.select(5).await, None);
    }

    #[tokio::test]
    async fn ended_autoplays_following_track() {
        let handle = handle();
        handle.play_by_track_id("a", Some(track("a"))).await;
        handle.with(|c| c.enqueue(track("b"))).await;

        let outcome = handle.handle_transport_event(TransportEvent::Ended).await;
        assert_eq!(outcome, Some(ResolutionOutcome::Applied));

        let view = handle.view().await;
        assert_eq!(view.cursor, Some(1));
        assert!(view.controls.is_playing());
    }

    #[tokio::test]
    async fn failure_is_recorded() {
        let handle = handle();
        let outcome = handle.play_by_track_id("missing", Some(track("missing"))).await;

        assert_eq!(outcome, ResolutionOutcome::Failed);
        let view = handle.view().await;
        assert_eq!(view.queue_length, 0);
        assert!(view.last_error.unwrap().contains("Song not found"));
    }
}
