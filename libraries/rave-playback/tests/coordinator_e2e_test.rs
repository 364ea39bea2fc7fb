//! End-to-end coordinator tests
//!
//! Drives a `CoordinatorHandle` with a resolver whose answers are released
//! by the test, so the interleaving of resolutions and user commands is
//! fully deterministic.

use async_trait::async_trait;
use rave_playback::{
    Coordinator, CoordinatorEvent, CoordinatorHandle, CoordinatorPhase, NullTransport,
    PlaybackConfig, PlaybackError, ResolutionOutcome, Result, SongResolver, Track,
    TransportEvent,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

// ===== Test Helpers =====

/// Resolver that waits until the test releases each answer
#[derive(Default)]
struct GatedResolver {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<String>>>>,
}

impl GatedResolver {
    fn gate(&self, track_id: &str) -> oneshot::Sender<Result<String>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(track_id.to_string(), rx);
        tx
    }
}

#[async_trait]
impl SongResolver for GatedResolver {
    async fn resolve(&self, track_id: &str) -> Result<String> {
        let gate = self.gates.lock().unwrap().remove(track_id);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(PlaybackError::resolution(track_id, "gate dropped"))),
            None => Ok(format!("https://cdn.test/{track_id}.mp4")),
        }
    }
}

fn create_track(id: &str) -> Track {
    Track::new(id, format!("Song {id}"), "Artist", "Album", "/art.png")
}

fn setup(ids: &[&str]) -> (CoordinatorHandle, Arc<GatedResolver>) {
    let mut coordinator =
        Coordinator::new(PlaybackConfig::default(), Box::new(NullTransport::default()));
    for id in ids {
        coordinator.enqueue(create_track(id));
    }
    let resolver = Arc::new(GatedResolver::default());
    let handle = CoordinatorHandle::new(coordinator, resolver.clone());
    (handle, resolver)
}

async fn wait_for_url(handle: &CoordinatorHandle, url: &str) {
    while handle.view().await.audio_url.as_deref() != Some(url) {
        tokio::task::yield_now().await;
    }
}

// ===== Scenarios =====

#[tokio::test]
async fn test_play_queued_track_selects_it() {
    let (handle, _) = setup(&["t1", "t2", "t3"]);

    let outcome = handle.play_by_track_id("t2", None).await;

    assert_eq!(outcome, ResolutionOutcome::Applied);
    let view = handle.view().await;
    assert_eq!(view.current_track.unwrap().id, "t2");
    assert_eq!(view.cursor, Some(1));
    assert!(view.controls.is_playing());
    assert_eq!(view.phase, CoordinatorPhase::Ready);
}

#[tokio::test]
async fn test_clear_during_resolution_discards_result() {
    let (handle, resolver) = setup(&[]);
    let release = resolver.gate("t1");

    let (outcome, ()) = tokio::join!(handle.play_by_track_id("t1", Some(create_track("t1"))), async {
        // Resolution is in flight; the lock is free
        handle.with(Coordinator::clear_queue).await;
        release.send(Ok("https://cdn.test/t1.mp4".into())).unwrap();
    });

    assert_eq!(outcome, ResolutionOutcome::Discarded);
    let view = handle.view().await;
    assert_eq!(view.queue_length, 0);
    assert!(view.audio_url.is_none());
    assert!(!view.controls.is_playing());
    assert!(handle
        .drain_events()
        .await
        .contains(&CoordinatorEvent::ResolutionDiscarded { track_id: "t1".into() }));
}

#[tokio::test]
async fn test_latest_request_wins_when_older_finishes_last() {
    let (handle, resolver) = setup(&["t1", "t2"]);
    let release_first = resolver.gate("t1");
    let release_second = resolver.gate("t2");

    let (first, second, ()) = tokio::join!(
        handle.play_by_track_id("t1", None),
        handle.play_by_track_id("t2", None),
        async {
            release_second.send(Ok("https://cdn.test/t2.mp4".into())).unwrap();
            wait_for_url(&handle, "https://cdn.test/t2.mp4").await;
            release_first.send(Ok("https://cdn.test/t1.mp4".into())).unwrap();
        }
    );

    assert_eq!(second, ResolutionOutcome::Applied);
    assert_eq!(first, ResolutionOutcome::Discarded);
    let view = handle.view().await;
    assert_eq!(view.current_track.unwrap().id, "t2");
    assert_eq!(view.audio_url.as_deref(), Some("https://cdn.test/t2.mp4"));
}

#[tokio::test]
async fn test_skip_during_resolution_discards_result() {
    let (handle, resolver) = setup(&["t1", "t2", "t3"]);
    let release = resolver.gate("t3");

    let (outcome, ()) = tokio::join!(handle.play_by_track_id("t3", None), async {
        handle.with(|c| c.next()).await;
        release.send(Ok("https://cdn.test/t3.mp4".into())).unwrap();
    });

    assert_eq!(outcome, ResolutionOutcome::Discarded);
    assert_eq!(handle.view().await.current_track.unwrap().id, "t2");
}

#[tokio::test]
async fn test_failed_resolution_is_visible() {
    let (handle, resolver) = setup(&["t1"]);
    let release = resolver.gate("t9");
    release
        .send(Err(PlaybackError::resolution("t9", "Song not found")))
        .unwrap();

    let outcome = handle.play_by_track_id("t9", Some(create_track("t9"))).await;

    assert_eq!(outcome, ResolutionOutcome::Failed);
    let view = handle.view().await;
    assert_eq!(view.queue_length, 1);
    assert!(!view.controls.is_playing());
    assert!(view.last_error.is_some());
}

#[tokio::test]
async fn test_playlist_plays_through() {
    let (handle, _) = setup(&["t1", "t2", "t3"]);
    handle.load_current().await;

    for expected in ["t2", "t3", "t1"] {
        handle
            .handle_transport_event(TransportEvent::DurationKnown(180.0))
            .await;
        handle
            .handle_transport_event(TransportEvent::TimeAdvanced(180.0))
            .await;
        let outcome = handle.handle_transport_event(TransportEvent::Ended).await;
        assert_eq!(outcome, Some(ResolutionOutcome::Applied));

        let view = handle.view().await;
        assert_eq!(view.current_track.unwrap().id, expected);
        assert_eq!(view.controls.position(), 0.0);
        assert_eq!(view.controls.duration(), 0.0);
        assert!(view.controls.is_playing());
    }
}

#[tokio::test]
async fn test_progress_follows_transport() {
    let (handle, _) = setup(&["t1"]);
    handle.load_current().await;

    handle
        .handle_transport_event(TransportEvent::DurationKnown(200.0))
        .await;
    handle
        .handle_transport_event(TransportEvent::TimeAdvanced(50.0))
        .await;

    let view = handle.view().await;
    assert!((view.progress_fraction - 0.25).abs() < 1e-9);
}
