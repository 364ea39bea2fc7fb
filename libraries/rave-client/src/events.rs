//! Library change notifications
//!
//! Screens that show liked songs or playlists subscribe here and refetch
//! when something changes. The bus is passed to [`RaveClient::with_events`];
//! there is no global instance.
//!
//! [`RaveClient::with_events`]: crate::RaveClient::with_events

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// A change to the user's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryEvent {
    SongLiked { song_id: String },
    SongUnliked { song_id: String },
    PlaylistCreated { playlist_id: String },
    PlaylistDeleted { playlist_id: String },
    PlaylistUpdated { playlist_id: String },
}

/// Broadcast bus for [`LibraryEvent`]s
#[derive(Debug, Clone)]
pub struct LibraryEvents {
    sender: broadcast::Sender<LibraryEvent>,
}

impl LibraryEvents {
    /// Create a bus buffering up to `capacity` events per slow subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LibraryEvent> {
        self.sender.subscribe()
    }

    /// Publish to all current subscribers
    ///
    /// Having no subscribers is fine.
    pub fn publish(&self, event: LibraryEvent) {
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "Library event published"),
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "Library event dropped, no subscribers");
            }
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for LibraryEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let events = LibraryEvents::default();
        let mut first = events.subscribe();
        let mut second = events.subscribe();

        events.publish(LibraryEvent::SongLiked {
            song_id: "s1".into(),
        });

        let expected = LibraryEvent::SongLiked {
            song_id: "s1".into(),
        };
        assert_eq!(first.recv().await.unwrap(), expected);
        assert_eq!(second.recv().await.unwrap(), expected);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let events = LibraryEvents::new(0);
        assert_eq!(events.subscriber_count(), 0);
        events.publish(LibraryEvent::PlaylistDeleted {
            playlist_id: "p1".into(),
        });
    }
}
