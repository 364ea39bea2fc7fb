//! Rave - Playback Coordination
//!
//! Platform-agnostic playback queue coordination for Rave.
//!
//! This crate provides:
//! - Ordered play queue with a cursor (wrap-around next/previous)
//! - Control state (volume, mute, position, duration, playing)
//! - Song resolution through an injected [`SongResolver`]
//! - Stale-resolution rejection (the most recent request wins)
//! - A single binding to the platform audio transport
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `rave-playback` performs no I/O:
//! - No HTTP (resolution goes through [`SongResolver`])
//! - No audio output (playback goes through [`AudioTransport`])
//!
//! `rave-client` provides the HTTP resolver; the host provides the transport.
//!
//! # Example: Queue and Controls
//!
//! ```rust
//! use rave_playback::{Coordinator, NullTransport, PlaybackConfig, Track};
//!
//! let mut coordinator =
//!     Coordinator::new(PlaybackConfig::default(), Box::new(NullTransport::default()));
//!
//! coordinator.enqueue(Track::new("t1", "Song", "Artist", "Album", "/t1.png"));
//! coordinator.enqueue(Track::new("t2", "Other", "Artist", "Album", "/t2.png"));
//! coordinator.set_volume(0.8);
//!
//! assert_eq!(coordinator.current_track().map(|t| t.id.as_str()), Some("t1"));
//! coordinator.next();
//! assert_eq!(coordinator.current_track().map(|t| t.id.as_str()), Some("t2"));
//! ```
//!
//! # Example: Resolving a Song
//!
//! ```rust
//! use rave_playback::{
//!     Coordinator, NullTransport, PlaybackConfig, ResolutionOutcome, Result, SongResolver,
//! };
//! use async_trait::async_trait;
//!
//! struct StaticResolver;
//!
//! #[async_trait]
//! impl SongResolver for StaticResolver {
//!     async fn resolve(&self, track_id: &str) -> Result<String> {
//!         Ok(format!("https://cdn.example.com/{track_id}.mp4"))
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let mut coordinator =
//!     Coordinator::new(PlaybackConfig::default(), Box::new(NullTransport::default()));
//! let outcome = coordinator.play_by_track_id(&StaticResolver, "t1", None).await;
//! assert_eq!(outcome, ResolutionOutcome::Applied);
//! assert!(coordinator.controls().is_playing());
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod controls;
mod coordinator;
mod error;
mod events;
mod handle;
mod queue;
mod resolver;
mod state;
mod transport;
pub mod types;

// Public exports
pub use controls::PlaybackControls;
pub use coordinator::{Coordinator, MAX_PENDING_EVENTS, PlayerView, ResolutionOutcome, ResolutionTicket};
pub use error::{PlaybackError, Result};
pub use events::CoordinatorEvent;
pub use handle::CoordinatorHandle;
pub use queue::Queue;
pub use resolver::{tracks_with_placeholders, SongResolver, TrackMetadataProvider};
pub use state::{Command, PlayerState};
pub use transport::{AudioTransport, NullTransport, TransportBinding, TransportEvent};
pub use types::{CoordinatorPhase, PlaybackConfig, ResolvedSource, Track, PLACEHOLDER_ARTWORK};
