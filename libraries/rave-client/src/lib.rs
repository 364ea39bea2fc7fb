//! Rave API Client
//!
//! HTTP client library for the Rave music API.
//!
//! # Features
//!
//! - **Accounts**: Register, login (bearer token), profile
//! - **Songs**: Search, stream URLs, song details, liked songs
//! - **Playlists**: List, fetch, create, edit, delete
//! - **Playback**: [`RaveClient`] implements `SongResolver` and
//!   `TrackMetadataProvider` from `rave-playback`
//! - **Events**: Optional [`LibraryEvents`] bus for library changes
//!
//! # Example
//!
//! ```ignore
//! use rave_client::{ClientConfig, RaveClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RaveClient::new(ClientConfig::new("http://localhost:3000"))?;
//!
//!     let login = client.login("me@example.com", "secret").await?;
//!     println!("Logged in as {}", login.user.name);
//!
//!     for playlist in client.my_playlists().await? {
//!         println!("{} ({} songs)", playlist.name, playlist.songs.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod events;
mod playlists;
mod resolver;
mod songs;
mod types;

// Re-export main types
pub use client::{RaveClient, Session};
pub use error::{ClientError, Result};
pub use events::{LibraryEvent, LibraryEvents};
pub use types::{
    AuthResponse, ClientConfig, NewPlaylist, Playlist, PlaylistUpdate, ProfileUpdate, Song,
    StreamUrlResponse, User,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use playlists::PlaylistsClient;
pub use songs::SongsClient;
