//! Audio transport binding
//!
//! Abstracts the single media-playback handle (an HTML audio element, a
//! native player, a test double). The binding is the only code that talks
//! to it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Platform playback handle
///
/// Implementors load a URL and play it. Events flow back through
/// [`TransportEvent`], delivered by the platform to the coordinator.
#[cfg_attr(test, mockall::automock)]
pub trait AudioTransport: Send {
    /// Assign a new source and start loading it
    fn load(&mut self, url: &str);

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Err(_)` - Playback refused (autoplay policy, decode error, ...)
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Set output volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Position the transport itself reports, in seconds
    fn position(&self) -> f64;

    /// Jump to position in seconds
    fn seek(&mut self, seconds: f64);
}

/// Events reported by the transport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Playback position advanced (seconds)
    TimeAdvanced(f64),

    /// Media metadata loaded, duration known (seconds)
    DurationKnown(f64),

    /// Reached end of media
    Ended,

    /// Volume changed outside the coordinator (0.0-1.0)
    VolumeChanged(f32),
}

/// Wraps the transport and translates coordinator intents into calls
pub struct TransportBinding {
    transport: Box<dyn AudioTransport>,
    seek_tolerance_secs: f64,
}

impl TransportBinding {
    /// Bind a transport
    pub fn new(transport: Box<dyn AudioTransport>, seek_tolerance_secs: f64) -> Self {
        Self {
            transport,
            seek_tolerance_secs: seek_tolerance_secs.max(0.0),
        }
    }

    /// Assign source; `None` is ignored
    pub fn set_source(&mut self, url: Option<&str>) {
        if let Some(url) = url {
            debug!(url = %url, "Loading audio source");
            self.transport.load(url);
        }
    }

    /// Play or pause
    ///
    /// A refused play is logged and otherwise ignored. Returns the rejection
    /// message so the caller can record it.
    pub fn set_playing(&mut self, playing: bool) -> Option<String> {
        if !playing {
            self.transport.pause();
            return None;
        }

        match self.transport.play() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Transport rejected play");
                Some(e.to_string())
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.transport.set_volume(volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.transport.set_muted(muted);
    }

    /// Seek unless already within tolerance of the transport's own position
    ///
    /// Returns true if a seek was issued.
    pub fn seek(&mut self, seconds: f64) -> bool {
        let current = self.transport.position();
        if (current - seconds).abs() > self.seek_tolerance_secs {
            debug!(from = current, to = seconds, "Seeking transport");
            self.transport.seek(seconds);
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for TransportBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBinding")
            .field("seek_tolerance_secs", &self.seek_tolerance_secs)
            .finish_non_exhaustive()
    }
}

/// Transport that accepts every call and does nothing
///
/// For headless use and tests that only care about state.
#[derive(Debug, Default, Clone)]
pub struct NullTransport {
    position: f64,
}

impl AudioTransport for NullTransport {
    fn load(&mut self, _url: &str) {
        self.position = 0.0;
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaybackError;
    use mockall::predicate::eq;

    #[test]
    fn none_source_is_ignored() {
        let mut transport = MockAudioTransport::new();
        transport.expect_load().never();

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        binding.set_source(None);
    }

    #[test]
    fn source_is_loaded() {
        let mut transport = MockAudioTransport::new();
        transport
            .expect_load()
            .with(eq("https://cdn/a.mp4"))
            .times(1)
            .return_const(());

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        binding.set_source(Some("https://cdn/a.mp4"));
    }

    #[test]
    fn seek_within_tolerance_is_skipped() {
        let mut transport = MockAudioTransport::new();
        transport.expect_position().return_const(10.0);
        transport.expect_seek().never();

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        assert!(!binding.seek(10.4));
        assert!(!binding.seek(9.5));
    }

    #[test]
    fn seek_beyond_tolerance_is_applied() {
        let mut transport = MockAudioTransport::new();
        transport.expect_position().return_const(10.0);
        transport.expect_seek().with(eq(42.0)).times(1).return_const(());

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        assert!(binding.seek(42.0));
    }

    #[test]
    fn rejected_play_is_reported_not_raised() {
        let mut transport = MockAudioTransport::new();
        transport
            .expect_play()
            .times(1)
            .returning(|| Err(PlaybackError::TransportRejected("autoplay blocked".into())));

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        let rejection = binding.set_playing(true);
        assert!(rejection.unwrap().contains("autoplay blocked"));
    }

    #[test]
    fn pause_calls_transport() {
        let mut transport = MockAudioTransport::new();
        transport.expect_pause().times(1).return_const(());

        let mut binding = TransportBinding::new(Box::new(transport), 0.5);
        assert!(binding.set_playing(false).is_none());
    }
}
