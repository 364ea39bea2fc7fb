/// Audio transport for a terminal without audio output
use rave_playback::{AudioTransport, Result};
use tracing::info;

/// Logs every transport call and tracks what a real player would hold
#[derive(Debug, Default)]
pub struct LogTransport {
    source: Option<String>,
    playing: bool,
    volume: f32,
    muted: bool,
    position: f64,
}

impl LogTransport {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioTransport for LogTransport {
    fn load(&mut self, url: &str) {
        info!(url = %url, "Load");
        self.source = Some(url.to_string());
        self.position = 0.0;
    }

    fn play(&mut self) -> Result<()> {
        info!(source = ?self.source, "Play");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        info!("Pause");
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        info!(volume, "Volume");
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        info!(muted, "Mute");
        self.muted = muted;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        info!(seconds, "Seek");
        self.position = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rewinds() {
        let mut transport = LogTransport::default();
        transport.seek(30.0);
        transport.load("https://cdn/a.mp4");

        assert_eq!(transport.source(), Some("https://cdn/a.mp4"));
        assert_eq!(transport.position(), 0.0);
    }

    #[test]
    fn test_play_pause() {
        let mut transport = LogTransport::default();
        transport.play().unwrap();
        assert!(transport.is_playing());
        transport.pause();
        assert!(!transport.is_playing());
    }
}
