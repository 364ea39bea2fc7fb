//! Playback control state
//!
//! Volume, mute, position, duration and the playing flag. Every setter
//! clamps into the valid range, so the struct can never hold an
//! out-of-range value:
//! - volume in `0.0..=1.0`
//! - duration `>= 0`, `0` until known
//! - position in `0..=duration`

use serde::{Deserialize, Serialize};

/// Transport-facing control state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackControls {
    volume: f32,
    muted: bool,
    position: f64,
    duration: f64,
    playing: bool,
}

impl PlaybackControls {
    /// Create controls at the given volume
    pub fn new(volume: f32, muted: bool) -> Self {
        let mut controls = Self {
            volume: 1.0,
            muted,
            position: 0.0,
            duration: 0.0,
            playing: false,
        };
        controls.set_volume(volume);
        controls
    }

    /// Set volume, clamped to 0.0-1.0 (NaN is ignored)
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_nan() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Current volume (0.0-1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set mute flag (preserves volume)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Set position in seconds, clamped to 0..=duration
    pub fn set_position(&mut self, seconds: f64) {
        if !seconds.is_nan() {
            self.position = seconds.clamp(0.0, self.duration);
        }
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Set duration in seconds
    ///
    /// Negative or non-finite values (streams report `inf`/`NaN` before
    /// metadata arrives) are stored as 0. Position is re-clamped.
    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        self.position = self.position.min(self.duration);
    }

    /// Track duration in seconds (0 until known)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Set playing flag
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Check if playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fraction of the track played, in 0.0..=1.0
    ///
    /// 0 while the duration is unknown.
    pub fn progress_fraction(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Back to start of track, stopped
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.playing = false;
    }
}

impl Default for PlaybackControls {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}
