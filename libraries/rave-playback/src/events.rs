//! Coordinator events
//!
//! Emitted whenever the read model changes in a way a UI cares about.
//! The UI drains them after each command (`Coordinator::drain_events`).

use crate::types::CoordinatorPhase;
use serde::{Deserialize, Serialize};

/// Events emitted by the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordinatorEvent {
    /// Phase changed (empty / resolving / ready)
    PhaseChanged {
        /// The new phase
        phase: CoordinatorPhase,
    },

    /// Selected track changed
    TrackChanged {
        /// ID of the new current track (if any)
        track_id: Option<String>,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Playing flag flipped
    PlayingChanged {
        playing: bool,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue contents changed (tracks added/removed/reordered/cleared)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// New audio source assigned
    SourceChanged {
        /// URL now loaded, `None` after a clear
        url: Option<String>,
    },

    /// Song resolution failed; state left untouched
    ResolutionFailed {
        track_id: String,
        message: String,
    },

    /// A resolution finished after being superseded and was dropped
    ResolutionDiscarded {
        track_id: String,
    },

    /// Transport refused to play
    TransportRejected {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_tag() {
        let event = CoordinatorEvent::QueueChanged { length: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"QueueChanged":{"length":3}}"#);

        let phase = CoordinatorEvent::PhaseChanged {
            phase: CoordinatorPhase::Resolving,
        };
        let back: CoordinatorEvent =
            serde_json::from_str(&serde_json::to_string(&phase).unwrap()).unwrap();
        assert_eq!(back, phase);
    }
}
