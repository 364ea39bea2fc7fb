//! Player state and its transition function
//!
//! Every mutation of the coordinator is a [`Command`] applied through
//! [`PlayerState::apply`]. The transition function is pure with respect to
//! the outside world: transport side effects are derived afterwards by
//! diffing the state (see `Coordinator::dispatch`).

use crate::controls::PlaybackControls;
use crate::queue::Queue;
use crate::types::{CoordinatorPhase, ResolvedSource, Track};

/// Commands accepted by the player state
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append track to the queue
    Enqueue(Track),

    /// Remove first queue entry with this id
    Dequeue(String),

    /// Empty the queue, drop the source, stop and rewind
    ClearQueue,

    /// Move queue entry
    Reorder { from: usize, to: usize },

    /// Advance cursor (wraps)
    Next,

    /// Step cursor back (wraps)
    Previous,

    /// Select queue entry; `None` deselects
    SetCursor(Option<usize>),

    /// Set volume (clamped to 0.0-1.0)
    SetVolume(f32),

    /// Set mute flag
    SetMuted(bool),

    /// Set position in seconds (clamped to 0..=duration)
    SetPosition(f64),

    /// Set duration in seconds
    SetDuration(f64),

    /// Set playing flag
    SetPlaying(bool),

    /// Replace the resolved audio source
    SetSource(Option<ResolvedSource>),
}

/// Complete coordinator state
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub(crate) queue: Queue,
    pub(crate) controls: PlaybackControls,
    pub(crate) source: Option<ResolvedSource>,
}

impl PlayerState {
    /// Create state with the given controls and an empty queue
    pub fn new(controls: PlaybackControls) -> Self {
        Self {
            queue: Queue::new(),
            controls,
            source: None,
        }
    }

    /// Apply one command
    ///
    /// Returns false when the command was rejected as a no-op (bad index,
    /// unknown id, navigation on an empty queue).
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Enqueue(track) => {
                self.queue.append(track);
                true
            }
            Command::Dequeue(id) => self.queue.remove_by_id(&id).is_some(),
            Command::ClearQueue => {
                self.queue.clear();
                self.controls.reset();
                self.source = None;
                true
            }
            Command::Reorder { from, to } => self.queue.reorder(from, to),
            Command::Next => self.navigate(Queue::next),
            Command::Previous => self.navigate(Queue::previous),
            Command::SetCursor(index) => {
                let applied = self.queue.set_cursor(index);
                if applied {
                    self.controls.set_position(0.0);
                }
                applied
            }
            Command::SetVolume(volume) => {
                self.controls.set_volume(volume);
                true
            }
            Command::SetMuted(muted) => {
                self.controls.set_muted(muted);
                true
            }
            Command::SetPosition(seconds) => {
                self.controls.set_position(seconds);
                true
            }
            Command::SetDuration(seconds) => {
                self.controls.set_duration(seconds);
                true
            }
            Command::SetPlaying(playing) => {
                self.controls.set_playing(playing);
                true
            }
            Command::SetSource(source) => {
                if source.as_ref().map(|s| &s.url) != self.source.as_ref().map(|s| &s.url) {
                    // New media: length unknown until the transport reports it
                    self.controls.set_duration(0.0);
                }
                self.source = source;
                true
            }
        }
    }

    fn navigate(&mut self, step: fn(&mut Queue) -> bool) -> bool {
        let moved = step(&mut self.queue);
        if moved {
            self.controls.set_position(0.0);
        }
        moved
    }

    /// Queue store
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Control state
    pub fn controls(&self) -> &PlaybackControls {
        &self.controls
    }

    /// Resolved source, if any
    pub fn source(&self) -> Option<&ResolvedSource> {
        self.source.as_ref()
    }

    /// Track at the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Conceptual phase derived from queue and source
    pub fn phase(&self) -> CoordinatorPhase {
        match (self.queue.current(), &self.source) {
            (Some(track), Some(source)) if track.id != source.track_id => {
                CoordinatorPhase::Resolving
            }
            (Some(_), None) => CoordinatorPhase::Resolving,
            (_, Some(_)) => CoordinatorPhase::Ready,
            (None, None) => CoordinatorPhase::Empty,
        }
    }
}
