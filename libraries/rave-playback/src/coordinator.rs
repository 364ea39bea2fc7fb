//! Playback coordinator - core orchestration
//!
//! Composes the queue store, the control state and the transport binding.
//! All mutations go through [`Coordinator::dispatch`], which applies a
//! [`Command`] and then pushes the resulting difference to the transport
//! and the event queue.
//!
//! # Resolution and stale results
//!
//! Resolving a song is the only asynchronous step. It is split in two so the
//! coordinator does not have to be borrowed while the network call is in
//! flight:
//!
//! ```text
//! begin_resolution(id)  ──► ticket { generation: n }
//!        ... resolver.resolve(id).await ...
//! complete_resolution(ticket, result)
//!        generation still n?  yes ─► apply source, cursor, playing
//!                             no  ─► drop result (ResolutionDiscarded)
//! ```
//!
//! The generation is bumped by every new resolution and by every user
//! navigation (`clear_queue`, `next`, `previous`, `set_cursor`), so the most
//! recent intent always wins.

use crate::{
    controls::PlaybackControls,
    error::{PlaybackError, Result},
    events::CoordinatorEvent,
    resolver::SongResolver,
    state::{Command, PlayerState},
    transport::{AudioTransport, TransportBinding, TransportEvent},
    types::{CoordinatorPhase, PlaybackConfig, ResolvedSource, Track},
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Where a command came from
///
/// Commands reporting what the transport already did are not echoed back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    Transport,
}

/// Pending song resolution
///
/// Returned by [`Coordinator::begin_resolution`], consumed by
/// [`Coordinator::complete_resolution`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTicket {
    generation: u64,
    track_id: String,
    track: Option<Track>,
}

impl ResolutionTicket {
    /// Track being resolved
    pub fn track_id(&self) -> &str {
        &self.track_id
    }

    /// Generation the ticket was issued at
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    /// Source set, track selected, playing
    Applied,

    /// Resolver failed; state unchanged, `last_error` set
    Failed,

    /// Superseded by a newer request or navigation; result dropped
    Discarded,
}

/// Read model handed to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub current_track: Option<Track>,
    pub cursor: Option<usize>,
    pub queue: Vec<Track>,
    pub queue_length: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub controls: PlaybackControls,
    pub progress_fraction: f64,
    pub audio_url: Option<String>,
    pub phase: CoordinatorPhase,
    pub last_error: Option<String>,
}

/// Values compared before/after a command to derive side effects
struct Snapshot {
    controls: PlaybackControls,
    url: Option<String>,
    track_id: Option<String>,
    phase: CoordinatorPhase,
}

impl Snapshot {
    fn of(state: &PlayerState) -> Self {
        Self {
            controls: state.controls.clone(),
            url: state.source.as_ref().map(|s| s.url.clone()),
            track_id: state.current_track().map(|t| t.id.clone()),
            phase: state.phase(),
        }
    }
}

/// Central playback coordination
///
/// Owns the queue, the control state and the only transport binding:
/// - Queue management (append, remove, clear, reorder, cursor navigation)
/// - Control state (volume, mute, position, duration, playing)
/// - Song resolution with stale-result rejection
/// - Event queue for UI synchronization
pub struct Coordinator {
    state: PlayerState,
    binding: TransportBinding,

    // Bumped on every new resolution and user navigation
    generation: u64,

    // Last resolution failure, cleared by a later success or a queue clear
    last_error: Option<String>,

    pending_events: VecDeque<CoordinatorEvent>,
}

impl Coordinator {
    /// Create new coordinator bound to `transport`
    pub fn new(config: PlaybackConfig, transport: Box<dyn AudioTransport>) -> Self {
        let controls = PlaybackControls::new(config.initial_volume, config.muted);
        let mut binding = TransportBinding::new(transport, config.seek_tolerance_secs);
        binding.set_volume(controls.volume());
        binding.set_muted(controls.is_muted());

        Self {
            state: PlayerState::new(controls),
            binding,
            generation: 0,
            last_error: None,
            pending_events: VecDeque::new(),
        }
    }

    // ===== Dispatch =====

    /// Apply a command and propagate its side effects
    ///
    /// Returns false if the command was a no-op. Navigation commands issued
    /// here also invalidate in-flight resolutions.
    pub fn dispatch(&mut self, command: Command) -> bool {
        if matches!(
            command,
            Command::ClearQueue | Command::Next | Command::Previous | Command::SetCursor(_)
        ) {
            self.generation += 1;
        }
        if matches!(command, Command::ClearQueue) {
            self.last_error = None;
        }
        self.apply(command, Origin::User)
    }

    fn apply(&mut self, command: Command, origin: Origin) -> bool {
        let queue_command = matches!(
            command,
            Command::Enqueue(_) | Command::Dequeue(_) | Command::ClearQueue | Command::Reorder { .. }
        );

        let before = Snapshot::of(&self.state);
        let applied = self.state.apply(command);
        if !applied {
            return false;
        }

        if queue_command {
            self.emit(CoordinatorEvent::QueueChanged {
                length: self.state.queue.len(),
            });
        }
        self.sync(&before, origin);
        true
    }

    /// Push state differences to the transport and the event queue
    fn sync(&mut self, before: &Snapshot, origin: Origin) {
        let url = self.state.source.as_ref().map(|s| s.url.clone());
        let source_changed = url != before.url;
        if source_changed {
            self.binding.set_source(url.as_deref());
            self.emit(CoordinatorEvent::SourceChanged { url: url.clone() });
        }

        let controls = self.state.controls.clone();

        let playing_changed = controls.is_playing() != before.controls.is_playing();
        // A freshly loaded source needs play re-issued to start sounding
        let replay = source_changed && url.is_some() && controls.is_playing();
        if (playing_changed && origin == Origin::User) || replay {
            if let Some(message) = self.binding.set_playing(controls.is_playing()) {
                self.emit(CoordinatorEvent::TransportRejected { message });
            }
        }
        if playing_changed {
            self.emit(CoordinatorEvent::PlayingChanged {
                playing: controls.is_playing(),
            });
        }

        let volume_changed = controls.volume() != before.controls.volume();
        let muted_changed = controls.is_muted() != before.controls.is_muted();
        if origin == Origin::User {
            if volume_changed {
                self.binding.set_volume(controls.volume());
            }
            if muted_changed {
                self.binding.set_muted(controls.is_muted());
            }
        }
        if volume_changed || muted_changed {
            self.emit(CoordinatorEvent::VolumeChanged {
                volume: controls.volume(),
                is_muted: controls.is_muted(),
            });
        }

        if origin == Origin::User && controls.position() != before.controls.position() {
            self.binding.seek(controls.position());
        }

        let track_id = self.state.current_track().map(|t| t.id.clone());
        if track_id != before.track_id {
            if let Some(track) = self.state.current_track() {
                info!(track_id = %track.id, name = %track.name, "Current track changed");
            }
            self.emit(CoordinatorEvent::TrackChanged {
                track_id,
                previous_track_id: before.track_id.clone(),
            });
        }

        let phase = self.state.phase();
        if phase != before.phase {
            debug!(from = ?before.phase, to = ?phase, "Phase changed");
            self.emit(CoordinatorEvent::PhaseChanged { phase });
        }
    }

    // ===== Queue Management =====

    /// Add track to end of queue
    pub fn enqueue(&mut self, track: Track) {
        self.dispatch(Command::Enqueue(track));
    }

    /// Remove first queue entry with `track_id`
    pub fn dequeue(&mut self, track_id: &str) -> bool {
        self.dispatch(Command::Dequeue(track_id.to_string()))
    }

    /// Clear queue, drop the source, stop and rewind
    ///
    /// Also invalidates any in-flight resolution.
    pub fn clear_queue(&mut self) {
        self.dispatch(Command::ClearQueue);
    }

    /// Move queue entry `from` to `to`
    pub fn reorder_queue(&mut self, from: usize, to: usize) -> bool {
        self.dispatch(Command::Reorder { from, to })
    }

    // ===== Navigation =====

    /// Select next track (wraps)
    pub fn next(&mut self) -> bool {
        self.dispatch(Command::Next)
    }

    /// Select previous track (wraps)
    pub fn previous(&mut self) -> bool {
        self.dispatch(Command::Previous)
    }

    /// Select track at index; `None` deselects
    pub fn set_cursor(&mut self, index: Option<usize>) -> bool {
        self.dispatch(Command::SetCursor(index))
    }

    // ===== Controls =====

    /// Set volume (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.dispatch(Command::SetVolume(volume));
    }

    /// Mute or unmute
    pub fn set_muted(&mut self, muted: bool) {
        self.dispatch(Command::SetMuted(muted));
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        let muted = !self.state.controls.is_muted();
        self.set_muted(muted);
    }

    /// Seek to position in seconds (clamped to 0..=duration)
    pub fn set_position(&mut self, seconds: f64) {
        self.dispatch(Command::SetPosition(seconds));
    }

    /// Play or pause
    pub fn set_playing(&mut self, playing: bool) {
        self.dispatch(Command::SetPlaying(playing));
    }

    // ===== Transport Events =====

    /// Apply an event reported by the transport
    ///
    /// Returns true when the selected track changed and its source needs
    /// resolving (playback ended and the queue advanced to another track).
    pub fn handle_transport_event(&mut self, event: TransportEvent) -> bool {
        match event {
            TransportEvent::TimeAdvanced(seconds) => {
                self.apply(Command::SetPosition(seconds), Origin::Transport);
                false
            }
            TransportEvent::DurationKnown(seconds) => {
                self.apply(Command::SetDuration(seconds), Origin::Transport);
                false
            }
            TransportEvent::VolumeChanged(volume) => {
                self.apply(Command::SetVolume(volume), Origin::Transport);
                false
            }
            TransportEvent::Ended => {
                debug!("Playback ended");
                self.apply(Command::SetPlaying(false), Origin::Transport);
                self.next();
                self.state.phase() == CoordinatorPhase::Resolving
            }
        }
    }

    // ===== Resolution =====

    /// Start resolving `track_id`
    ///
    /// `track` is appended to the queue on success if the id is not queued yet.
    /// Supersedes every earlier ticket.
    pub fn begin_resolution(&mut self, track_id: &str, track: Option<Track>) -> ResolutionTicket {
        self.generation += 1;
        debug!(track_id = %track_id, generation = self.generation, "Resolving song");
        ResolutionTicket {
            generation: self.generation,
            track_id: track_id.to_string(),
            track,
        }
    }

    /// Start resolving the track at the cursor
    ///
    /// Returns `None` when nothing is selected.
    pub fn begin_load_current(&mut self) -> Option<ResolutionTicket> {
        let track = self.state.current_track()?.clone();
        let id = track.id.clone();
        Some(self.begin_resolution(&id, Some(track)))
    }

    /// Finish a resolution started with [`begin_resolution`](Self::begin_resolution)
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        result: Result<String>,
    ) -> ResolutionOutcome {
        if ticket.generation != self.generation {
            debug!(
                track_id = %ticket.track_id,
                ticket = ticket.generation,
                current = self.generation,
                "Discarding stale resolution"
            );
            self.emit(CoordinatorEvent::ResolutionDiscarded {
                track_id: ticket.track_id,
            });
            return ResolutionOutcome::Discarded;
        }

        let url = match result.and_then(|url| validate_url(&ticket.track_id, url)) {
            Ok(url) => url,
            Err(e) => {
                warn!(track_id = %ticket.track_id, error = %e, "Error playing song");
                let message = e.to_string();
                self.last_error = Some(message.clone());
                self.emit(CoordinatorEvent::ResolutionFailed {
                    track_id: ticket.track_id,
                    message,
                });
                return ResolutionOutcome::Failed;
            }
        };

        let ResolutionTicket { track_id, track, .. } = ticket;
        self.last_error = None;
        self.apply(
            Command::SetSource(Some(ResolvedSource::new(track_id.as_str(), url))),
            Origin::User,
        );

        if !self.state.queue.contains(&track_id) {
            if let Some(track) = track {
                self.apply(Command::Enqueue(track), Origin::User);
            }
        }

        // A duplicate id keeps its selected slot; either way playback restarts at 0
        let already_current = self
            .state
            .current_track()
            .is_some_and(|t| t.id == track_id);
        let index = if already_current {
            self.state.queue.cursor()
        } else {
            self.state.queue.position_of(&track_id)
        };
        if let Some(index) = index {
            self.apply(Command::SetCursor(Some(index)), Origin::User);
        }

        self.apply(Command::SetPlaying(true), Origin::User);
        ResolutionOutcome::Applied
    }

    /// Resolve `track_id` and play it
    ///
    /// Holds `&mut self` across the resolver call; use `CoordinatorHandle`
    /// when other commands must be able to run in the meantime.
    pub async fn play_by_track_id(
        &mut self,
        resolver: &dyn SongResolver,
        track_id: &str,
        track: Option<Track>,
    ) -> ResolutionOutcome {
        let ticket = self.begin_resolution(track_id, track);
        let result = resolver.resolve(track_id).await;
        self.complete_resolution(ticket, result)
    }

    // ===== State Queries =====

    /// Track at the cursor
    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track()
    }

    /// Queue holds more than one track
    pub fn has_next(&self) -> bool {
        self.state.queue.has_next()
    }

    /// Queue holds more than one track
    pub fn has_previous(&self) -> bool {
        self.state.queue.has_previous()
    }

    /// Get queue length
    pub fn queue_length(&self) -> usize {
        self.state.queue.len()
    }

    /// All queued tracks in order
    pub fn queue(&self) -> &[Track] {
        self.state.queue.tracks()
    }

    /// Current cursor
    pub fn cursor(&self) -> Option<usize> {
        self.state.queue.cursor()
    }

    /// Control state
    pub fn controls(&self) -> &PlaybackControls {
        &self.state.controls
    }

    /// URL currently assigned to the transport
    pub fn audio_url(&self) -> Option<&str> {
        self.state.source.as_ref().map(|s| s.url.as_str())
    }

    /// Conceptual phase
    pub fn phase(&self) -> CoordinatorPhase {
        self.state.phase()
    }

    /// Last resolution failure message
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current resolution generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Full state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Snapshot of the read model
    pub fn view(&self) -> PlayerView {
        PlayerView {
            current_track: self.current_track().cloned(),
            cursor: self.cursor(),
            queue: self.queue().to_vec(),
            queue_length: self.queue_length(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            controls: self.state.controls.clone(),
            progress_fraction: self.state.controls.progress_fraction(),
            audio_url: self.audio_url().map(str::to_string),
            phase: self.phase(),
            last_error: self.last_error.clone(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns the events emitted since the last drain, oldest first. Hosts
    /// that never drain only see the latest [`MAX_PENDING_EVENTS`].
    pub fn drain_events(&mut self) -> Vec<CoordinatorEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit(&mut self, event: CoordinatorEvent) {
        if self.pending_events.len() == MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("state", &self.state)
            .field("binding", &self.binding)
            .field("generation", &self.generation)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

/// Reject resolved URLs that cannot be handed to a transport
pub(crate) fn validate_url(track_id: &str, url: String) -> Result<String> {
    if url.trim().is_empty() {
        Err(PlaybackError::resolution(track_id, "empty URL"))
    } else {
        Ok(url)
    }
}
