//! Queue store
//!
//! Ordered list of track references plus a cursor selecting the current one.
//!
//! ```text
//!   index:   0      1      2      3
//!          [ A ]  [ B ]  [ C ]  [ A ]     duplicates allowed
//!                  ^
//!                cursor = Some(1)
//! ```
//!
//! Invariant: `cursor` is `None` or `< len()`. Out-of-range requests are
//! ignored rather than reported.

use crate::types::Track;

/// Ordered track queue with a cursor
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add track to the end
    ///
    /// Selects the new track when nothing was selected.
    pub fn append(&mut self, track: Track) {
        self.tracks.push(track);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// Remove the first entry with `id`
    ///
    /// Returns the removed track. The cursor keeps its numeric index, so it
    /// lands on whichever track shifts into that slot, and becomes `None`
    /// once the slot no longer exists.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Track> {
        let index = self.position_of(id)?;
        let removed = self.tracks.remove(index);

        self.cursor = match self.cursor {
            Some(cursor) if cursor >= self.tracks.len() => None,
            other => other,
        };

        Some(removed)
    }

    /// Clear entire queue
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    /// Move track from `from` to `to`, shifting the ones in between
    ///
    /// Returns false (and does nothing) if either index is out of bounds.
    /// The cursor follows the moved track, or shifts by one to stay on the
    /// same track when the move crossed it.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.tracks.len();
        if from >= len || to >= len {
            return false;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if let Some(cursor) = self.cursor {
            self.cursor = Some(if cursor == from {
                to
            } else if from < cursor && cursor <= to {
                cursor - 1
            } else if to <= cursor && cursor < from {
                cursor + 1
            } else {
                cursor
            });
        }

        true
    }

    /// Select track at index (`None` deselects)
    ///
    /// Returns false if the index is out of range.
    pub fn set_cursor(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.tracks.len() => false,
            _ => {
                self.cursor = index;
                true
            }
        }
    }

    /// Advance cursor, wrapping to the start
    ///
    /// Returns false on an empty queue.
    pub fn next(&mut self) -> bool {
        let len = self.tracks.len();
        if len == 0 {
            return false;
        }
        self.cursor = Some(self.cursor.map_or(0, |c| (c + 1) % len));
        true
    }

    /// Step cursor back, wrapping to the end
    ///
    /// Returns false on an empty queue. From "none" this selects the last track.
    pub fn previous(&mut self) -> bool {
        let len = self.tracks.len();
        if len == 0 {
            return false;
        }
        self.cursor = Some(match self.cursor {
            Some(c) if c > 0 => c - 1,
            _ => len - 1,
        });
        true
    }

    /// Index of the first entry with `id`
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Check whether `id` is queued
    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    /// Currently selected track
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|c| self.tracks.get(c))
    }

    /// Current cursor
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Queue can cycle forward (more than one track)
    pub fn has_next(&self) -> bool {
        self.tracks.len() > 1
    }

    /// Queue can cycle backward (more than one track)
    pub fn has_previous(&self) -> bool {
        self.tracks.len() > 1
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
