//! Dirty state tracking for auto-save.

use std::time::Instant;

/// Tracks unsaved edits for one controller instance.
///
/// Each tab controller carries its own tracker, so a burst of edits on one
/// tab never forces a save of another. The tracker is the debounce state:
/// marking it dirty re-arms the quiet-period clock, and dropping it
/// discards any pending save deterministically.
#[derive(Debug, Clone)]
pub struct DirtyTracker {
    /// Whether there are unsaved edits.
    dirty: bool,

    /// When the most recent edit was made.
    last_edit: Option<Instant>,

    /// When the first unsaved edit was made. Reset on save.
    first_unsaved_edit: Option<Instant>,

    /// Whether a save is currently in flight.
    saving: bool,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    /// Create a tracker with no unsaved edits.
    pub fn new() -> Self {
        Self {
            dirty: false,
            last_edit: None,
            first_unsaved_edit: None,
            saving: false,
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Record an edit, re-arming the debounce window.
    pub fn mark_dirty(&mut self) {
        let now = Instant::now();
        self.dirty = true;
        self.last_edit = Some(now);

        if self.first_unsaved_edit.is_none() {
            self.first_unsaved_edit = Some(now);
        }
    }

    /// Mark that a save has started.
    pub fn start_save(&mut self) {
        self.saving = true;
    }

    /// Mark that a save completed successfully.
    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.first_unsaved_edit = None;
    }

    /// Mark that a save failed. The tracker stays dirty so the next tick
    /// or edit retries.
    pub fn save_failed(&mut self) {
        self.saving = false;
    }

    /// Milliseconds since the last edit.
    pub fn ms_since_last_edit(&self) -> Option<u64> {
        self.last_edit.map(|t| t.elapsed().as_millis() as u64)
    }

    /// Milliseconds since the first unsaved edit.
    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_edit
            .map(|t| t.elapsed().as_millis() as u64)
    }
}
