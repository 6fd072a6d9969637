//! Note store.
//!
//! # Responsibility
//! - Own the note collection and its lifecycle transitions.
//! - Provide keyword-filtered, recency-sorted listings.
//!
//! # Invariants
//! - Stored content is never blank after trimming.
//! - Listings sort by `updated_at DESC`, ties by insertion order.
//! - Purged ids are gone for good; every later call on them is `NoteNotFound`.
//! - Label cascade does not touch `updated_at`.
//! - All validation happens before the first write.

use crate::model::id::{IdGenerator, LabelId, NoteId};
use crate::model::note::{dedup_label_ids, Note, NoteState};
use crate::store::clock::{system_clock, Clock};
use crate::store::error::{StoreError, StoreResult};
use crate::store::{LabelCascade, LabelLookup};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

const NOTE_ID_PREFIX: &str = "note";

/// Partial update for [`NoteStore::update_note`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub content: Option<String>,
    pub label_ids: Option<Vec<LabelId>>,
}

impl NoteUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            label_ids: None,
        }
    }

    pub fn labels(label_ids: Vec<LabelId>) -> Self {
        Self {
            content: None,
            label_ids: Some(label_ids),
        }
    }
}

/// In-memory owner of all notes.
pub struct NoteStore {
    notes: Vec<Note>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            notes: Vec::new(),
            ids: IdGenerator::new(NOTE_ID_PREFIX),
            clock,
        }
    }

    /// Rebuilds a store from persisted notes, keeping their order.
    ///
    /// Label ids not accepted by `labels` are dropped, as a cascade would
    /// have done. Duplicate ids and blank content are rejected.
    pub fn from_notes(
        notes: Vec<Note>,
        labels: &dyn LabelLookup,
        clock: Arc<dyn Clock>,
    ) -> StoreResult<Self> {
        let mut store = Self::with_clock(clock);
        let mut seen_ids = HashSet::new();
        for mut note in notes {
            if note.content.trim().is_empty() {
                return Err(StoreError::InvalidSnapshot(format!(
                    "note {} has blank content",
                    note.id
                )));
            }
            if !seen_ids.insert(note.id.clone()) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "duplicate note id {}",
                    note.id
                )));
            }
            note.label_ids = dedup_label_ids(&note.label_ids)
                .into_iter()
                .filter(|label_id| labels.contains_label(label_id))
                .collect();
            store.notes.push(note);
        }
        Ok(store)
    }

    /// Creates an active note. Content is stored as given.
    pub fn create_note(&mut self, content: &str) -> StoreResult<Note> {
        ensure_content(content)?;
        let now = self.clock.now_ms();
        let id = self.allocate_id(now);
        let note = Note::new(id, content, now);
        self.notes.push(note.clone());
        info!(
            "event=note_create module=note_store status=ok note_id={} total={}",
            note.id,
            self.notes.len()
        );
        Ok(note)
    }

    /// Applies a partial content/label update.
    ///
    /// Blank content is rejected rather than treated as a delete request.
    /// Every provided label id must be known to `labels`.
    pub fn update_note(
        &mut self,
        id: &NoteId,
        update: NoteUpdate,
        labels: &dyn LabelLookup,
    ) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        if let Some(content) = update.content.as_deref() {
            ensure_content(content)?;
        }
        let label_ids = match update.label_ids {
            Some(label_ids) => {
                if let Some(unknown) = label_ids
                    .iter()
                    .find(|label_id| !labels.contains_label(label_id))
                {
                    return Err(StoreError::UnknownLabel(unknown.clone()));
                }
                Some(dedup_label_ids(&label_ids))
            }
            None => None,
        };

        let now = self.clock.now_ms();
        let note = &mut self.notes[index];
        if let Some(content) = update.content {
            note.content = content;
        }
        if let Some(label_ids) = label_ids {
            note.label_ids = label_ids;
        }
        note.updated_at = now;
        debug!("event=note_update module=note_store status=ok note_id={id}");
        Ok(note.clone())
    }

    /// Replaces the full label set of a note.
    pub fn set_labels(
        &mut self,
        id: &NoteId,
        label_ids: Vec<LabelId>,
        labels: &dyn LabelLookup,
    ) -> StoreResult<Note> {
        self.update_note(id, NoteUpdate::labels(label_ids), labels)
    }

    pub fn toggle_bookmark(&mut self, id: &NoteId) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let now = self.clock.now_ms();
        let note = &mut self.notes[index];
        note.is_bookmarked = !note.is_bookmarked;
        note.updated_at = now;
        Ok(note.clone())
    }

    /// Sets or clears the opaque display color.
    pub fn set_color(&mut self, id: &NoteId, color: Option<String>) -> StoreResult<Note> {
        let index = self.index_of(id)?;
        let now = self.clock.now_ms();
        let note = &mut self.notes[index];
        note.color = color;
        note.updated_at = now;
        Ok(note.clone())
    }

    /// Moves a note to the trash. Repeating the call is a no-op success.
    pub fn soft_delete(&mut self, id: &NoteId) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.notes[index].is_deleted = true;
        debug!("event=note_trash module=note_store status=ok note_id={id}");
        Ok(())
    }

    /// Moves a note back out of the trash. No-op for active notes.
    pub fn restore(&mut self, id: &NoteId) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.notes[index].is_deleted = false;
        debug!("event=note_restore module=note_store status=ok note_id={id}");
        Ok(())
    }

    /// Removes a note permanently.
    ///
    /// Does not require the note to be trashed; callers only expose purge
    /// from the trash view.
    pub fn purge(&mut self, id: &NoteId) -> StoreResult<()> {
        let index = self.index_of(id)?;
        self.notes.remove(index);
        info!("event=note_purge module=note_store status=ok note_id={id}");
        Ok(())
    }

    /// Restores every trashed note and returns how many were restored.
    pub fn restore_all(&mut self) -> usize {
        let mut restored = 0;
        for note in self.notes.iter_mut().filter(|note| note.is_deleted) {
            note.is_deleted = false;
            restored += 1;
        }
        info!("event=trash_restore_all module=note_store status=ok count={restored}");
        restored
    }

    /// Purges every trashed note and returns how many were purged.
    pub fn empty_trash(&mut self) -> usize {
        let before = self.notes.len();
        self.notes.retain(|note| !note.is_deleted);
        let purged = before - self.notes.len();
        info!("event=trash_empty module=note_store status=ok count={purged}");
        purged
    }

    /// Strips `label_id` from every note and returns how many notes changed.
    ///
    /// Label bookkeeping is not a content edit, so `updated_at` is kept.
    pub fn cascade_remove_label(&mut self, label_id: &LabelId) -> usize {
        let mut changed = 0;
        for note in &mut self.notes {
            let before = note.label_ids.len();
            note.label_ids.retain(|current| current != label_id);
            if note.label_ids.len() != before {
                changed += 1;
            }
        }
        changed
    }

    /// Looks up a note in any lifecycle state except purged.
    pub fn get_note(&self, id: &NoteId) -> Option<Note> {
        self.notes.iter().find(|note| &note.id == id).cloned()
    }

    /// Active notes whose content contains `query` ignoring case, most
    /// recently edited first. A blank query matches every active note.
    pub fn list_active(&self, query: &str) -> Vec<Note> {
        let needle = query.trim().to_lowercase();
        self.sorted(|note| note.is_active() && note.content_matches(needle.as_str()))
    }

    /// Trashed notes, most recently edited first.
    pub fn list_trash(&self) -> Vec<Note> {
        self.sorted(|note| note.state() == NoteState::Trashed)
    }

    /// Active notes carrying `label_id`, most recently edited first.
    pub fn notes_with_label(&self, label_id: &LabelId) -> Vec<Note> {
        self.sorted(|note| note.is_active() && note.has_label(label_id))
    }

    pub fn active_count(&self) -> usize {
        self.notes.iter().filter(|note| note.is_active()).count()
    }

    pub fn trash_count(&self) -> usize {
        self.notes.iter().filter(|note| note.is_deleted).count()
    }

    /// All notes in insertion order, for snapshots.
    pub(crate) fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    fn sorted(&self, keep: impl Fn(&Note) -> bool) -> Vec<Note> {
        let mut selected: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| keep(note))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        selected.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        selected
    }

    fn index_of(&self, id: &NoteId) -> StoreResult<usize> {
        self.notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or_else(|| StoreError::NoteNotFound(id.clone()))
    }

    fn allocate_id(&mut self, now_ms: i64) -> NoteId {
        loop {
            let candidate = NoteId::new(self.ids.next_id(now_ms));
            if self.notes.iter().all(|note| note.id != candidate) {
                return candidate;
            }
        }
    }
}

impl LabelCascade for NoteStore {
    fn remove_label(&mut self, label_id: &LabelId) -> usize {
        self.cascade_remove_label(label_id)
    }
}

fn ensure_content(content: &str) -> StoreResult<()> {
    if content.trim().is_empty() {
        return Err(StoreError::EmptyContent);
    }
    Ok(())
}
