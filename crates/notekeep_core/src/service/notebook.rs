//! Notebook facade over the note and label stores.
//!
//! # Responsibility
//! - Own one `NoteStore` and one `LabelStore` and wire them together.
//! - Validate note label assignment against the owned labels.
//! - Hand snapshots to and from a persistence port on explicit request.
//!
//! # Invariants
//! - Label deletion cascades into notes before `delete_label` returns, so no
//!   later listing sees a deleted label id.
//! - The facade never saves on its own; hosts call `save_to`.

use crate::model::id::{LabelId, NoteId};
use crate::model::label::Label;
use crate::model::note::Note;
use crate::persist::{PersistResult, PersistencePort, Snapshot};
use crate::store::clock::{system_clock, Clock};
use crate::store::label_store::LabelStore;
use crate::store::note_store::{NoteStore, NoteUpdate};
use crate::store::{StoreError, StoreResult};
use std::sync::Arc;

/// Host-owned pair of stores.
pub struct Notebook {
    notes: NoteStore,
    labels: LabelStore,
    clock: Arc<dyn Clock>,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Notebook {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            notes: NoteStore::with_clock(Arc::clone(&clock)),
            labels: LabelStore::with_clock(Arc::clone(&clock)),
            clock,
        }
    }

    /// Rebuilds a notebook from a snapshot.
    ///
    /// Labels load first so that stale label ids on notes can be dropped.
    pub fn from_snapshot(snapshot: Snapshot, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let labels = LabelStore::from_labels(snapshot.labels, Arc::clone(&clock))?;
        let notes = NoteStore::from_notes(snapshot.notes, &labels, Arc::clone(&clock))?;
        Ok(Self {
            notes,
            labels,
            clock,
        })
    }

    /// Loads a notebook through `port` using the system clock.
    pub fn load_from(port: &mut dyn PersistencePort) -> PersistResult<Self> {
        Self::load_from_with_clock(port, system_clock())
    }

    /// Loads a notebook through `port`, stamping later edits with `clock`.
    pub fn load_from_with_clock(
        port: &mut dyn PersistencePort,
        clock: Arc<dyn Clock>,
    ) -> PersistResult<Self> {
        let snapshot = port.load()?;
        Ok(Self::from_snapshot(snapshot, clock)?)
    }

    /// Hands the current state to `port`.
    pub fn save_to(&self, port: &mut dyn PersistencePort) -> PersistResult<()> {
        port.save(&self.snapshot())
    }

    /// Plain copy of all notes and labels in insertion order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            notes: self.notes.all_notes().to_vec(),
            labels: self.labels.list_labels(),
        }
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    /// Direct note access for operations that need no label context.
    pub fn notes_mut(&mut self) -> &mut NoteStore {
        &mut self.notes
    }

    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn create_note(&mut self, content: &str) -> StoreResult<Note> {
        self.notes.create_note(content)
    }

    /// Updates a note, checking label ids against this notebook's labels.
    pub fn update_note(&mut self, id: &NoteId, update: NoteUpdate) -> StoreResult<Note> {
        self.notes.update_note(id, update, &self.labels)
    }

    pub fn set_note_labels(&mut self, id: &NoteId, label_ids: Vec<LabelId>) -> StoreResult<Note> {
        self.notes.set_labels(id, label_ids, &self.labels)
    }

    pub fn create_label(&mut self, text: &str) -> StoreResult<Label> {
        self.labels.create_label(text)
    }

    pub fn rename_label(&mut self, id: &LabelId, new_text: &str) -> StoreResult<Label> {
        self.labels.rename_label(id, new_text)
    }

    /// Deletes a label and strips it from every note, trashed ones included.
    pub fn delete_label(&mut self, id: &LabelId) -> StoreResult<()> {
        self.labels.delete_label(id, &mut self.notes)
    }

    /// Display texts of a note's labels, in the note's label order.
    pub fn label_texts(&self, note_id: &NoteId) -> StoreResult<Vec<String>> {
        let note = self
            .notes
            .get_note(note_id)
            .ok_or_else(|| StoreError::NoteNotFound(note_id.clone()))?;
        Ok(note
            .label_ids
            .iter()
            .filter_map(|label_id| self.labels.get_label(label_id))
            .map(|label| label.text)
            .collect())
    }
}
