//! Label store.
//!
//! # Responsibility
//! - Own the label collection and its create/rename/delete rules.
//! - Drive the note-side cascade when a label is deleted.
//!
//! # Invariants
//! - Label text is trimmed and non-empty.
//! - No two labels share text ignoring case.
//! - Listing order is insertion order.
//! - `delete_label` finishes the cascade before it returns.

use crate::model::id::{IdGenerator, LabelId};
use crate::model::label::Label;
use crate::store::clock::{system_clock, Clock};
use crate::store::error::{StoreError, StoreResult};
use crate::store::{LabelCascade, LabelLookup};
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

const LABEL_ID_PREFIX: &str = "label";

/// In-memory owner of all labels.
pub struct LabelStore {
    labels: Vec<Label>,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            labels: Vec::new(),
            ids: IdGenerator::new(LABEL_ID_PREFIX),
            clock,
        }
    }

    /// Rebuilds a store from previously persisted labels.
    ///
    /// Rejects blank text, duplicate ids and case-insensitively duplicate
    /// text. Text is re-trimmed on load.
    pub fn from_labels(labels: Vec<Label>, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        let mut store = Self::with_clock(clock);
        let mut seen_ids = HashSet::new();
        for mut label in labels {
            let text = label.text.trim().to_string();
            if text.is_empty() {
                return Err(StoreError::InvalidSnapshot(format!(
                    "label {} has blank text",
                    label.id
                )));
            }
            if !seen_ids.insert(label.id.clone()) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "duplicate label id {}",
                    label.id
                )));
            }
            if store.find_by_text(&text, None).is_some() {
                return Err(StoreError::InvalidSnapshot(format!(
                    "duplicate label text `{text}`"
                )));
            }
            label.text = text;
            store.labels.push(label);
        }
        Ok(store)
    }

    /// Creates a label from user input.
    pub fn create_label(&mut self, text: &str) -> StoreResult<Label> {
        let text = self.validate_text(text, None)?;
        let id = self.allocate_id();
        let label = Label::new(id, text);
        self.labels.push(label.clone());
        info!(
            "event=label_create module=label_store status=ok label_id={} total={}",
            label.id,
            self.labels.len()
        );
        Ok(label)
    }

    /// Replaces the text of an existing label.
    ///
    /// The label being renamed is excluded from the duplicate check, so a
    /// casing-only rename is accepted.
    pub fn rename_label(&mut self, id: &LabelId, new_text: &str) -> StoreResult<Label> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::LabelNotFound(id.clone()))?;
        let text = self.validate_text(new_text, Some(id))?;
        let label = &mut self.labels[index];
        label.text = text;
        debug!("event=label_rename module=label_store status=ok label_id={id}");
        Ok(label.clone())
    }

    /// Removes a label and strips it from every note via `cascade`.
    ///
    /// Deleting an already deleted label fails with `LabelNotFound`.
    pub fn delete_label(
        &mut self,
        id: &LabelId,
        cascade: &mut dyn LabelCascade,
    ) -> StoreResult<()> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::LabelNotFound(id.clone()))?;
        self.labels.remove(index);
        let stripped = cascade.remove_label(id);
        info!(
            "event=label_delete module=label_store status=ok label_id={id} notes_updated={stripped}"
        );
        Ok(())
    }

    pub fn get_label(&self, id: &LabelId) -> Option<Label> {
        self.labels.iter().find(|label| &label.id == id).cloned()
    }

    /// All labels in insertion order.
    pub fn list_labels(&self) -> Vec<Label> {
        self.labels.clone()
    }

    /// Labels whose text contains `query`, ignoring case.
    ///
    /// A blank query returns every label.
    pub fn filter_labels(&self, query: &str) -> Vec<Label> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_labels();
        }
        self.labels
            .iter()
            .filter(|label| label.folded_text().contains(needle.as_str()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn position(&self, id: &LabelId) -> Option<usize> {
        self.labels.iter().position(|label| &label.id == id)
    }

    fn find_by_text(&self, text: &str, excluding: Option<&LabelId>) -> Option<&Label> {
        let folded = text.to_lowercase();
        self.labels
            .iter()
            .filter(|label| Some(&label.id) != excluding)
            .find(|label| label.folded_text() == folded)
    }

    fn validate_text(&self, raw: &str, excluding: Option<&LabelId>) -> StoreResult<String> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyLabelText);
        }
        if self.find_by_text(text, excluding).is_some() {
            return Err(StoreError::DuplicateLabelText(text.to_string()));
        }
        Ok(text.to_string())
    }

    fn allocate_id(&mut self) -> LabelId {
        loop {
            let candidate = LabelId::new(self.ids.next_id(self.clock.now_ms()));
            if self.position(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

impl LabelLookup for LabelStore {
    fn contains_label(&self, id: &LabelId) -> bool {
        self.position(id).is_some()
    }
}
