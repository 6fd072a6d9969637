//! Note domain model.
//!
//! # Responsibility
//! - Define the note record shared by list, edit and trash views.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `is_deleted` is the source of truth for trash membership.
//! - `label_ids` holds no duplicates; order is display order.

use crate::model::id::{LabelId, NoteId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a note that is still held by the store.
///
/// Purged notes are simply absent, so there is no variant for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Visible in normal listings.
    Active,
    /// Soft-deleted; visible only in the trash view.
    Trashed,
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Free-form text body. Never blank once stored.
    pub content: String,
    /// Weak references to labels; stale ids are stripped by label deletion.
    #[serde(default)]
    pub label_ids: Vec<LabelId>,
    /// Unix epoch milliseconds of the last content/label/bookmark/color edit.
    pub updated_at: i64,
    #[serde(default)]
    pub is_bookmarked: bool,
    #[serde(default)]
    pub is_deleted: bool,
    /// Display tag only; no logic is attached to it.
    #[serde(default)]
    pub color: Option<String>,
}

impl Note {
    /// Creates an active, unlabeled, unbookmarked note.
    pub fn new(id: NoteId, content: impl Into<String>, updated_at: i64) -> Self {
        Self {
            id,
            content: content.into(),
            label_ids: Vec::new(),
            updated_at,
            is_bookmarked: false,
            is_deleted: false,
            color: None,
        }
    }

    pub fn state(&self) -> NoteState {
        if self.is_deleted {
            NoteState::Trashed
        } else {
            NoteState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    pub fn has_label(&self, label_id: &LabelId) -> bool {
        self.label_ids.contains(label_id)
    }

    /// Case-insensitive containment check against a lowercased needle.
    pub(crate) fn content_matches(&self, lowered_query: &str) -> bool {
        lowered_query.is_empty() || self.content.to_lowercase().contains(lowered_query)
    }
}

/// Removes duplicate label ids, keeping the first occurrence of each.
pub(crate) fn dedup_label_ids(label_ids: &[LabelId]) -> Vec<LabelId> {
    let mut unique: Vec<LabelId> = Vec::with_capacity(label_ids.len());
    for label_id in label_ids {
        if !unique.contains(label_id) {
            unique.push(label_id.clone());
        }
    }
    unique
}
