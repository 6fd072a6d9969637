//! In-memory note and label stores.
//!
//! # Responsibility
//! - Enforce the note/label business invariants over plain collections.
//! - Keep the two stores decoupled: notes see labels only through
//!   [`LabelLookup`], label deletion reaches notes only through
//!   [`LabelCascade`].
//!
//! # Invariants
//! - Operations run to completion synchronously; `&mut self` serializes
//!   writers.
//! - A failing operation performs no partial mutation.

pub mod clock;
pub mod error;
pub mod label_store;
pub mod note_store;

use crate::model::id::LabelId;

pub use error::{ErrorKind, StoreError, StoreResult};

/// Read-only label existence check used to validate note label assignment.
pub trait LabelLookup {
    fn contains_label(&self, id: &LabelId) -> bool;
}

/// Follow-on mutation run by [`label_store::LabelStore::delete_label`].
pub trait LabelCascade {
    /// Removes `label_id` from every note; returns how many notes changed.
    fn remove_label(&mut self, label_id: &LabelId) -> usize;
}
