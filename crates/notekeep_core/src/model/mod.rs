//! Domain model for notes and labels.
//!
//! # Responsibility
//! - Define the plain data records owned by the stores.
//! - Keep wire naming (camelCase) stable for host snapshots.
//!
//! # Invariants
//! - Notes reference labels by id only, never by ownership.
//! - Deletion is a soft-delete flag until a note is purged.

pub mod id;
pub mod label;
pub mod note;
