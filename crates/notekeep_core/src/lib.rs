//! Core domain logic for NoteKeep.
//! This crate is the single source of truth for note and label invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::id::{LabelId, NoteId};
pub use model::label::Label;
pub use model::note::{Note, NoteState};
pub use persist::{
    MemoryPersistence, PersistError, PersistResult, PersistencePort, Snapshot, SqlitePersistence,
};
pub use service::notebook::Notebook;
pub use store::clock::{Clock, ManualClock, SystemClock};
pub use store::label_store::LabelStore;
pub use store::note_store::{NoteStore, NoteUpdate};
pub use store::{ErrorKind, LabelCascade, LabelLookup, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
