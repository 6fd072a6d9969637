//! Persistence port and snapshot hand-off.
//!
//! # Responsibility
//! - Define the boundary a host implements to load and save notebook state.
//! - Ship an in-memory port and a SQLite-backed port.
//!
//! # Invariants
//! - Stores never call a port on their own; the host decides when to save.
//! - A snapshot is a plain copy; mutating it never affects a live store.

pub mod sqlite;

use crate::db::DbError;
use crate::model::label::Label;
use crate::model::note::Note;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sqlite::SqlitePersistence;

pub type PersistResult<T> = Result<T, PersistError>;

/// Full notebook state in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Failure while moving a snapshot across the persistence boundary.
#[derive(Debug)]
pub enum PersistError {
    Db(DbError),
    /// Stored rows could not be decoded into domain records.
    InvalidData(String),
    /// A loaded snapshot violates store invariants.
    Store(StoreError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted notebook data: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Storage boundary implemented by the host.
pub trait PersistencePort {
    /// Reads the last saved state; an empty snapshot when nothing was saved.
    fn load(&mut self) -> PersistResult<Snapshot>;
    /// Replaces the saved state with `snapshot`.
    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()>;
}

/// Port that keeps the last saved snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    saved: Snapshot,
    saves: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a pre-seeded snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: snapshot,
            saves: 0,
        }
    }

    pub fn saved(&self) -> &Snapshot {
        &self.saved
    }

    /// Number of `save` calls received.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistencePort for MemoryPersistence {
    fn load(&mut self) -> PersistResult<Snapshot> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        self.saved = snapshot.clone();
        self.saves += 1;
        Ok(())
    }
}
