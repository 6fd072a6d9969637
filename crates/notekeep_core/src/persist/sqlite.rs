//! SQLite implementation of the persistence port.
//!
//! # Responsibility
//! - Save a full notebook snapshot with replace semantics.
//! - Load notes, labels and note-label links back in stored order.
//!
//! # Invariants
//! - `save` runs in one immediate transaction; a failed save keeps the
//!   previous state.
//! - Read paths reject malformed rows instead of masking them.

use crate::db::{open_db, open_db_in_memory};
use crate::model::id::{LabelId, NoteId};
use crate::model::label::Label;
use crate::model::note::Note;
use crate::persist::{PersistError, PersistResult, PersistencePort, Snapshot};
use log::{error, info};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Snapshot port over a migrated SQLite connection.
pub struct SqlitePersistence {
    conn: Connection,
}

impl SqlitePersistence {
    /// Opens (or creates) a notebook database file.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> PersistResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps a connection already returned by `db::open_db*`.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(
            "DELETE FROM note_labels;
             DELETE FROM notes;
             DELETE FROM labels;",
        )?;

        for (position, label) in snapshot.labels.iter().enumerate() {
            tx.execute(
                "INSERT INTO labels (id, text, position) VALUES (?1, ?2, ?3);",
                params![label.id.as_str(), label.text.as_str(), to_position(position)?],
            )?;
        }

        for (position, note) in snapshot.notes.iter().enumerate() {
            tx.execute(
                "INSERT INTO notes (
                    id,
                    content,
                    updated_at,
                    is_bookmarked,
                    is_deleted,
                    color,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    note.id.as_str(),
                    note.content.as_str(),
                    note.updated_at,
                    note.is_bookmarked,
                    note.is_deleted,
                    note.color.as_deref(),
                    to_position(position)?,
                ],
            )?;
            for (label_position, label_id) in note.label_ids.iter().enumerate() {
                tx.execute(
                    "INSERT INTO note_labels (note_id, label_id, position)
                     VALUES (?1, ?2, ?3);",
                    params![
                        note.id.as_str(),
                        label_id.as_str(),
                        to_position(label_position)?
                    ],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn read_snapshot(&self) -> PersistResult<Snapshot> {
        let mut label_stmt = self
            .conn
            .prepare("SELECT id, text FROM labels ORDER BY position ASC;")?;
        let labels = label_stmt
            .query_map([], |row| {
                Ok(Label::new(
                    LabelId::new(row.get::<_, String>("id")?),
                    row.get::<_, String>("text")?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut links = self.load_note_labels()?;

        let mut note_stmt = self.conn.prepare(
            "SELECT
                id,
                content,
                updated_at,
                is_bookmarked,
                is_deleted,
                color
             FROM notes
             ORDER BY position ASC;",
        )?;
        let mut rows = note_stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut note = parse_note_row(row)?;
            note.label_ids = links.remove(note.id.as_str()).unwrap_or_default();
            notes.push(note);
        }

        Ok(Snapshot { notes, labels })
    }

    fn load_note_labels(&self) -> PersistResult<HashMap<String, Vec<LabelId>>> {
        let mut stmt = self.conn.prepare(
            "SELECT note_id, label_id
             FROM note_labels
             ORDER BY note_id ASC, position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut links: HashMap<String, Vec<LabelId>> = HashMap::new();
        while let Some(row) = rows.next()? {
            let note_id: String = row.get("note_id")?;
            let label_id: String = row.get("label_id")?;
            links.entry(note_id).or_default().push(LabelId::new(label_id));
        }
        Ok(links)
    }
}

impl PersistencePort for SqlitePersistence {
    fn load(&mut self) -> PersistResult<Snapshot> {
        let started_at = Instant::now();
        match self.read_snapshot() {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=persist status=ok notes={} labels={} duration_ms={}",
                    snapshot.notes.len(),
                    snapshot.labels.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(snapshot)
            }
            Err(err) => {
                error!("event=snapshot_load module=persist status=error error={err}");
                Err(err)
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> PersistResult<()> {
        let started_at = Instant::now();
        match self.write_snapshot(snapshot) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=persist status=ok notes={} labels={} duration_ms={}",
                    snapshot.notes.len(),
                    snapshot.labels.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=snapshot_save module=persist status=error error={err}");
                Err(err)
            }
        }
    }
}

fn parse_note_row(row: &Row<'_>) -> PersistResult<Note> {
    let id: String = row.get("id")?;
    let is_bookmarked = parse_flag(row.get("is_bookmarked")?, "is_bookmarked", &id)?;
    let is_deleted = parse_flag(row.get("is_deleted")?, "is_deleted", &id)?;
    Ok(Note {
        content: row.get("content")?,
        label_ids: Vec::new(),
        updated_at: row.get("updated_at")?,
        is_bookmarked,
        is_deleted,
        color: row.get("color")?,
        id: NoteId::new(id),
    })
}

fn parse_flag(value: i64, column: &str, note_id: &str) -> PersistResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PersistError::InvalidData(format!(
            "invalid {column} value `{other}` for note {note_id}"
        ))),
    }
}

fn to_position(index: usize) -> PersistResult<i64> {
    i64::try_from(index)
        .map_err(|_| PersistError::InvalidData(format!("position {index} out of range")))
}
