//! Store error taxonomy.

use crate::model::id::{LabelId, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse category callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad, empty or duplicate input. Caller should re-prompt.
    Validation,
    /// Id does not exist or was purged. Caller should refresh its view.
    NotFound,
}

/// Error returned by note/label store operations.
///
/// Every failing call leaves store state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Note content is blank after trimming.
    EmptyContent,
    /// Label text is blank after trimming.
    EmptyLabelText,
    /// Another label already uses this text (ignoring case).
    DuplicateLabelText(String),
    /// A note update referenced a label that does not exist.
    UnknownLabel(LabelId),
    /// A loaded snapshot violates a store invariant.
    InvalidSnapshot(String),
    NoteNotFound(NoteId),
    LabelNotFound(LabelId),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyContent
            | Self::EmptyLabelText
            | Self::DuplicateLabelText(_)
            | Self::UnknownLabel(_)
            | Self::InvalidSnapshot(_) => ErrorKind::Validation,
            Self::NoteNotFound(_) | Self::LabelNotFound(_) => ErrorKind::NotFound,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content must not be blank"),
            Self::EmptyLabelText => write!(f, "label text must not be blank"),
            Self::DuplicateLabelText(text) => write!(f, "label already exists: `{text}`"),
            Self::UnknownLabel(id) => write!(f, "unknown label id: {id}"),
            Self::InvalidSnapshot(details) => write!(f, "invalid snapshot: {details}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::LabelNotFound(id) => write!(f, "label not found: {id}"),
        }
    }
}

impl Error for StoreError {}
