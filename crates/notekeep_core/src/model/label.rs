//! Label domain model.

use crate::model::id::LabelId;
use serde::{Deserialize, Serialize};

/// User-defined label attached to notes by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: LabelId,
    /// Trimmed, non-empty display text; unique ignoring case.
    pub text: String,
}

impl Label {
    pub fn new(id: LabelId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Case-folded text used for uniqueness and filtering.
    pub(crate) fn folded_text(&self) -> String {
        self.text.to_lowercase()
    }
}
