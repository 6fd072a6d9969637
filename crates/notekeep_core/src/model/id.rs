//! Opaque identifiers and their generator.
//!
//! # Responsibility
//! - Give notes and labels distinct, strongly-typed string ids.
//! - Allocate ids that never collide, even within one millisecond.
//!
//! # Invariants
//! - Generated ids have the shape `<prefix>-<millis>-<counter>-<suffix>`.
//! - The counter is monotonic for the generator lifetime, so an id is never
//!   handed out twice by the same generator.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 6;

/// Stable identifier of a note.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

/// Stable identifier of a label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Wraps an existing id value, e.g. one read back from storage.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(NoteId);
string_id!(LabelId);

/// Allocates unique id strings for one kind of record.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: &'static str,
    counter: u64,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, counter: 0 }
    }

    /// Returns the next id string for the given wall-clock time.
    pub fn next_id(&mut self, now_ms: i64) -> String {
        self.counter += 1;
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}-{}",
            self.prefix,
            now_ms,
            self.counter,
            &random[..RANDOM_SUFFIX_LEN]
        )
    }
}
