//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted record shape (`Note`).
//! - Define the fixed priority buckets shared by display and aggregation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `timestamp` is assigned once at creation and never rewritten.
//! - `updated_at`, when set, is not earlier than `timestamp`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Opaque note identity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = String;

/// Generates a fresh unique note id.
pub fn new_note_id() -> NoteId {
    Uuid::new_v4().to_string()
}

/// Fixed priority bucket of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    /// Preselected for new notes.
    #[default]
    Low,
}

impl Priority {
    /// All buckets in display order.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a priority name.
    ///
    /// Accepts `high|medium|low` case-insensitively, plus the legacy color
    /// names `red|yellow|blue` written by older clients.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" | "red" => Some(Self::High),
            "medium" | "yellow" => Some(Self::Medium),
            "low" | "blue" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = NoteValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| NoteValidationError::UnknownPriority(s.to_string()))
    }
}

/// Validation failures for note shape rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyId,
    EmptyTitle,
    UnknownPriority(String),
    UpdatedBeforeCreated { timestamp: i64, updated_at: i64 },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "note id cannot be empty"),
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected high|medium|low")
            }
            Self::UpdatedBeforeCreated {
                timestamp,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must be >= timestamp ({timestamp})"
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// Persisted note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable identity assigned at creation.
    pub id: NoteId,
    /// Non-empty, trimmed title.
    pub title: String,
    /// Free text body; may be empty.
    pub content: String,
    pub priority: Priority,
    /// Creation time in Unix epoch milliseconds.
    pub timestamp: i64,
    /// Last edit time in Unix epoch milliseconds; `None` until first edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl Note {
    /// Creates a note with a generated id and the given creation time.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        priority: Priority,
        timestamp: i64,
    ) -> Self {
        Self {
            id: new_note_id(),
            title: title.into(),
            content: content.into(),
            priority,
            timestamp,
            updated_at: None,
        }
    }

    /// Checks shape rules that must hold at the moment of persistence.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(NoteValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if let Some(updated_at) = self.updated_at {
            if updated_at < self.timestamp {
                return Err(NoteValidationError::UpdatedBeforeCreated {
                    timestamp: self.timestamp,
                    updated_at,
                });
            }
        }
        Ok(())
    }
}
