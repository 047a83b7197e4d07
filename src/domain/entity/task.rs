use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use uuid::Uuid;

/// Opaque identifier of a [`Task`] or a [`SessionRecord`].
///
/// [`SessionRecord`]: crate::domain::entity::SessionRecord
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// One entry of the focus task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: RecordId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Try to create an uncompleted [`Task`] from user input. Surrounding
    /// whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an error if the trimmed text is empty.
    pub fn try_new(text: &str, created_at: DateTime<Utc>) -> Result<Self, TryNewTaskError> {
        let text = text.trim();
        ensure!(!text.is_empty(), EmptyTextSnafu);
        Ok(Self {
            id: RecordId::generate(),
            text: text.to_owned(),
            completed: false,
            created_at,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flip the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// An error type of creating a [`Task`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewTaskError {
    #[snafu(display("Text of a task must contain non-whitespace characters"))]
    #[non_exhaustive]
    EmptyText,
}
