//! Task record model.
//!
//! # Responsibility
//! - Define the canonical task record and its JSON wire shape.
//! - Validate identity and label on every construction path, including
//!   deserialization.
//!
//! # Invariants
//! - `id` and `label` are never empty.
//! - Whitespace-only labels are refused for new user tasks only; stored
//!   records and seed entries carrying one stay readable.
//! - `from_file` can only be set through the seed merge path.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier. Seed tasks bring their own, user tasks get a uuid.
pub type TaskId = String;

/// Validation failures for task record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyLabel,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyLabel => write!(f, "task label must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One persisted task.
///
/// Serialized as `{"id", "label", "completed", "fromFile"}`. The two flags
/// default to `false` when absent so records written by older clients (which
/// omitted `fromFile` on user tasks) still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaskRecord")]
pub struct TaskRecord {
    id: TaskId,
    label: String,
    completed: bool,
    #[serde(rename = "fromFile")]
    from_file: bool,
}

#[derive(Deserialize)]
struct RawTaskRecord {
    id: String,
    label: String,
    #[serde(default)]
    completed: bool,
    #[serde(default, rename = "fromFile")]
    from_file: bool,
}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = TaskValidationError;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        let mut record = Self::with_id(raw.id, raw.label, raw.completed)?;
        record.from_file = raw.from_file;
        Ok(record)
    }
}

impl TaskRecord {
    /// Creates an uncompleted user task with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyLabel` when `label` is empty or whitespace only.
    pub fn new(label: impl Into<String>) -> Result<Self, TaskValidationError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(TaskValidationError::EmptyLabel);
        }
        Self::with_id(Uuid::new_v4().to_string(), label, false)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used by the seed loader, where identity comes from the dataset.
    /// The record is never marked as seed-originated here; only the merge
    /// does that.
    pub fn with_id(
        id: impl Into<TaskId>,
        label: impl Into<String>,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        let record = Self {
            id: id.into(),
            label: label.into(),
            completed,
            from_file: false,
        };
        record.validate()?;
        Ok(record)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.label.is_empty() {
            return Err(TaskValidationError::EmptyLabel);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether this record was introduced by the seed merge.
    pub fn is_from_file(&self) -> bool {
        self.from_file
    }

    /// Flips the completion flag. The only post-creation mutation.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Marks a seed entry as merged from file.
    pub(crate) fn into_seeded(mut self) -> Self {
        self.from_file = true;
        self
    }
}
