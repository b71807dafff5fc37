//! Seed dataset loading.
//!
//! # Responsibility
//! - Read the optional bundled task dataset from a file or in-memory text.
//! - Classify failures as not found, malformed or oversized.
//!
//! # Invariants
//! - Loading is read-only; nothing here touches the store.
//! - Oversized datasets are refused before any entry is decoded.
//! - Returned records are never marked as merged; the reconciliation step
//!   sets that flag when it writes them.

use crate::config::EngineConfig;
use crate::model::task::TaskRecord;
use log::{info, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Outcome of one seed load.
pub type SeedResult = Result<Vec<TaskRecord>, SeedLoadError>;

/// Reasons a seed dataset could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedLoadError {
    /// No dataset at the configured location.
    NotFound(String),
    /// Dataset present but without a usable task list.
    Malformed(String),
    /// Dataset has more tasks than the configured maximum.
    TooManyTasks { count: usize, max: usize },
}

impl SeedLoadError {
    /// Short user-facing notice for the presentation layer.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Malformed(_) => "No correct file found",
            Self::TooManyTasks { .. } => "Too many tasks in file (limit exceeded)",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "seed_not_found",
            Self::Malformed(_) => "seed_malformed",
            Self::TooManyTasks { .. } => "seed_too_large",
        }
    }
}

impl Display for SeedLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(location) => write!(f, "seed dataset not found: {location}"),
            Self::Malformed(details) => write!(f, "seed dataset is malformed: {details}"),
            Self::TooManyTasks { count, max } => {
                write!(f, "seed dataset has {count} tasks, limit is {max}")
            }
        }
    }
}

impl Error for SeedLoadError {}

#[derive(Debug, Clone)]
enum SeedSource {
    File(PathBuf),
    Document(String),
}

#[derive(Deserialize)]
struct SeedDocument {
    tasks: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct SeedEntry {
    id: String,
    label: String,
    #[serde(default)]
    completed: bool,
}

/// Reads a seed dataset shaped as `{"tasks": [{"id", "label", "completed"?}]}`.
#[derive(Debug, Clone)]
pub struct SeedLoader {
    source: SeedSource,
    max_tasks: usize,
}

impl SeedLoader {
    /// Loader reading the dataset from a JSON file.
    pub fn from_path(path: impl Into<PathBuf>, config: &EngineConfig) -> Self {
        Self {
            source: SeedSource::File(path.into()),
            max_tasks: config.max_seed_tasks,
        }
    }

    /// Loader over an in-memory JSON document.
    pub fn from_document(document: impl Into<String>, config: &EngineConfig) -> Self {
        Self {
            source: SeedSource::Document(document.into()),
            max_tasks: config.max_seed_tasks,
        }
    }

    /// Loads and validates the dataset.
    ///
    /// # Side effects
    /// - Reads the source file, if any.
    /// - Emits one `seed_load` event with status and task count.
    pub fn load(&self) -> SeedResult {
        let result = match &self.source {
            SeedSource::File(path) => read_file(path).and_then(|text| self.parse(&text)),
            SeedSource::Document(text) => self.parse(text),
        };

        match &result {
            Ok(tasks) => info!(
                "event=seed_load module=seed status=ok tasks={}",
                tasks.len()
            ),
            Err(err) => warn!(
                "event=seed_load module=seed status=error error_code={} error={}",
                err.code(),
                err
            ),
        }
        result
    }

    fn parse(&self, text: &str) -> SeedResult {
        let document: SeedDocument = serde_json::from_str(text)
            .map_err(|err| SeedLoadError::Malformed(format!("no task list: {err}")))?;

        let count = document.tasks.len();
        if count > self.max_tasks {
            return Err(SeedLoadError::TooManyTasks {
                count,
                max: self.max_tasks,
            });
        }

        document
            .tasks
            .into_iter()
            .enumerate()
            .map(|(index, value)| parse_entry(index, value))
            .collect()
    }
}

fn read_file(path: &Path) -> Result<String, SeedLoadError> {
    std::fs::read_to_string(path)
        .map_err(|err| SeedLoadError::NotFound(format!("{}: {err}", path.display())))
}

fn parse_entry(index: usize, value: serde_json::Value) -> Result<TaskRecord, SeedLoadError> {
    let entry: SeedEntry = serde_json::from_value(value)
        .map_err(|err| SeedLoadError::Malformed(format!("task #{index}: {err}")))?;
    TaskRecord::with_id(entry.id, entry.label, entry.completed)
        .map_err(|err| SeedLoadError::Malformed(format!("task #{index}: {err}")))
}
