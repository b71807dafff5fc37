//! Task mutation service.
//!
//! # Responsibility
//! - Create, toggle and delete tasks by explicit id.
//! - Record deleted seed tasks in the tombstone set.
//!
//! # Invariants
//! - Only `completed` changes on an existing record.
//! - A seed task's tombstone is persisted before the record is removed.
//! - Failed mutations leave the store unchanged.

use crate::model::task::{TaskId, TaskRecord, TaskValidationError};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use crate::service::query::{query, ShowMode, SortMode};
use crate::store::KeyValueStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_ID_ATTEMPTS: usize = 4;

pub type ServiceResult<T> = Result<T, TaskServiceError>;

/// Errors surfaced by task mutations.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Rejected user input, e.g. an empty label.
    InvalidInput(TaskValidationError),
    /// No task is stored under the target id.
    RecordNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::RecordNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::RecordNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// What `delete` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// User task removed.
    Removed,
    /// Seed task removed and tombstoned.
    Tombstoned,
    /// Seed task was already gone and tombstoned; nothing to do.
    AlreadyTombstoned,
}

/// Mutation entry points over a task repository.
pub struct TaskService<S: KeyValueStore> {
    repo: TaskRepository<S>,
}

impl<S: KeyValueStore> TaskService<S> {
    pub fn new(repo: TaskRepository<S>) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &TaskRepository<S> {
        &self.repo
    }

    /// Creates an uncompleted user task.
    ///
    /// # Errors
    /// - `InvalidInput` when `label` is empty or whitespace only.
    pub fn create(&self, label: &str) -> ServiceResult<TaskRecord> {
        let task = self.fresh_task(label)?;
        self.repo.put_task(&task)?;
        info!(
            "event=task_create module=service status=ok task_id={}",
            task.id()
        );
        Ok(task)
    }

    /// Flips `completed` on one task and returns the updated record.
    ///
    /// # Errors
    /// - `RecordNotFound` when no task is stored under `id`.
    pub fn toggle_completed(&self, id: &str) -> ServiceResult<TaskRecord> {
        let mut task = self.require_task(id)?;
        task.toggle_completed();
        self.repo.put_task(&task)?;
        info!(
            "event=task_toggle module=service status=ok task_id={} completed={}",
            id,
            task.is_completed()
        );
        Ok(task)
    }

    /// Deletes one task, tombstoning it first when it came from the seed.
    ///
    /// Deleting an id that is already gone succeeds when the id is
    /// tombstoned, so a delete interrupted between its two writes can be
    /// retried.
    ///
    /// # Errors
    /// - `RecordNotFound` when `id` is neither stored nor tombstoned.
    pub fn delete(&self, id: &str) -> ServiceResult<DeleteOutcome> {
        let Some(task) = self.repo.get_task(id)? else {
            let tombstoned = self
                .repo
                .load_tombstones()?
                .is_some_and(|tombstones| tombstones.contains(id));
            if tombstoned {
                info!("event=task_delete module=service status=noop task_id={id}");
                return Ok(DeleteOutcome::AlreadyTombstoned);
            }
            return Err(TaskServiceError::RecordNotFound(id.to_string()));
        };

        let outcome = if task.is_from_file() {
            let mut tombstones = self.repo.load_tombstones()?.unwrap_or_default();
            tombstones.insert(task.id());
            self.repo.save_tombstones(&tombstones)?;
            DeleteOutcome::Tombstoned
        } else {
            DeleteOutcome::Removed
        };
        self.repo.remove_task(id)?;

        info!(
            "event=task_delete module=service status=ok task_id={} from_file={}",
            id,
            task.is_from_file()
        );
        Ok(outcome)
    }

    /// Derives the display list for the given modes.
    pub fn query(&self, show: ShowMode, sort: SortMode) -> RepoResult<Vec<TaskRecord>> {
        query(&self.repo, show, sort)
    }

    fn require_task(&self, id: &str) -> ServiceResult<TaskRecord> {
        self.repo
            .get_task(id)?
            .ok_or_else(|| TaskServiceError::RecordNotFound(id.to_string()))
    }

    fn fresh_task(&self, label: &str) -> ServiceResult<TaskRecord> {
        let mut task = TaskRecord::new(label)?;
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.repo.has_key(task.id())? {
                return Ok(task);
            }
            task = TaskRecord::new(label)?;
        }
        Err(TaskServiceError::Repo(RepoError::InvalidData(
            "could not allocate an unused task id".to_string(),
        )))
    }
}
