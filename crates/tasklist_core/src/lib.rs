//! Core engine for the task list editor.
//! Owns seed reconciliation, the derived display list and task mutations.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use config::{EngineConfig, DEFAULT_MAX_SEED_TASKS, DEFAULT_SEED_PATH};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{TaskId, TaskRecord, TaskValidationError};
pub use model::tombstone::TombstoneSet;
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository, TOMBSTONE_KEY};
pub use seed::{SeedLoadError, SeedLoader, SeedResult};
pub use service::query::{apply_show_filter, apply_sort_filter, query, ShowMode, SortMode};
pub use service::reconcile::{reconcile, ReconcileReport};
pub use service::task_list::TaskList;
pub use service::task_service::{DeleteOutcome, ServiceResult, TaskService, TaskServiceError};
pub use store::{KeyValueStore, MemoryStore, SqliteKvStore, StoreError, StoreResult};

/// Minimal health-check API for CLI smoke runs.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
