//! Task list session.
//!
//! # Responsibility
//! - Reconcile the seed exactly once, when the session is opened.
//! - Hold the current show/sort modes and the dismissible seed notice.
//! - Re-derive the display list on demand after mutations or mode changes.
//!
//! # Invariants
//! - `TaskList::open` is the only constructor, so no query or mutation can
//!   precede reconciliation.

use crate::model::task::TaskRecord;
use crate::repo::task_repo::TaskRepository;
use crate::seed::{SeedLoadError, SeedResult};
use crate::service::query::{ShowMode, SortMode};
use crate::service::reconcile::{reconcile, ReconcileReport};
use crate::service::task_service::{DeleteOutcome, ServiceResult, TaskService};
use crate::store::KeyValueStore;

/// One editing session over a task store.
pub struct TaskList<S: KeyValueStore> {
    service: TaskService<S>,
    show: ShowMode,
    sort: SortMode,
    seed_error: Option<SeedLoadError>,
    report: ReconcileReport,
}

impl<S: KeyValueStore> TaskList<S> {
    /// Opens a session, merging `seed` into `store` first.
    ///
    /// A seed failure is kept as a notice; the session still opens over
    /// whatever the store already holds.
    pub fn open(store: S, seed: SeedResult) -> ServiceResult<Self> {
        let repo = TaskRepository::new(store);
        let report = reconcile(&seed, &repo)?;
        Ok(Self {
            service: TaskService::new(repo),
            show: ShowMode::default(),
            sort: SortMode::default(),
            seed_error: seed.err(),
            report,
        })
    }

    pub fn service(&self) -> &TaskService<S> {
        &self.service
    }

    pub fn reconcile_report(&self) -> &ReconcileReport {
        &self.report
    }

    pub fn show_mode(&self) -> ShowMode {
        self.show
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn set_show_mode(&mut self, mode: ShowMode) {
        self.show = mode;
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort = mode;
    }

    /// Seed failure, if the last open could not use the seed.
    pub fn seed_error(&self) -> Option<&SeedLoadError> {
        self.seed_error.as_ref()
    }

    /// User-facing text for the seed failure, until dismissed.
    pub fn seed_notice(&self) -> Option<&'static str> {
        self.seed_error.as_ref().map(SeedLoadError::notice)
    }

    pub fn dismiss_notice(&mut self) {
        self.seed_error = None;
    }

    /// Current display list under the active modes.
    pub fn display_list(&self) -> ServiceResult<Vec<TaskRecord>> {
        Ok(self.service.query(self.show, self.sort)?)
    }

    pub fn create(&self, label: &str) -> ServiceResult<TaskRecord> {
        self.service.create(label)
    }

    pub fn toggle_completed(&self, id: &str) -> ServiceResult<TaskRecord> {
        self.service.toggle_completed(id)
    }

    pub fn delete(&self, id: &str) -> ServiceResult<DeleteOutcome> {
        self.service.delete(id)
    }
}
