//! Display list derivation.
//!
//! # Invariants
//! - The show filter always runs before the sort pass.
//! - Every sort mode is stable with respect to store enumeration order.
//! - Unrecognized mode names fall back to the identity pass.

use crate::model::task::TaskRecord;
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::store::KeyValueStore;
use log::debug;
use std::fmt::{Display, Formatter};

/// Which tasks are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowMode {
    #[default]
    All,
    Uncompleted,
}

impl ShowMode {
    pub const ALL: [ShowMode; 2] = [ShowMode::All, ShowMode::Uncompleted];

    /// Parses a mode name; anything unrecognized is `All`.
    pub fn from_name(name: &str) -> Self {
        match normalize_mode_name(name).as_str() {
            "uncompleted" => Self::Uncompleted,
            _ => Self::All,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Uncompleted => "uncompleted",
        }
    }
}

impl Display for ShowMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How visible tasks are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Unsorted,
    UncompletedFirst,
    CompletedFirst,
    Alphabetically,
}

impl SortMode {
    /// Modes in menu order.
    pub const ALL: [SortMode; 4] = [
        SortMode::Unsorted,
        SortMode::UncompletedFirst,
        SortMode::CompletedFirst,
        SortMode::Alphabetically,
    ];

    /// Parses a display or kebab-case name; anything unrecognized is
    /// `Unsorted`.
    pub fn from_name(name: &str) -> Self {
        match normalize_mode_name(name).as_str() {
            "uncompleted first" => Self::UncompletedFirst,
            "completed first" => Self::CompletedFirst,
            "alphabetically" => Self::Alphabetically,
            _ => Self::Unsorted,
        }
    }

    /// Display name, as shown in a sort menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unsorted => "Unsorted",
            Self::UncompletedFirst => "Uncompleted first",
            Self::CompletedFirst => "Completed first",
            Self::Alphabetically => "Alphabetically",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_mode_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', '_'], " ")
}

/// Keeps the tasks visible under `mode`, preserving order.
pub fn apply_show_filter(tasks: Vec<TaskRecord>, mode: ShowMode) -> Vec<TaskRecord> {
    match mode {
        ShowMode::All => tasks,
        ShowMode::Uncompleted => tasks
            .into_iter()
            .filter(|task| !task.is_completed())
            .collect(),
    }
}

/// Orders tasks for display. Stable in every mode.
pub fn apply_sort_filter(mut tasks: Vec<TaskRecord>, mode: SortMode) -> Vec<TaskRecord> {
    match mode {
        SortMode::Unsorted => tasks,
        SortMode::UncompletedFirst => stable_partition(tasks, |task| !task.is_completed()),
        SortMode::CompletedFirst => stable_partition(tasks, TaskRecord::is_completed),
        SortMode::Alphabetically => {
            // sort_by_cached_key keeps equal keys in their original order.
            tasks.sort_by_cached_key(|task| task.label().to_lowercase());
            tasks
        }
    }
}

fn stable_partition(
    tasks: Vec<TaskRecord>,
    first: impl Fn(&TaskRecord) -> bool,
) -> Vec<TaskRecord> {
    let (mut head, tail): (Vec<_>, Vec<_>) = tasks.into_iter().partition(|task| first(task));
    head.extend(tail);
    head
}

/// Reads the store and derives the display list.
pub fn query<S: KeyValueStore>(
    repo: &TaskRepository<S>,
    show: ShowMode,
    sort: SortMode,
) -> RepoResult<Vec<TaskRecord>> {
    let tasks = repo.list_tasks()?;
    let total = tasks.len();
    let visible = apply_sort_filter(apply_show_filter(tasks, show), sort);
    debug!(
        "event=task_query module=service status=ok show={} sort={:?} total={} visible={}",
        show,
        sort,
        total,
        visible.len()
    );
    Ok(visible)
}
