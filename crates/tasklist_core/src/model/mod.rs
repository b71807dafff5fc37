//! Domain model for the persisted task list.
//!
//! # Responsibility
//! - Define the task record stored one-per-key in the persistent store.
//! - Define the tombstone set that blocks re-merging deleted seed tasks.
//!
//! # Invariants
//! - A task id is its store key and is never reused for another task.
//! - `from_file` is fixed at creation and never toggled afterwards.

pub mod task;
pub mod tombstone;
