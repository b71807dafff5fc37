//! Task list use-case services.
//!
//! # Responsibility
//! - Merge the seed dataset into the store (`reconcile`).
//! - Derive the display list through show/sort passes (`query`).
//! - Apply create/toggle/delete mutations (`task_service`).
//! - Tie the above into one session that reconciles before anything else
//!   (`task_list`).
//!
//! # Invariants
//! - Services reach the store only through an injected repository.
//! - The display list is recomputed on every read, never cached.

pub mod query;
pub mod reconcile;
pub mod task_list;
pub mod task_service;
