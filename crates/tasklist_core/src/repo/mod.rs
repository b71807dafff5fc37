//! Typed record access over the key-value store.
//!
//! # Responsibility
//! - Encode and decode task records and the tombstone set.
//! - Recognize task records by shape during enumeration, so unrelated keys
//!   sharing the store are ignored without naming them.
//!
//! # Invariants
//! - The reserved tombstone key never holds a task.
//! - A value only counts as a task when it decodes and its `id` matches the
//!   key it is stored under.

pub mod task_repo;
