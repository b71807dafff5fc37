//! Seed merge into the persistent store.
//!
//! # Invariants
//! - Existing records are never overwritten; the merge only adds.
//! - Tombstoned ids are never written back.
//! - A second run on an unchanged store performs no writes.

use crate::model::tombstone::TombstoneSet;
use crate::repo::task_repo::{RepoResult, TaskRepository, TOMBSTONE_KEY};
use crate::seed::SeedResult;
use crate::store::KeyValueStore;
use log::{info, warn};

/// Counters describing one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// `false` when the seed failed to load and nothing was merged.
    pub seed_applied: bool,
    pub merged: usize,
    pub skipped_existing: usize,
    pub skipped_tombstoned: usize,
    /// Seed entries whose id collides with the reserved tombstone key.
    pub skipped_reserved: usize,
}

/// Merges loaded seed tasks into the store.
///
/// Must run once, before any query or mutation of the session. A failed
/// seed leaves the store exactly as it was.
pub fn reconcile<S: KeyValueStore>(
    seed: &SeedResult,
    repo: &TaskRepository<S>,
) -> RepoResult<ReconcileReport> {
    let seed_tasks = match seed {
        Ok(tasks) => tasks,
        Err(err) => {
            info!(
                "event=reconcile module=service status=skipped reason=seed_unavailable error={err}"
            );
            return Ok(ReconcileReport::default());
        }
    };

    let tombstones = match repo.load_tombstones()? {
        Some(tombstones) => tombstones,
        None => {
            let empty = TombstoneSet::new();
            repo.save_tombstones(&empty)?;
            empty
        }
    };

    let mut report = ReconcileReport {
        seed_applied: true,
        ..ReconcileReport::default()
    };

    for task in seed_tasks {
        if task.id() == TOMBSTONE_KEY {
            warn!("event=reconcile module=service status=skipped reason=reserved_id");
            report.skipped_reserved += 1;
        } else if repo.has_key(task.id())? {
            report.skipped_existing += 1;
        } else if tombstones.contains(task.id()) {
            report.skipped_tombstoned += 1;
        } else {
            repo.put_task(&task.clone().into_seeded())?;
            report.merged += 1;
        }
    }

    info!(
        "event=reconcile module=service status=ok merged={} skipped_existing={} skipped_tombstoned={} tombstones={}",
        report.merged,
        report.skipped_existing,
        report.skipped_tombstoned,
        tombstones.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::reconcile;
    use crate::model::task::TaskRecord;
    use crate::repo::task_repo::{TaskRepository, TOMBSTONE_KEY};
    use crate::seed::SeedLoadError;
    use crate::store::{KeyValueStore, MemoryStore};

    #[test]
    fn failed_seed_does_not_touch_store() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);

        let report = reconcile(&Err(SeedLoadError::NotFound("x".into())), &repo).unwrap();

        assert!(!report.seed_applied);
        assert!(store.is_empty());
    }

    #[test]
    fn successful_seed_initializes_empty_tombstones() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);

        reconcile(&Ok(Vec::new()), &repo).unwrap();

        assert_eq!(store.get(TOMBSTONE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn reserved_seed_id_is_skipped() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);
        let seed = vec![TaskRecord::with_id(TOMBSTONE_KEY, "sneaky", false).unwrap()];

        let report = reconcile(&Ok(seed), &repo).unwrap();

        assert_eq!(report.skipped_reserved, 1);
        assert!(repo.load_tombstones().unwrap().unwrap().is_empty());
    }

    #[test]
    fn duplicate_seed_ids_keep_first_entry() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);
        let seed = vec![
            TaskRecord::with_id("a", "first", false).unwrap(),
            TaskRecord::with_id("a", "second", true).unwrap(),
        ];

        let report = reconcile(&Ok(seed), &repo).unwrap();

        assert_eq!(report.merged, 1);
        assert_eq!(report.skipped_existing, 1);
        assert_eq!(repo.get_task("a").unwrap().unwrap().label(), "first");
    }
}
