//! Task repository over an injected `KeyValueStore`.

use crate::model::task::TaskRecord;
use crate::model::tombstone::TombstoneSet;
use crate::store::{KeyValueStore, StoreError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reserved store key holding the tombstone set.
pub const TOMBSTONE_KEY: &str = "removed";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    /// A record cannot be encoded or targets a reserved key.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Typed view of the store: one record per task key plus the tombstone key.
pub struct TaskRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether any value at all is stored under `key`, task or not.
    pub fn has_key(&self, key: &str) -> RepoResult<bool> {
        Ok(self.store.contains_key(key)?)
    }

    /// Loads one task. Non-task values under `id` read as absent.
    pub fn get_task(&self, id: &str) -> RepoResult<Option<TaskRecord>> {
        if id == TOMBSTONE_KEY {
            return Ok(None);
        }
        Ok(self
            .store
            .get(id)?
            .and_then(|value| decode_task(id, &value)))
    }

    /// Writes a task under its own id, replacing any previous version.
    pub fn put_task(&self, task: &TaskRecord) -> RepoResult<()> {
        if task.id() == TOMBSTONE_KEY {
            return Err(RepoError::InvalidData(format!(
                "task id `{TOMBSTONE_KEY}` is reserved"
            )));
        }
        let encoded = serde_json::to_string(task)
            .map_err(|err| RepoError::InvalidData(format!("cannot encode task: {err}")))?;
        self.store.set(task.id(), &encoded)?;
        Ok(())
    }

    pub fn remove_task(&self, id: &str) -> RepoResult<()> {
        self.store.remove(id)?;
        Ok(())
    }

    /// Enumerates every task record in store order.
    pub fn list_tasks(&self) -> RepoResult<Vec<TaskRecord>> {
        let mut tasks = Vec::new();
        for key in self.store.keys()? {
            if key == TOMBSTONE_KEY {
                continue;
            }
            // Keys can vanish between enumeration and read; skip those.
            let Some(value) = self.store.get(&key)? else {
                continue;
            };
            if let Some(task) = decode_task(&key, &value) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Loads the tombstone set, or `None` when the key was never written.
    pub fn load_tombstones(&self) -> RepoResult<Option<TombstoneSet>> {
        Ok(self
            .store
            .get(TOMBSTONE_KEY)?
            .map(|value| TombstoneSet::decode(&value)))
    }

    pub fn save_tombstones(&self, tombstones: &TombstoneSet) -> RepoResult<()> {
        self.store.set(TOMBSTONE_KEY, &tombstones.encode())?;
        Ok(())
    }
}

fn decode_task(key: &str, value: &str) -> Option<TaskRecord> {
    match serde_json::from_str::<TaskRecord>(value) {
        Ok(task) if task.id() == key => Some(task),
        Ok(task) => {
            warn!(
                "event=task_decode module=repo status=skipped reason=id_mismatch key={} id={}",
                key,
                task.id()
            );
            None
        }
        Err(_) => {
            debug!("event=task_decode module=repo status=skipped reason=not_a_task key={key}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskRepository, TOMBSTONE_KEY};
    use crate::model::task::TaskRecord;
    use crate::store::{KeyValueStore, MemoryStore};

    #[test]
    fn list_skips_foreign_and_reserved_keys() {
        let store = MemoryStore::new();
        store.set("loglevel:webpack-dev-server", "INFO").unwrap();
        store.set(TOMBSTONE_KEY, "").unwrap();
        store
            .set("other", r#"{"id":"not-other","label":"moved"}"#)
            .unwrap();
        let repo = TaskRepository::new(&store);
        let task = TaskRecord::new("real").unwrap();
        repo.put_task(&task).unwrap();

        let tasks = repo.list_tasks().unwrap();
        assert_eq!(tasks, vec![task]);
    }

    #[test]
    fn legacy_user_record_without_from_file_decodes() {
        let store = MemoryStore::new();
        store
            .set("u1", r#"{"id":"u1","label":"old","completed":true}"#)
            .unwrap();
        let repo = TaskRepository::new(&store);

        let task = repo.get_task("u1").unwrap().unwrap();
        assert!(task.is_completed());
        assert!(!task.is_from_file());
    }

    #[test]
    fn reserved_key_is_never_a_task() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);
        let reserved = TaskRecord::with_id(TOMBSTONE_KEY, "nope", false).unwrap();

        assert!(repo.put_task(&reserved).is_err());
        assert!(repo.get_task(TOMBSTONE_KEY).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn missing_tombstone_key_loads_as_none() {
        let store = MemoryStore::new();
        let repo = TaskRepository::new(&store);
        assert!(repo.load_tombstones().unwrap().is_none());

        store.set(TOMBSTONE_KEY, "a, b").unwrap();
        let loaded = repo.load_tombstones().unwrap().unwrap();
        assert!(loaded.contains("a") && loaded.contains("b"));
    }
}
