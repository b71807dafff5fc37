//! Engine configuration.

/// Upper bound on accepted seed dataset size.
pub const DEFAULT_MAX_SEED_TASKS: usize = 100_000;

/// Default location of the bundled seed dataset, relative to the working
/// directory.
pub const DEFAULT_SEED_PATH: &str = "data/todo-list.json";

/// Tunables shared by the seed loader and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seeds with more tasks than this are refused as a whole.
    pub max_seed_tasks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_seed_tasks: DEFAULT_MAX_SEED_TASKS,
        }
    }
}
