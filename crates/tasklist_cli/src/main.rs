//! Command-line front end for the task list engine.
//!
//! Usage:
//!   tasklist list [--show all|uncompleted] [--sort unsorted|uncompleted-first|completed-first|alphabetically]
//!   tasklist add <label>
//!   tasklist toggle <id>
//!   tasklist delete <id>
//!   tasklist ping
//!
//! Every run opens the store, merges the seed once, then applies the command
//! and prints the resulting list.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use tasklist_core::db::open_db;
use tasklist_core::{
    default_log_level, init_logging, EngineConfig, SeedLoader, ShowMode, SortMode,
    SqliteKvStore, TaskList, TaskRecord, DEFAULT_MAX_SEED_TASKS, DEFAULT_SEED_PATH,
};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(author, version, about = "Single-user task list backed by a local store")]
struct Cli {
    /// Task store database file
    #[arg(long, env = "TASKLIST_DB", default_value = "tasklist.sqlite3")]
    db: PathBuf,

    /// Seed dataset merged into the store on startup
    #[arg(long, env = "TASKLIST_SEED", default_value = DEFAULT_SEED_PATH)]
    seed: PathBuf,

    /// Largest seed dataset accepted
    #[arg(long, default_value_t = DEFAULT_MAX_SEED_TASKS)]
    max_seed_tasks: usize,

    /// Directory for rolling log files (absolute); logging is off when unset
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the task list
    List {
        #[arg(long, value_enum, default_value_t = ShowArg::All)]
        show: ShowArg,

        #[arg(long, value_enum, default_value_t = SortArg::Unsorted)]
        sort: SortArg,
    },

    /// Add a task
    Add {
        /// Task text
        label: String,
    },

    /// Toggle completion of a task
    Toggle {
        /// Task id
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },

    /// Check core linkage
    Ping,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShowArg {
    All,
    Uncompleted,
}

impl From<ShowArg> for ShowMode {
    fn from(value: ShowArg) -> Self {
        match value {
            ShowArg::All => ShowMode::All,
            ShowArg::Uncompleted => ShowMode::Uncompleted,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Unsorted,
    UncompletedFirst,
    CompletedFirst,
    Alphabetically,
}

impl From<SortArg> for SortMode {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Unsorted => SortMode::Unsorted,
            SortArg::UncompletedFirst => SortMode::UncompletedFirst,
            SortArg::CompletedFirst => SortMode::CompletedFirst,
            SortArg::Alphabetically => SortMode::Alphabetically,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Ping = cli.command {
        println!("tasklist_core ping={}", tasklist_core::ping());
        println!("tasklist_core version={}", tasklist_core::core_version());
        return Ok(());
    }

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open task store {}", cli.db.display()))?;
    let store = SqliteKvStore::try_new(&conn)?;
    let config = EngineConfig {
        max_seed_tasks: cli.max_seed_tasks,
    };
    let seed = SeedLoader::from_path(&cli.seed, &config).load();

    let mut list = TaskList::open(store, seed).context("failed to reconcile seed dataset")?;
    if let Some(notice) = list.seed_notice() {
        eprintln!("warning: {notice}");
    }

    match cli.command {
        Commands::List { show, sort } => {
            list.set_show_mode(show.into());
            list.set_sort_mode(sort.into());
        }
        Commands::Add { label } => {
            let task = list.create(&label)?;
            info!("event=cli_add module=cli status=ok task_id={}", task.id());
        }
        Commands::Toggle { id } => {
            list.toggle_completed(&id)?;
        }
        Commands::Delete { id } => {
            let outcome = list.delete(&id)?;
            info!("event=cli_delete module=cli status=ok task_id={id} outcome={outcome:?}");
        }
        Commands::Ping => {}
    }

    print_tasks(&list.display_list()?);
    Ok(())
}

fn print_tasks(tasks: &[TaskRecord]) {
    if tasks.is_empty() {
        println!("No more tasks to do :)");
        return;
    }
    for task in tasks {
        let mark = if task.is_completed() { 'x' } else { ' ' };
        println!("[{mark}] {}  {}", task.label(), task.id());
    }
}
