//! CLI argument parsing for taskman.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskman::Priority;

#[derive(Parser)]
#[command(
    name = "tm",
    about = "Personal task tracking backed by a JSON file",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/taskman/logs/taskman.log (set RUST_LOG to adjust)"
)]
pub struct Cli {
    /// Path to the task file (default: ./tasks.json or `data_file` from the config)
    #[arg(short = 'f', long, global = true, env = "TASKMAN_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the YAML config file (default: ~/.config/taskman/config.yaml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        /// Priority (low, medium, high)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// Tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// List tasks
    List {
        /// Only completed tasks
        #[arg(long, conflicts_with = "pending")]
        done: bool,

        /// Only tasks not yet completed
        #[arg(long)]
        pending: bool,

        /// Case-insensitive search over title, priority, due date and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by due date, then priority
        #[arg(long)]
        sort: bool,
    },

    /// Mark a task as completed
    Done {
        /// Task number as shown by `list`
        index: usize,
    },

    /// Mark a task as not completed
    Undo {
        /// Task number as shown by `list`
        index: usize,
    },

    /// Edit a task
    Edit {
        /// Task number as shown by `list`
        index: usize,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD); pass "" to clear it
        #[arg(short, long)]
        due: Option<String>,

        /// Replace tags (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete a task
    Rm {
        /// Task number as shown by `list`
        index: usize,
    },

    /// Delete every completed task
    Clear,

    /// Print the resolved task file path
    Path,
}
