//! Taskman: personal task tracking backed by a single JSON file.
//!
//! The [`Store`] owns the task list, validates every change, and writes the
//! whole list back atomically after each mutation.
//!
//! # Example
//!
//! ```no_run
//! use taskman::{Priority, Store, TaskFilter, TaskUpdate};
//!
//! // Open (or start) a task file
//! let mut store = Store::open("tasks.json");
//!
//! // Add tasks
//! store.add_task("Buy milk", Some("2024-06-10"), Priority::Low, &["home"]).unwrap();
//! store.add_task::<&str>("Finish project", Some("2024-06-05"), Priority::High, &[]).unwrap();
//!
//! // Sorted view of the open ones
//! let open = store.get_tasks(&TaskFilter::new().completed(false).sorted());
//! assert_eq!(open[0].title, "Finish project");
//!
//! // Complete a task
//! store.update_task(1, &TaskUpdate::new().completed(true)).unwrap();
//! assert_eq!(store.clear_completed(), 1);
//! ```

mod builder;
mod query;
mod storage;
mod store;
mod types;

pub mod config;

// Re-export public API
pub use builder::TaskBuilder;
pub use config::Config;
pub use query::TaskFilter;
pub use storage::{DEFAULT_FILE, LoadReport};
pub use store::{Store, TaskUpdate};
pub use types::{DATE_FORMAT, Priority, Task, ValidationError, parse_due_date};
