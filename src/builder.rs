//! Builder pattern API for adding tasks.

use crate::store::Store;
use crate::types::{Priority, Task, ValidationError};

/// Builder for adding tasks with a fluent API.
///
/// # Example
///
/// ```no_run
/// use taskman::{Priority, Store};
///
/// let mut store = Store::open("tasks.json");
/// let task = store
///     .build("Finish project")
///     .due("2024-06-05")
///     .priority(Priority::High)
///     .tag("work")
///     .create()?;
/// # Ok::<(), taskman::ValidationError>(())
/// ```
pub struct TaskBuilder<'a> {
    store: &'a mut Store,
    title: String,
    due_date: Option<String>,
    priority: Priority,
    tags: Vec<String>,
}

impl<'a> TaskBuilder<'a> {
    /// Create a new builder with the given title.
    pub fn new(store: &'a mut Store, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
            due_date: None,
            priority: Priority::default(),
            tags: Vec::new(),
        }
    }

    /// Set the due date (`YYYY-MM-DD`).
    pub fn due(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Add a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Validate, append, and persist the task.
    pub fn create(self) -> Result<Task, ValidationError> {
        self.store
            .add_task(&self.title, self.due_date.as_deref(), self.priority, self.tags.as_slice())
    }
}

impl Store {
    /// Start building a new task with the given title.
    pub fn build(&mut self, title: impl Into<String>) -> TaskBuilder<'_> {
        TaskBuilder::new(self, title)
    }
}
