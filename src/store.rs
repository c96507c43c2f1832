//! High-level store API for taskman.

use crate::query::TaskFilter;
use crate::storage::{LoadReport, Storage};
use crate::types::{Priority, Task, ValidationError, normalize_tags, normalize_title, parse_due_date};
use chrono::NaiveDate;
use eyre::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Field changes for [`Store::update_task`]. `None` leaves a field alone.
///
/// Deserializes from a loose key/value map; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    /// Priority name, matched case-insensitively.
    pub priority: Option<String>,
    /// `YYYY-MM-DD`; an empty string clears the date.
    pub due_date: Option<String>,
    pub completed: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn clear_due_date(self) -> Self {
        self.due_date("")
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// An update whose every field has already passed validation.
struct ValidatedUpdate {
    title: Option<String>,
    priority: Option<Priority>,
    due_date: Option<Option<NaiveDate>>,
    completed: Option<bool>,
    tags: Option<Vec<String>>,
}

impl TaskUpdate {
    fn validate(&self) -> Result<ValidatedUpdate, ValidationError> {
        let title = self.title.as_deref().map(normalize_title).transpose()?;
        let priority = self.priority.as_deref().map(str::parse::<Priority>).transpose()?;
        let due_date = match self.due_date.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(text) => Some(Some(parse_due_date(text)?)),
        };
        let tags = self.tags.as_deref().map(normalize_tags).transpose()?;

        Ok(ValidatedUpdate {
            title,
            priority,
            due_date,
            completed: self.completed,
            tags,
        })
    }
}

impl ValidatedUpdate {
    fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        match self.completed {
            Some(true) => task.mark_completed(),
            Some(false) => task.completed = false,
            None => {}
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
    }
}

/// Owner of the task list and its backing file.
///
/// Every successful mutation is written through to disk before returning. A
/// failed write is logged and leaves the store dirty; the in-memory list stays
/// authoritative and [`Store::save`] can be called to retry.
///
/// The store has no internal locking. Wrap it in a `Mutex` to share it
/// between threads.
#[derive(Debug)]
pub struct Store {
    storage: Storage,
    tasks: Vec<Task>,
    dirty: bool,
    load_report: LoadReport,
    /// The backing file could not be read and has not been moved aside yet.
    set_aside_pending: bool,
}

impl Store {
    /// Open the store backed by `path`. Never fails: a missing file starts
    /// empty, an unreadable one is logged and also starts empty.
    ///
    /// An unreadable file is left in place until the first save, which moves
    /// it to a `<name>.corrupt` sibling before writing the new list.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let storage = Storage::new(path);
        let (tasks, load_report) = storage.load();
        let set_aside_pending = load_report.unreadable && storage.path().is_file();

        Self {
            storage,
            tasks,
            dirty: false,
            load_report,
            set_aside_pending,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// What happened when the backing file was loaded.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// True when the in-memory list holds changes not yet on disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the whole list to disk now.
    pub fn save(&mut self) -> Result<()> {
        if self.set_aside_pending {
            let moved = self.storage.set_aside().context("Refusing to overwrite unreadable task file")?;
            log::warn!("Moved unreadable task file to {}", moved.display());
            self.set_aside_pending = false;
        }

        self.storage
            .save(&self.tasks)
            .with_context(|| format!("Failed to save tasks to {}", self.storage.path().display()))?;
        self.dirty = false;
        Ok(())
    }

    /// Save after a mutation. Failures are reported, not returned.
    fn persist(&mut self) {
        self.dirty = true;
        if let Err(e) = self.save() {
            log::error!("{:#}", e);
        }
    }

    /// Create a task and append it to the end of the list.
    pub fn add_task<S: AsRef<str>>(
        &mut self,
        title: &str,
        due_date: Option<&str>,
        priority: Priority,
        tags: &[S],
    ) -> Result<Task, ValidationError> {
        let task = Task::new(title, due_date, priority, tags)?;
        log::info!("Adding task: {}", task.title);

        self.tasks.push(task.clone());
        self.persist();

        Ok(task)
    }

    /// Remove the task at `index`. Returns false if there is none.
    pub fn delete_task(&mut self, index: usize) -> bool {
        if index >= self.tasks.len() {
            log::debug!("delete_task: index {} out of range ({} tasks)", index, self.tasks.len());
            return false;
        }

        let removed = self.tasks.remove(index);
        log::info!("Deleted task {}: {}", index, removed.title);
        self.persist();
        true
    }

    /// Apply `update` to the task at `index`.
    ///
    /// Returns `Ok(false)` if there is no such task. All supplied fields are
    /// validated before any is applied, so a rejected update changes nothing.
    pub fn update_task(&mut self, index: usize, update: &TaskUpdate) -> Result<bool, ValidationError> {
        if index >= self.tasks.len() {
            log::debug!("update_task: index {} out of range ({} tasks)", index, self.tasks.len());
            return Ok(false);
        }

        let validated = update.validate()?;
        validated.apply(&mut self.tasks[index]);
        log::info!("Updated task {}: {}", index, self.tasks[index].title);

        self.persist();
        Ok(true)
    }

    /// Mark the task at `index` as done.
    pub fn complete_task(&mut self, index: usize) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.mark_completed();
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Tasks selected by `filter`, borrowed from the live list.
    pub fn get_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(&self.tasks).into_iter().map(|(_, task)| task).collect()
    }

    /// Like [`Store::get_tasks`], paired with each task's storage index for
    /// use with `delete_task` and `update_task`.
    pub fn get_tasks_indexed(&self, filter: &TaskFilter) -> Vec<(usize, &Task)> {
        filter.apply(&self.tasks)
    }

    /// Every task in storage order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Direct access to a live task. Marks the store dirty; call
    /// [`Store::save`] afterwards to persist the change.
    pub fn task_mut(&mut self, index: usize) -> Option<&mut Task> {
        let task = self.tasks.get_mut(index)?;
        self.dirty = true;
        Some(task)
    }

    /// Remove every completed task and return how many went.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();

        if removed > 0 {
            log::info!("Cleared {} completed task(s)", removed);
            self.persist();
        }

        removed
    }
}
