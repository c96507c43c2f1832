//! Shared test infrastructure for taskman integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use taskman::{Priority, Store, Task, TaskFilter};
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment with an empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(temp_dir.path().join("tasks.json"));
        Self { temp_dir, store }
    }

    /// Create a test environment whose task file already holds `content`.
    pub fn with_file(content: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("tasks.json");
        fs::write(&path, content).expect("Failed to write task file");
        let store = Store::open(path);
        Self { temp_dir, store }
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Drop the current store and open a fresh one on the same file.
    pub fn reopen(&mut self) {
        self.store = Store::open(self.path());
    }

    /// Raw contents of the backing file, if it exists.
    pub fn file_content(&self) -> Option<String> {
        fs::read_to_string(self.path()).ok()
    }

    /// Add a task with default priority, no date and no tags.
    pub fn add(&mut self, title: &str) -> Task {
        self.store
            .add_task::<&str>(title, None, Priority::Medium, &[])
            .expect("Failed to add task")
    }

    /// Add a task with a due date and priority.
    pub fn add_scheduled(&mut self, title: &str, due: Option<&str>, priority: Priority) -> Task {
        self.store
            .add_task::<&str>(title, due, priority, &[])
            .expect("Failed to add task")
    }

    /// Add a task with tags.
    pub fn add_tagged(&mut self, title: &str, tags: &[&str]) -> Task {
        self.store
            .add_task(title, None, Priority::Medium, tags)
            .expect("Failed to add task")
    }

    /// Mark the task at `index` completed.
    pub fn complete(&mut self, index: usize) {
        assert!(self.store.complete_task(index), "No task at index {}", index);
    }

    /// Titles of the tasks selected by `filter`, in view order.
    pub fn titles(&self, filter: &TaskFilter) -> Vec<String> {
        self.store
            .get_tasks(filter)
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    /// Titles of every task in storage order.
    pub fn all_titles(&self) -> Vec<String> {
        self.titles(&TaskFilter::new())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
