//! Storage layer for taskman: a single JSON file holding every task.
//!
//! Loading is tolerant: a malformed record is skipped with a warning rather
//! than failing the whole file. Saving writes a sibling temp file and renames
//! it over the backing file, so readers only ever see a complete document.

use crate::types::{Priority, Task, ValidationError};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default backing file name.
pub const DEFAULT_FILE: &str = "tasks.json";

/// On-disk shape of a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TaskRecord {
    title: String,

    #[serde(default)]
    due_date: Option<String>,

    /// Absent means MEDIUM
    #[serde(default)]
    priority: Option<String>,

    /// Null or absent means not done
    #[serde(default)]
    completed: Option<bool>,

    /// Null or absent means no tags
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due_date: task.due_date_text(),
            priority: Some(task.priority.name().to_string()),
            completed: Some(task.completed),
            tags: Some(task.tags.clone()),
        }
    }
}

impl TaskRecord {
    /// Validate the record into a task.
    fn into_task(self) -> Result<Task, ValidationError> {
        let priority = match self.priority.as_deref() {
            Some(name) => name.parse::<Priority>()?,
            None => Priority::default(),
        };
        let tags = self.tags.unwrap_or_default();
        let mut task = Task::new(&self.title, self.due_date.as_deref(), priority, tags.as_slice())?;
        task.completed = self.completed.unwrap_or(false);
        Ok(task)
    }
}

/// Outcome of loading the backing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records turned into tasks.
    pub loaded: usize,
    /// Records dropped because they were malformed.
    pub skipped: usize,
    /// True when the file existed but could not be read or parsed at all.
    pub unreadable: bool,
}

/// Handle on the backing file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file used during save: `<dir>/.<name>.tmp`.
    pub fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FILE.to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    /// Load every well-formed task. Never fails: an unreadable file yields an
    /// empty list and a report flagging it.
    pub fn load(&self) -> (Vec<Task>, LoadReport) {
        let mut report = LoadReport::default();

        if !self.path.exists() {
            log::debug!("No task file at {}, starting empty", self.path.display());
            return (Vec::new(), report);
        }

        let records = match self.read_records() {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load tasks from {}: {:#}", self.path.display(), e);
                report.unreadable = true;
                return (Vec::new(), report);
            }
        };

        let mut tasks = Vec::with_capacity(records.len());
        for (position, value) in records.into_iter().enumerate() {
            match decode_record(value) {
                Ok(task) => {
                    tasks.push(task);
                    report.loaded += 1;
                }
                Err(reason) => {
                    log::warn!("Skipping task record {}: {}", position, reason);
                    report.skipped += 1;
                }
            }
        }

        log::debug!(
            "Loaded {} task(s) from {} ({} skipped)",
            report.loaded,
            self.path.display(),
            report.skipped
        );
        (tasks, report)
    }

    /// Read the container: a JSON array whose elements are decoded later,
    /// one at a time.
    fn read_records(&self) -> Result<Vec<serde_json::Value>> {
        let content = fs::read_to_string(&self.path).context("Failed to read task file")?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).context("Task file is not a JSON array")
    }

    /// Write all tasks with write-temp-then-rename.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create task file directory")?;
        }

        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
        let mut json = serde_json::to_string_pretty(&records).context("Failed to serialize tasks")?;
        json.push('\n');

        let tmp_path = self.temp_path();
        let result = write_synced(&tmp_path, json.as_bytes())
            .and_then(|()| fs::rename(&tmp_path, &self.path).context("Failed to replace task file"));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        log::debug!("Saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Where an unreadable backing file is moved: `<name>.corrupt`, or
    /// `<name>.corrupt.N` when earlier copies are already there.
    pub fn corrupt_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FILE.to_string());

        let first = self.path.with_file_name(format!("{}.corrupt", name));
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| self.path.with_file_name(format!("{}.corrupt.{}", name, n)))
            .find(|candidate| !candidate.exists())
            .unwrap_or(first)
    }

    /// Move the backing file to [`Storage::corrupt_path`] so a later save
    /// does not overwrite it. Returns the new location.
    pub fn set_aside(&self) -> Result<PathBuf> {
        let target = self.corrupt_path();
        fs::rename(&self.path, &target)
            .with_context(|| format!("Failed to move {} to {}", self.path.display(), target.display()))?;
        Ok(target)
    }
}

/// Create `path`, write `bytes` and flush them to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).context("Failed to create temp task file")?;
    file.write_all(bytes).context("Failed to write temp task file")?;
    file.sync_all().context("Failed to sync temp task file")?;
    Ok(())
}

/// Turn one array element into a task, describing why it was rejected.
fn decode_record(value: serde_json::Value) -> std::result::Result<Task, String> {
    let record: TaskRecord = serde_json::from_value(value).map_err(|e| e.to_string())?;
    record.into_task().map_err(|e| e.to_string())
}
