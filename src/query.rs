//! Filtering and ordering for task views.

use crate::types::Task;

/// Describes which tasks a view wants and in what order.
///
/// Filters compose with AND. An empty filter returns every task in storage
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub sort: bool,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only tasks whose completion flag equals `completed`.
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Only tasks matching `query` (see [`Task::matches_query`]).
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Order results by due date, then priority.
    pub fn sorted(mut self) -> Self {
        self.sort = true;
        self
    }

    /// Check a single task against the filters (ordering is not involved).
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(completed) = self.completed
            && task.completed != completed
        {
            return false;
        }

        match self.search.as_deref() {
            Some(query) => task.matches_query(query),
            None => true,
        }
    }

    /// Apply the filter to a slice, keeping each task's storage index.
    pub(crate) fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<(usize, &'a Task)> {
        let mut selected: Vec<(usize, &Task)> = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| self.matches(task))
            .collect();

        if self.sort {
            // sort_by is stable, so schedule ties keep storage order
            selected.sort_by(|(_, a), (_, b)| a.schedule_cmp(b));
        }

        selected
    }
}
