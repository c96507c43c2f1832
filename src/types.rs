//! Core data types for taskman.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Canonical text form of a due date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Task priority. Variants are declared low to high so the derived `Ord`
/// follows the rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Integer rank: LOW=1, MEDIUM=2, HIGH=3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// Coerce a raw rank into a priority.
    pub fn from_rank(rank: u8) -> Result<Self, ValidationError> {
        match rank {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(ValidationError::InvalidPriorityRank(other)),
        }
    }

    /// Upper-case name, as written to the backing file.
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    /// Case-insensitive name lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownPriority(s.to_string()))
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        Priority::from_rank(rank)
    }
}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Kept as given; never blank
    pub title: String,

    /// No time component; `None` means no deadline
    pub due_date: Option<NaiveDate>,

    pub priority: Priority,

    pub completed: bool,

    /// Freeform labels, kept in insertion order (duplicates allowed)
    pub tags: Vec<String>,
}

/// Validation errors for tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    InvalidDate(String),
    UnknownPriority(String),
    InvalidPriorityRank(u8),
    EmptyTag,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "title cannot be empty"),
            ValidationError::InvalidDate(input) => {
                write!(f, "invalid date '{}': date must be in YYYY-MM-DD form", input)
            }
            ValidationError::UnknownPriority(name) => {
                write!(f, "unknown priority '{}': must be one of LOW, MEDIUM, HIGH", name)
            }
            ValidationError::InvalidPriorityRank(rank) => {
                write!(f, "invalid priority rank {}: must be 1 (LOW), 2 (MEDIUM) or 3 (HIGH)", rank)
            }
            ValidationError::EmptyTag => write!(f, "tags cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a due date in exactly `YYYY-MM-DD` form: four-digit year, two-digit
/// month and day, no sign or surrounding whitespace.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(input.to_string());

    let shape_ok = input.len() == 10
        && input.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())
}

/// Check a title. Blank titles are rejected; others are kept verbatim.
pub(crate) fn normalize_title(title: &str) -> Result<String, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

/// Check a tag list. Blank tags are rejected; others are kept verbatim.
pub(crate) fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>, ValidationError> {
    tags.iter()
        .map(|tag| {
            let tag = tag.as_ref();
            if tag.trim().is_empty() {
                Err(ValidationError::EmptyTag)
            } else {
                Ok(tag.to_string())
            }
        })
        .collect()
}

impl Task {
    /// Build a validated task. New tasks are never completed.
    pub fn new<S: AsRef<str>>(
        title: &str,
        due_date: Option<&str>,
        priority: Priority,
        tags: &[S],
    ) -> Result<Self, ValidationError> {
        let title = normalize_title(title)?;
        let due_date = due_date.map(parse_due_date).transpose()?;
        let tags = normalize_tags(tags)?;

        Ok(Self {
            title,
            due_date,
            priority,
            completed: false,
            tags,
        })
    }

    /// Mark the task as done. Calling it twice is harmless.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Due date in canonical text form, if any.
    pub fn due_date_text(&self) -> Option<String> {
        self.due_date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Compare two tasks by schedule: dated before undated, earlier dates
    /// first, and higher priority first when dates tie (or both are absent).
    ///
    /// Only `due_date` and `priority` participate.
    pub fn schedule_cmp(&self, other: &Task) -> Ordering {
        match (self.due_date, other.due_date) {
            (None, None) => other.priority.cmp(&self.priority),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| other.priority.cmp(&self.priority)),
        }
    }

    /// Case-insensitive substring match against title, priority name,
    /// due date text, and tags. An empty query matches everything; any
    /// other query, whitespace included, is matched as given.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();

        self.title.to_lowercase().contains(&needle)
            || self.priority.name().to_lowercase().contains(&needle)
            || self.due_date_text().is_some_and(|d| d.contains(&needle))
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}, due {})",
            if self.completed { "x" } else { " " },
            self.title,
            self.priority,
            self.due_date_text().unwrap_or_else(|| "-".to_string())
        )?;
        if !self.tags.is_empty() {
            write!(f, " #{}", self.tags.join(" #"))?;
        }
        Ok(())
    }
}
