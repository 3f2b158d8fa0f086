//! Core Task type and status enumeration.
//!
//! # Invariants
//! - `id` is unique and immutable once assigned by the repository
//! - `title` is never empty after creation or update
//! - `created_at <= updated_at`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TaskError;

/// Lifecycle status of a task.
///
/// Serialized with the variant names verbatim (`"Pending"`, `"InProgress"`,
/// ...) — the same strings accepted by the `?status=` query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(TaskStatus::Pending),
            "InProgress" => Ok(TaskStatus::InProgress),
            "Completed" => Ok(TaskStatus::Completed),
            "Cancelled" => Ok(TaskStatus::Cancelled),
            other => Err(TaskError::validation(format!("invalid status: {}", other))),
        }
    }
}

/// A unit of work tracked by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the repository on creation, starting at 1
    pub id: i64,

    /// Short summary of the work
    pub title: String,

    /// Free-form details; empty means "no description"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Set by the repository when the task is stored
    pub created_at: DateTime<Utc>,

    /// Refreshed by the repository on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build an unsaved task. The repository assigns `id` and the
    /// authoritative timestamps when the task is stored.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            status,
            created_at: now,
            updated_at: now,
        }
    }
}
