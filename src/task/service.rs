//! Business rules between the HTTP layer and the repository.

use super::error::TaskError;
use super::model::{Task, TaskStatus};
use super::repo::{ListFilter, ListPage, RepositoryRef};

/// Default page size when the caller supplies none (or zero).
const DEFAULT_PAGE_SIZE: usize = 10;

/// Partial update of a task. `None` leaves the stored field unchanged; a
/// present empty description clears it. A present title must be non-empty
/// after trimming.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Validates and orchestrates repository calls.
#[derive(Clone)]
pub struct TaskService {
    repo: RepositoryRef,
}

impl TaskService {
    pub fn new(repo: RepositoryRef) -> Self {
        Self { repo }
    }

    /// Create a task with status forced to `Pending`. Returns the persisted
    /// copy, re-fetched so it reflects the assigned id and timestamps.
    pub async fn create_task(&self, title: &str, description: &str) -> Result<Task, TaskError> {
        if title.trim().is_empty() {
            return Err(TaskError::validation("title required"));
        }
        let id = self
            .repo
            .create(Task::new(title, description, TaskStatus::Pending))
            .await?;
        self.repo.get(id).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, TaskError> {
        self.repo.get(id).await
    }

    /// Apply a partial update. Unset patch fields keep the stored value.
    pub async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Task, TaskError> {
        let mut task = self.repo.get(id).await?;

        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(TaskError::validation("title cannot be empty"));
            }
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }

        self.repo.update(task).await?;
        self.repo.get(id).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
        self.repo.delete(id).await
    }

    /// List one page of tasks. `page` is normalized to at least 1 and a zero
    /// `size` falls back to the default, so the offset is always well formed.
    pub async fn list_tasks(
        &self,
        page: usize,
        size: usize,
        status: Option<TaskStatus>,
    ) -> Result<ListPage, TaskError> {
        let page = page.max(1);
        let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        let filter = ListFilter {
            status,
            offset: (page - 1) * size,
            limit: size,
        };
        self.repo.list(filter).await
    }
}
