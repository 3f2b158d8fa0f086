//! Task repository: storage contract and the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::error::TaskError;
use super::model::{Task, TaskStatus};

/// Shared handle to a repository implementation.
pub type RepositoryRef = Arc<dyn TaskRepository>;

/// Status filter plus pagination window for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<TaskStatus>,
    pub offset: usize,
    pub limit: usize,
}

/// One page of results plus the total match count before pagination.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub tasks: Vec<Task>,
    pub total: usize,
}

/// Storage contract for task records.
///
/// The in-memory implementation below is the only one in this crate; a
/// durable variant (database-backed) would implement the same trait.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task. Assigns the next sequential id and the
    /// creation/update timestamps, returning the assigned id.
    async fn create(&self, task: Task) -> Result<i64, TaskError>;

    /// Fetch a copy of the task with the given id.
    async fn get(&self, id: i64) -> Result<Task, TaskError>;

    /// Overwrite title, description, and status of an existing task and
    /// refresh its `updated_at`. `id` and `created_at` are never modified.
    async fn update(&self, task: Task) -> Result<(), TaskError>;

    /// Remove the task with the given id.
    async fn delete(&self, id: i64) -> Result<(), TaskError>;

    /// List tasks matching the filter, ordered by ascending id. `total` is
    /// counted before the offset/limit window is applied; an out-of-range
    /// offset yields an empty page, not an error.
    async fn list(&self, filter: ListFilter) -> Result<ListPage, TaskError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: HashMap<i64, Task>,
    next_id: i64,
}

/// Thread-safe in-memory repository.
///
/// A single collection-wide read-write lock guards the task map; reads take
/// the shared lock, writes the exclusive lock. The critical section is the
/// map access plus clone only. `next_id` advances under the same write lock
/// as the insert, so concurrent creates never observe duplicate ids.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryRepository {
    async fn create(&self, mut task: Task) -> Result<i64, TaskError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();
        task.id = id;
        task.created_at = now;
        task.updated_at = now;
        state.tasks.insert(id, task);
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Task, TaskError> {
        let state = self.state.read().await;
        state.tasks.get(&id).cloned().ok_or(TaskError::NotFound(id))
    }

    async fn update(&self, task: Task) -> Result<(), TaskError> {
        let mut state = self.state.write().await;
        let existing = state
            .tasks
            .get_mut(&task.id)
            .ok_or(TaskError::NotFound(task.id))?;
        existing.title = task.title;
        existing.description = task.description;
        existing.status = task.status;
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), TaskError> {
        let mut state = self.state.write().await;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskError::NotFound(id))
    }

    async fn list(&self, filter: ListFilter) -> Result<ListPage, TaskError> {
        let state = self.state.read().await;
        let mut matches: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        // Ids are monotonic, so ascending id is insertion order.
        matches.sort_by_key(|t| t.id);

        let total = matches.len();
        let start = filter.offset.min(total);
        let end = (start + filter.limit).min(total);

        Ok(ListPage {
            tasks: matches[start..end].to_vec(),
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(title: &str) -> Task {
        Task::new(title, "", TaskStatus::Pending)
    }

    #[tokio::test]
    async fn test_create_assigns_monotonic_ids() {
        let repo = MemoryRepository::new();
        let first = repo.create(pending("one")).await.unwrap();
        let second = repo.create(pending("two")).await.unwrap();
        let third = repo.create(pending("three")).await.unwrap();
        assert_eq!(first, 1);
        assert!(second > first);
        assert!(third > second);
    }

    #[tokio::test]
    async fn test_concurrent_creates_yield_distinct_ids() {
        let repo = Arc::new(MemoryRepository::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.create(pending(&format!("task {}", i))).await.unwrap()
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let repo = MemoryRepository::new();
        let id = repo
            .create(Task::new("Buy milk", "two liters", TaskStatus::Pending))
            .await
            .unwrap();

        let task = repo.get(id).await.unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "two liters");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[tokio::test]
    async fn test_get_is_a_copy() {
        let repo = MemoryRepository::new();
        let id = repo.create(pending("original")).await.unwrap();

        let mut copy = repo.get(id).await.unwrap();
        copy.title = "mutated".to_string();

        assert_eq!(repo.get(id).await.unwrap().title, "original");
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let repo = MemoryRepository::new();
        assert!(matches!(
            repo.get(42).await,
            Err(TaskError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let repo = MemoryRepository::new();
        let id = repo.create(pending("draft")).await.unwrap();
        let before = repo.get(id).await.unwrap();

        let mut changed = before.clone();
        changed.title = "final".to_string();
        changed.status = TaskStatus::Completed;
        repo.update(changed).await.unwrap();

        let after = repo.get(id).await.unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.title, "final");
        assert_eq!(after.status, TaskStatus::Completed);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = MemoryRepository::new();
        let mut ghost = pending("ghost");
        ghost.id = 7;
        assert!(matches!(
            repo.update(ghost).await,
            Err(TaskError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_task() {
        let repo = MemoryRepository::new();
        let id = repo.create(pending("ephemeral")).await.unwrap();
        repo.delete(id).await.unwrap();
        assert!(matches!(repo.get(id).await, Err(TaskError::NotFound(_))));
        assert!(matches!(
            repo.delete(id).await,
            Err(TaskError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let repo = MemoryRepository::new();
        repo.create(Task::new("a", "", TaskStatus::Pending))
            .await
            .unwrap();
        repo.create(Task::new("b", "", TaskStatus::Completed))
            .await
            .unwrap();
        repo.create(Task::new("c", "", TaskStatus::Completed))
            .await
            .unwrap();

        let page = repo
            .list(ListFilter {
                status: Some(TaskStatus::Completed),
                offset: 0,
                limit: 10,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert!(page.tasks.iter().all(|t| t.status == TaskStatus::Completed));
    }

    #[tokio::test]
    async fn test_list_pagination_window() {
        let repo = MemoryRepository::new();
        for i in 0..5 {
            repo.create(pending(&format!("task {}", i))).await.unwrap();
        }

        let page = repo
            .list(ListFilter {
                status: None,
                offset: 2,
                limit: 2,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.tasks.len(), 2);
        assert_eq!(page.tasks[0].id, 3);
        assert_eq!(page.tasks[1].id, 4);
    }

    #[tokio::test]
    async fn test_list_offset_past_end_is_empty() {
        let repo = MemoryRepository::new();
        repo.create(pending("only")).await.unwrap();

        let page = repo
            .list(ListFilter {
                status: None,
                offset: 10,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_stable() {
        let repo = MemoryRepository::new();
        for i in 0..4 {
            repo.create(pending(&format!("task {}", i))).await.unwrap();
        }

        let filter = ListFilter {
            status: None,
            offset: 0,
            limit: 10,
        };
        let first = repo.list(filter.clone()).await.unwrap();
        let second = repo.list(filter).await.unwrap();
        let ids: Vec<i64> = first.tasks.iter().map(|t| t.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            ids,
            second.tasks.iter().map(|t| t.id).collect::<Vec<_>>()
        );
    }
}
