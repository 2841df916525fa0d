//! Repository port for task persistence and paged lookup.

use crate::task::domain::{Page, PageRequest, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations must order every page query deterministically, applying
/// the requested sort and breaking ties by ascending identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts the task when it has no identifier, assigning a new unique
    /// one, or overwrites the stored row with the same identifier.
    ///
    /// Returns the persisted representation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task carries an
    /// identifier with no stored row.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns one page of all tasks.
    async fn find_page(&self, request: &PageRequest) -> TaskRepositoryResult<Page<Task>>;

    /// Returns one page of the tasks with the given status. Only matching
    /// tasks are counted towards the page totals.
    async fn find_page_by_status(
        &self,
        request: &PageRequest,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Page<Task>>;

    /// Removes the task with the given identifier.
    ///
    /// Removing an absent task is a no-op.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
