//! Service layer for task creation, lookup, listing, update, and removal.

use crate::task::{
    domain::{
        Page, PageRequest, Task, TaskChanges, TaskDescription, TaskDomainError, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status. Defaults to [`TaskStatus::Pending`].
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for a partial task update.
///
/// Fields left unset keep their stored value; a set field replaces it, even
/// with an empty description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing but the modification time.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the identifier of the task to update.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Validates every provided field, reporting all failures together.
    fn into_changes(self) -> TaskServiceResult<TaskChanges> {
        let (title, description) = validate_fields(
            self.title.map(TaskTitle::new).transpose(),
            self.description.map(TaskDescription::new).transpose(),
        )?;
        Ok(TaskChanges {
            title,
            description,
            status: self.status,
        })
    }
}

/// Combines the title and description checks, keeping every failure in
/// field order.
fn validate_fields<T, D>(
    title: Result<T, TaskDomainError>,
    description: Result<D, TaskDomainError>,
) -> TaskServiceResult<(T, D)> {
    match (title, description) {
        (Ok(valid_title), Ok(valid_description)) => Ok((valid_title, valid_description)),
        (title_result, description_result) => Err(TaskServiceError::InvalidArgument(
            [title_result.err(), description_result.err()]
                .into_iter()
                .flatten()
                .collect(),
        )),
    }
}

fn describe_all(errors: &[TaskDomainError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task exists with the given identifier.
    #[error("Task with id {0} was not found")]
    NotFound(TaskId),
    /// Input validation failed; holds every rejected field in input order.
    #[error("{}", describe_all(.0))]
    InvalidArgument(Vec<TaskDomainError>),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl From<TaskDomainError> for TaskServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::InvalidArgument(vec![err])
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task use cases composed over a repository and a clock.
///
/// Read-modify-write sequences (update) and check-then-delete sequences are
/// not wrapped in a transaction: concurrent updates of one task are
/// last-writer-wins.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    async fn find_task_or_error(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    async fn save(&self, task: &Task) -> TaskServiceResult<Task> {
        self.repository.save(task).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(id) => TaskServiceError::NotFound(id),
            other @ TaskRepositoryError::Persistence(_) => TaskServiceError::Repository(other),
        })
    }

    /// Creates and persists a new task.
    ///
    /// The status defaults to [`TaskStatus::Pending`] when not provided.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] listing every invalid
    /// field when the title or description is invalid, or [`TaskServiceError::Repository`] when
    /// persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            status,
        } = request;
        let (validated_title, validated_description) = validate_fields(
            TaskTitle::new(title),
            description.map(TaskDescription::new).transpose(),
        )?;
        let task = Task::new(
            validated_title,
            validated_description,
            status.unwrap_or(TaskStatus::Pending),
            &*self.clock,
        );
        self.save(&task).await
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given
    /// identifier, or [`TaskServiceError::Repository`] when lookup fails.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.find_task_or_error(id).await
    }

    /// Lists one page of tasks, optionally restricted to a status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the page query fails.
    pub async fn list(
        &self,
        request: &PageRequest,
        status: Option<TaskStatus>,
    ) -> TaskServiceResult<Page<Task>> {
        let page = match status {
            Some(filter) => self.repository.find_page_by_status(request, filter).await?,
            None => self.repository.find_page(request).await?,
        };
        Ok(page)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Every provided field is validated before anything changes; the
    /// modification timestamp is refreshed even when no field is provided.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given
    /// identifier, [`TaskServiceError::InvalidArgument`] when a provided
    /// field is invalid, or [`TaskServiceError::Repository`] when
    /// persistence fails.
    pub async fn update(&self, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self.find_task_or_error(request.id()).await?;
        let changes = request.into_changes()?;
        task.apply(changes, &*self.clock);
        self.save(&task).await
    }

    /// Deletes an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given
    /// identifier, or [`TaskServiceError::Repository`] when lookup or
    /// removal fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        self.find_task_or_error(id).await?;
        self.repository.delete_by_id(id).await?;
        Ok(())
    }
}
