//! Shared world state for task management BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklist::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Page, Task, TaskId},
    services::{TaskService, TaskServiceError},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task management behaviour tests.
pub struct TaskWorld {
    pub service: TestTaskService,
    pub current_task: Option<TaskId>,
    pub last_create_result: Option<Result<Task, TaskServiceError>>,
    pub last_update_result: Option<Result<Task, TaskServiceError>>,
    pub last_delete_result: Option<Result<(), TaskServiceError>>,
    pub last_page: Option<Page<Task>>,
}

impl TaskWorld {
    /// Creates a world backed by an empty repository.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            current_task: None,
            last_create_result: None,
            last_update_result: None,
            last_delete_result: None,
            last_page: None,
        }
    }

    /// Returns the identifier of the task the scenario is working on.
    pub fn current_task(&self) -> Result<TaskId, eyre::Report> {
        self.current_task
            .ok_or_else(|| eyre::eyre!("no task selected in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
