//! Route table for the task HTTP API.

use super::handlers::{create_task, delete_task, get_task, list_tasks, update_task};
use crate::task::{ports::TaskRepository, services::TaskService};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;

/// Builds the task API router over the given service.
///
/// | Method | Path          | Use case |
/// |--------|---------------|----------|
/// | POST   | `/tasks`      | create   |
/// | GET    | `/tasks`      | list     |
/// | GET    | `/tasks/{id}` | get      |
/// | PUT    | `/tasks/{id}` | update   |
/// | DELETE | `/tasks/{id}` | delete   |
#[must_use]
pub fn router<R, C>(service: TaskService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/tasks", post(create_task::<R, C>).get(list_tasks::<R, C>))
        .route(
            "/tasks/{id}",
            get(get_task::<R, C>)
                .put(update_task::<R, C>)
                .delete(delete_task::<R, C>),
        )
        .with_state(service)
}
