//! HTTP adapter exposing the task use cases as a JSON API.
//!
//! Statuses travel in their external spelling, timestamps as second-precision
//! UTC strings, and every failure as a problem-details body.

mod dto;
mod handlers;
mod problem;
mod routes;

pub use dto::{CreateTaskBody, ListTasksQuery, PageResponse, TaskResponse, UpdateTaskBody};
pub use problem::{ApiError, FieldError, ProblemDetails};
pub use routes::router;
