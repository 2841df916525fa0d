//! Problem-details error responses for the task HTTP API.

use crate::task::{domain::TaskDomainError, services::TaskServiceError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const PROBLEM_TYPE: &str = "about:blank";
const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
const MALFORMED_BODY_DETAIL: &str = "Invalid request body. Check the format and values.";

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the rejected field.
    pub field: String,
    /// Reason the field was rejected.
    pub message: String,
}

/// RFC 7807 style error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Problem type URI.
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary of the problem kind.
    pub title: String,
    /// HTTP status code.
    pub status: u16,
    /// Explanation specific to this occurrence.
    pub detail: String,
    /// Path of the request that failed.
    pub instance: String,
    /// Per-field validation failures, present only for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ProblemDetails {
    fn new(status: StatusCode, title: &str, detail: impl Into<String>, instance: &str) -> Self {
        Self {
            problem_type: PROBLEM_TYPE.to_owned(),
            title: title.to_owned(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: instance.to_owned(),
            errors: None,
        }
    }

    fn validation(failures: &[TaskDomainError], instance: &str) -> Self {
        Self {
            errors: Some(
                failures
                    .iter()
                    .map(|err| FieldError {
                        field: err.field().to_owned(),
                        message: err.to_string(),
                    })
                    .collect(),
            ),
            ..Self::new(
                StatusCode::BAD_REQUEST,
                "Validation error",
                "Invalid request parameters. See errors for details.",
                instance,
            )
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(PROBLEM_CONTENT_TYPE),
            )],
            Json(self),
        )
            .into_response()
    }
}

/// Failures surfaced by the task HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A use case failed.
    #[error(transparent)]
    Service(#[from] TaskServiceError),
    /// A request value could not be decoded into a domain value.
    #[error(transparent)]
    InvalidArgument(#[from] TaskDomainError),
    /// The request could not be parsed at all.
    #[error("{0}")]
    MalformedInput(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(reason = %rejection.body_text(), "rejected request body");
        Self::MalformedInput(MALFORMED_BODY_DETAIL.to_owned())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedInput(rejection.body_text())
    }
}

impl ApiError {
    /// Renders the error as a problem-details body for the request path.
    #[must_use]
    pub fn into_problem(self, instance: &str) -> ProblemDetails {
        match self {
            Self::Service(TaskServiceError::NotFound(id)) => ProblemDetails::new(
                StatusCode::NOT_FOUND,
                "Task not found",
                format!("Task with id {id} was not found"),
                instance,
            ),
            Self::Service(TaskServiceError::InvalidArgument(failures)) => {
                ProblemDetails::validation(&failures, instance)
            }
            Self::InvalidArgument(err) => {
                ProblemDetails::validation(std::slice::from_ref(&err), instance)
            }
            Self::Service(TaskServiceError::Repository(err)) => {
                error!(error = %err, instance, "task repository failure");
                ProblemDetails::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "An unexpected error occurred",
                    instance,
                )
            }
            Self::MalformedInput(detail) => {
                ProblemDetails::new(StatusCode::BAD_REQUEST, "Bad request", detail, instance)
            }
        }
    }
}
