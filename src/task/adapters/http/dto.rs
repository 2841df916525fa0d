//! Request and response bodies of the task HTTP API.

use crate::task::{
    domain::{Page, PageRequest, Task, TaskDomainError, TaskId, TaskSort, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Wire format of task timestamps: ISO-8601, UTC, second precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn serialize_utc_seconds<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
}

/// Decodes an optional external status spelling. Only a missing or `null`
/// field counts as absent; an empty string is an invalid status.
fn decode_status(raw: Option<&str>) -> Result<Option<TaskStatus>, TaskDomainError> {
    raw.map(TaskStatus::try_from).transpose()
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateTaskBody {
    /// Task title. A missing title is treated as blank.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional external status spelling.
    pub status: Option<String>,
}

impl CreateTaskBody {
    /// Decodes the body into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatus`] when the status spelling is
    /// unknown.
    pub fn into_request(self) -> Result<CreateTaskRequest, TaskDomainError> {
        let status = decode_status(self.status.as_deref())?;
        let mut request = CreateTaskRequest::new(self.title);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(initial_status) = status {
            request = request.with_status(initial_status);
        }
        Ok(request)
    }
}

/// Body of `PUT /tasks/{id}`. Missing or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description; an empty string clears the text.
    pub description: Option<String>,
    /// Replacement external status spelling.
    pub status: Option<String>,
}

impl UpdateTaskBody {
    /// Decodes the body into a service request for the given task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatus`] when the status spelling is
    /// unknown.
    pub fn into_request(self, id: TaskId) -> Result<UpdateTaskRequest, TaskDomainError> {
        let status = decode_status(self.status.as_deref())?;
        let mut request = UpdateTaskRequest::new(id);
        if let Some(title) = self.title {
            request = request.with_title(title);
        }
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(new_status) = status {
            request = request.with_status(new_status);
        }
        Ok(request)
    }
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    /// Zero-based page index.
    pub page: Option<u64>,
    /// Page size.
    pub size: Option<u64>,
    /// External status spelling to filter by.
    pub status: Option<String>,
    /// Sort expression such as `createdAt,desc`.
    pub sort: Option<String>,
}

impl ListTasksQuery {
    /// Builds the page request, falling back to page 0 and the default size.
    /// Out-of-range sizes are clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidSort`] for unknown sort expressions.
    pub fn page_request(&self) -> Result<PageRequest, TaskDomainError> {
        let request = PageRequest::clamped(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        );
        match self.sort.as_deref().filter(|value| !value.trim().is_empty()) {
            Some(expression) => Ok(request.with_sort(TaskSort::parse(expression)?)),
            None => Ok(request),
        }
    }

    /// Decodes the optional status filter. An empty `status=` parameter
    /// means no filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatus`] when the spelling is
    /// unknown.
    pub fn status_filter(&self) -> Result<Option<TaskStatus>, TaskDomainError> {
        decode_status(
            self.status
                .as_deref()
                .filter(|value| !value.trim().is_empty()),
        )
    }
}

/// External representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Storage-assigned identifier.
    pub id: Option<TaskId>,
    /// Task title.
    pub title: String,
    /// Task description, `null` when never set.
    pub description: Option<String>,
    /// Status in its external spelling.
    pub status: TaskStatus,
    /// Creation timestamp.
    #[serde(serialize_with = "serialize_utc_seconds")]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    #[serde(serialize_with = "serialize_utc_seconds")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(|value| value.as_str().to_owned()),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// External representation of one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Elements of the page.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u64,
    /// Requested page size.
    pub size: u64,
    /// Number of matching elements across all pages.
    pub total_elements: u64,
    /// Number of pages holding the matching elements.
    pub total_pages: u64,
    /// Number of elements on this page.
    pub number_of_elements: usize,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether no page follows this one.
    pub last: bool,
    /// Whether this page holds no elements.
    pub empty: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let number = page.number();
        let size = page.size();
        let total_elements = page.total_elements();
        let total_pages = page.total_pages();
        let first = page.is_first();
        let last = page.is_last();
        let content = page.into_content();
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number,
            size,
            total_elements,
            total_pages,
            first,
            last,
        }
    }
}
