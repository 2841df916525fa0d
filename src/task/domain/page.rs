//! Pagination requests and result pages for task listings.

use super::TaskDomainError;
use std::fmt;

/// Direction applied to a sort property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    Asc,
    /// Largest values first.
    Desc,
}

impl SortDirection {
    /// Returns the canonical query-string spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Task properties a listing can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskSortField {
    /// Storage-assigned identifier.
    #[default]
    Id,
    /// Task title.
    Title,
    /// Storage representation of the status.
    Status,
    /// Creation timestamp.
    CreatedAt,
    /// Last modification timestamp.
    UpdatedAt,
}

impl TaskSortField {
    /// Returns the external property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Status => "status",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

impl TryFrom<&str> for TaskSortField {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(TaskDomainError::InvalidSort(value.to_owned())),
        }
    }
}

/// Ordering requested for a task listing.
///
/// Ties are always broken by ascending identifier so that consecutive pages
/// of one query never overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskSort {
    /// Property to order by.
    pub field: TaskSortField,
    /// Ordering direction.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(field: TaskSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parses a `property[,direction]` expression such as `createdAt,desc`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidSort`] for unknown properties,
    /// unknown directions, or extra segments.
    pub fn parse(expression: &str) -> Result<Self, TaskDomainError> {
        let invalid = || TaskDomainError::InvalidSort(expression.to_owned());
        let mut segments = expression.split(',');
        let field = segments
            .next()
            .ok_or_else(invalid)
            .and_then(|name| TaskSortField::try_from(name).map_err(|_| invalid()))?;
        let direction = match segments.next().map(|raw| raw.trim().to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(raw) if raw == "asc" => SortDirection::Asc,
            Some(raw) if raw == "desc" => SortDirection::Desc,
            Some(_) => return Err(invalid()),
        };
        if segments.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(field, direction))
    }
}

impl fmt::Display for TaskSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field.as_str(), self.direction.as_str())
    }
}

/// Zero-based page selection with an optional ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    size: u64,
    sort: Option<TaskSort>,
}

impl PageRequest {
    /// Page size used when a caller does not ask for one.
    pub const DEFAULT_SIZE: u64 = 20;
    /// Largest accepted page size.
    pub const MAX_SIZE: u64 = 2000;

    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageSize`] when `size` is zero or
    /// larger than [`PageRequest::MAX_SIZE`].
    pub const fn new(page: u64, size: u64) -> Result<Self, TaskDomainError> {
        if size == 0 || size > Self::MAX_SIZE {
            return Err(TaskDomainError::InvalidPageSize {
                size,
                max: Self::MAX_SIZE,
            });
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    /// Creates a page request from caller-supplied values without failing.
    ///
    /// A zero size falls back to [`PageRequest::DEFAULT_SIZE`]; sizes above
    /// [`PageRequest::MAX_SIZE`] are capped.
    #[must_use]
    pub const fn clamped(page: u64, size: u64) -> Self {
        let size = if size == 0 {
            Self::DEFAULT_SIZE
        } else if size > Self::MAX_SIZE {
            Self::MAX_SIZE
        } else {
            size
        };
        Self {
            page,
            size,
            sort: None,
        }
    }

    /// Sets the requested ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: TaskSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the requested ordering, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<TaskSort> {
        self.sort
    }

    /// Returns the number of elements preceding this page, saturating at
    /// `u64::MAX`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
            sort: None,
        }
    }
}

/// One page of an ordered result set plus the counts of the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    number: u64,
    size: u64,
    total_elements: u64,
}

impl<T> Page<T> {
    /// Creates a page for `request` holding `content` out of
    /// `total_elements` matching elements.
    #[must_use]
    pub const fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page(),
            size: request.size(),
            total_elements,
        }
    }

    /// Returns the elements of this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the page and returns its elements.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the number of elements matching the query across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Returns the number of pages needed to hold every matching element.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    /// Returns whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == 0
    }

    /// Returns whether no page follows this one.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages()
    }

    /// Transforms the elements while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
