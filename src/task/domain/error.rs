//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("Title must not be blank")]
    BlankTitle,

    /// The title exceeds the maximum length.
    #[error("Title must not exceed {max} characters")]
    TitleTooLong {
        /// Length of the rejected title in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The description exceeds the maximum length.
    #[error("Description must not exceed {max} characters")]
    DescriptionTooLong {
        /// Length of the rejected description in characters.
        length: usize,
        /// Maximum accepted length.
        max: usize,
    },

    /// The status representation is not one of the known values.
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    /// The requested page size is outside the accepted range.
    #[error("Page size must be between 1 and {max}, got {size}")]
    InvalidPageSize {
        /// Rejected page size.
        size: u64,
        /// Maximum accepted page size.
        max: u64,
    },

    /// The sort expression names an unknown property or direction.
    #[error("Invalid sort expression: {0}")]
    InvalidSort(String),
}

impl TaskDomainError {
    /// Returns the name of the input field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::InvalidStatus(_) => "status",
            Self::InvalidPageSize { .. } => "size",
            Self::InvalidSort(_) => "sort",
        }
    }
}
