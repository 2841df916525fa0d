//! Domain model for task management.
//!
//! The task domain owns the entity invariants (validated title and
//! description, the closed status enumeration, monotonic timestamps) and the
//! pagination model, while keeping all infrastructure concerns outside of
//! the domain boundary.

mod error;
mod fields;
mod ids;
mod page;
mod status;
mod task;

pub use error::TaskDomainError;
pub use fields::{TaskDescription, TaskTitle};
pub use ids::TaskId;
pub use page::{Page, PageRequest, SortDirection, TaskSort, TaskSortField};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskChanges};
