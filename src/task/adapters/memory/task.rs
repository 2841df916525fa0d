//! In-memory repository for task management tests and local runs.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Page, PageRequest, SortDirection, Task, TaskId, TaskSort, TaskSortField, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned from a counter starting at 1 and are never
/// reused, even after deletion.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Compares two tasks by the requested property, then by identifier.
fn compare_tasks(left: &Task, right: &Task, sort: TaskSort) -> Ordering {
    let by_field = match sort.field {
        TaskSortField::Id => Ordering::Equal,
        TaskSortField::Title => left.title().as_str().cmp(right.title().as_str()),
        TaskSortField::Status => left
            .status()
            .storage_name()
            .cmp(right.status().storage_name()),
        TaskSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        TaskSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    };
    let by_id = left.id().cmp(&right.id());
    match sort.direction {
        SortDirection::Asc => by_field.then(by_id),
        SortDirection::Desc if sort.field == TaskSortField::Id => by_id.reverse(),
        SortDirection::Desc => by_field.reverse().then(by_id),
    }
}

/// Sorts the matching tasks and cuts out the requested page.
fn paginate<'a>(
    matching: impl Iterator<Item = &'a Task>,
    request: &PageRequest,
) -> Page<Task> {
    let mut tasks: Vec<&Task> = matching.collect();
    let sort = request.sort().unwrap_or_default();
    tasks.sort_by(|left, right| compare_tasks(left, right, sort));

    let total_elements = u64::try_from(tasks.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
    let content = tasks
        .into_iter()
        .skip(offset)
        .take(size)
        .cloned()
        .collect();
    Page::new(content, request, total_elements)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let (id, persisted) = match task.id() {
            Some(id) => {
                if !state.tasks.contains_key(&id) {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                (id, task.clone())
            }
            None => {
                state.last_id += 1;
                let id = TaskId::new(state.last_id);
                (id, task.persisted_as(id))
            }
        };
        state.tasks.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_page(&self, request: &PageRequest) -> TaskRepositoryResult<Page<Task>> {
        let state = self.read()?;
        Ok(paginate(state.tasks.values(), request))
    }

    async fn find_page_by_status(
        &self,
        request: &PageRequest,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.read()?;
        let matching = state
            .tasks
            .values()
            .filter(|task| task.status() == status);
        Ok(paginate(matching, request))
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.tasks.remove(&id);
        Ok(())
    }
}
