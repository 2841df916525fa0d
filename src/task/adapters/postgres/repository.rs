//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        Page, PageRequest, PersistedTaskData, SortDirection, Task, TaskDescription, TaskId,
        TaskSort, TaskSortField, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        match task.id() {
            None => {
                let new_row = to_new_row(task);
                self.run_blocking(move |connection| {
                    let row = diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(connection)
                        .map_err(TaskRepositoryError::persistence)?;
                    debug!(task_id = row.id, "inserted task row");
                    row_to_task(row)
                })
                .await
            }
            Some(id) => {
                let changeset = to_changeset(task);
                self.run_blocking(move |connection| {
                    let row = diesel::update(tasks::table.find(id.value()))
                        .set(&changeset)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(connection)
                        .optional()
                        .map_err(TaskRepositoryError::persistence)?
                        .ok_or(TaskRepositoryError::NotFound(id))?;
                    debug!(task_id = row.id, "updated task row");
                    row_to_task(row)
                })
                .await
            }
        }
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_page(&self, request: &PageRequest) -> TaskRepositoryResult<Page<Task>> {
        let page_request = *request;
        self.run_blocking(move |connection| load_page(connection, &page_request, None))
            .await
    }

    async fn find_page_by_status(
        &self,
        request: &PageRequest,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Page<Task>> {
        let page_request = *request;
        self.run_blocking(move |connection| load_page(connection, &page_request, Some(status)))
            .await
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            debug!(task_id = id.value(), deleted, "deleted task rows");
            Ok(())
        })
        .await
    }
}

/// Counts the matching rows and loads the requested window of them.
///
/// Both queries share the same status filter and run in one transaction so
/// the totals describe the returned content.
fn load_page(
    connection: &mut PgConnection,
    request: &PageRequest,
    status: Option<TaskStatus>,
) -> TaskRepositoryResult<Page<Task>> {
    let limit = i64::try_from(request.size()).map_err(TaskRepositoryError::persistence)?;
    let offset = i64::try_from(request.offset()).map_err(TaskRepositoryError::persistence)?;
    let sort = request.sort().unwrap_or_default();

    let (total, rows) = connection
        .transaction::<_, diesel::result::Error, _>(|tx_conn| {
            let total = match status {
                Some(filter) => tasks::table
                    .filter(tasks::status.eq(filter.storage_name()))
                    .count()
                    .get_result::<i64>(tx_conn)?,
                None => tasks::table.count().get_result::<i64>(tx_conn)?,
            };

            let mut query = tasks::table.into_boxed::<Pg>();
            if let Some(filter) = status {
                query = query.filter(tasks::status.eq(filter.storage_name()));
            }
            let rows = order_by(query, sort)
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(tx_conn)?;
            Ok((total, rows))
        })
        .map_err(TaskRepositoryError::persistence)?;

    let content = rows
        .into_iter()
        .map(row_to_task)
        .collect::<TaskRepositoryResult<Vec<_>>>()?;
    let total_elements = u64::try_from(total).map_err(TaskRepositoryError::persistence)?;
    Ok(Page::new(content, request, total_elements))
}

/// Applies the requested ordering followed by the identifier tie-break.
fn order_by(
    query: tasks::BoxedQuery<'static, Pg>,
    sort: TaskSort,
) -> tasks::BoxedQuery<'static, Pg> {
    match (sort.field, sort.direction) {
        (TaskSortField::Id, SortDirection::Asc) => query.order_by(tasks::id.asc()),
        (TaskSortField::Id, SortDirection::Desc) => query.order_by(tasks::id.desc()),
        (TaskSortField::Title, SortDirection::Asc) => query
            .order_by(tasks::title.asc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::Title, SortDirection::Desc) => query
            .order_by(tasks::title.desc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::Status, SortDirection::Asc) => query
            .order_by(tasks::status.asc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::Status, SortDirection::Desc) => query
            .order_by(tasks::status.desc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::CreatedAt, SortDirection::Asc) => query
            .order_by(tasks::created_at.asc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::CreatedAt, SortDirection::Desc) => query
            .order_by(tasks::created_at.desc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::UpdatedAt, SortDirection::Asc) => query
            .order_by(tasks::updated_at.asc())
            .then_order_by(tasks::id.asc()),
        (TaskSortField::UpdatedAt, SortDirection::Desc) => query
            .order_by(tasks::updated_at.desc())
            .then_order_by(tasks::id.asc()),
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|value| value.as_str().to_owned()),
        status: task.status().storage_name().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(|value| value.as_str().to_owned()),
        status: task.status().storage_name().to_owned(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description: description
            .map(TaskDescription::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::from_storage(&status).map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
