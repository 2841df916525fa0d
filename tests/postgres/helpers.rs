//! Shared helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster};
use super::cluster::shared_cluster;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::atomic::{AtomicU64, Ordering};
use tasklist::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{Task, TaskDescription, TaskStatus, TaskTitle},
};
use tokio::runtime::Runtime;

/// DDL of the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_tasks/up.sql");

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "tasklist_test_template";

static DATABASE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Builds a multi-threaded runtime for driving async repository calls from
/// synchronous tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_TASKS_SQL)
        .map_err(|err| Box::new(err) as BoxError)
}

/// Drops its database when dropped.
pub struct CleanupGuard {
    cluster: PostgresCluster,
    db_name: String,
}

impl CleanupGuard {
    /// Guards the named database on the given cluster.
    #[must_use]
    pub const fn new(cluster: PostgresCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.db_name));
    }
}

/// Repository over a fresh database cloned from the template.
///
/// Fields drop in order, so the pool closes before the database is dropped.
pub struct RepositoryContext {
    /// Repository under test.
    pub repository: PostgresTaskRepository,
    /// Runtime driving the async repository calls.
    pub rt: Runtime,
    /// Connection URL of the test database.
    pub url: String,
    _guard: CleanupGuard,
}

/// Creates a fresh database from the template and a repository over it.
///
/// # Errors
///
/// Returns an error if the cluster is unavailable or database setup fails.
pub fn setup_repository(cluster: PostgresCluster) -> Result<RepositoryContext, BoxError> {
    ensure_template(cluster)?;
    let db_name = format!(
        "tasklist_test_{}_{}",
        std::process::id(),
        DATABASE_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    cluster.create_database_from_template(&db_name, TEMPLATE_DB)?;
    let guard = CleanupGuard::new(cluster, db_name.clone());

    let url = cluster.database_url(&db_name);
    let manager = ConnectionManager::<PgConnection>::new(url.clone());
    let pool: TaskPgPool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(RepositoryContext {
        repository: PostgresTaskRepository::new(pool),
        rt: test_runtime()?,
        url,
        _guard: guard,
    })
}

/// Provides a repository over an isolated database on the shared cluster.
#[fixture]
pub fn repository_context() -> Result<RepositoryContext, BoxError> {
    setup_repository(shared_cluster()?)
}

/// Builds an unsaved task stamped with the system clock.
///
/// # Errors
///
/// Returns an error if the title or description is invalid.
pub fn new_task(
    title: &str,
    description: Option<&str>,
    status: TaskStatus,
) -> Result<Task, BoxError> {
    let task_description = description
        .map(TaskDescription::new)
        .transpose()
        .map_err(|err| Box::new(err) as BoxError)?;
    let task_title = TaskTitle::new(title).map_err(|err| Box::new(err) as BoxError)?;
    Ok(Task::new(task_title, task_description, status, &DefaultClock))
}
