//! HTTP server wiring.
//!
//! Chooses the repository adapter from [`Settings`], builds the task router,
//! and serves it until Ctrl-C or `SIGTERM`.

use crate::{
    config::{DatabaseSettings, Settings},
    task::{
        adapters::{
            http::router,
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, TaskPgPool},
        },
        ports::TaskRepository,
        services::TaskService,
    },
};
use axum::Router;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use eyre::WrapErr;
use mockable::{Clock, DefaultClock};
use secrecy::ExposeSecret;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the full application router, including request tracing.
#[must_use]
pub fn app<R, C>(service: TaskService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    router(service).layer(TraceLayer::new_for_http())
}

/// Runs the server until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error when the connection pool cannot be created, the listener
/// cannot bind, or the server fails while running.
pub async fn run(settings: Settings) -> eyre::Result<()> {
    let addr = settings.socket_addr();
    let clock = Arc::new(DefaultClock);
    match settings.database {
        Some(database) => {
            let repository = PostgresTaskRepository::new(connect(&database)?);
            info!(pool_size = database.pool_size, "using PostgreSQL task storage");
            serve(TaskService::new(Arc::new(repository), clock), addr).await
        }
        None => {
            info!("no database configured, using in-memory task storage");
            let repository = InMemoryTaskRepository::new();
            serve(TaskService::new(Arc::new(repository), clock), addr).await
        }
    }
}

fn connect(database: &DatabaseSettings) -> eyre::Result<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database.url.expose_secret());
    Pool::builder()
        .max_size(database.pool_size)
        .build(manager)
        .wrap_err("failed to create PostgreSQL connection pool")
}

async fn serve<R, C>(service: TaskService<R, C>, addr: SocketAddr) -> eyre::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    info!(%addr, "task API listening");

    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server terminated unexpectedly")?;

    info!("task API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
