//! Axum handlers for the task HTTP API.
//!
//! Each handler decodes the request, calls one use case, and renders either
//! the result or a [`ProblemDetails`] body tagged with the request path.

use super::{
    dto::{CreateTaskBody, ListTasksQuery, PageResponse, TaskResponse, UpdateTaskBody},
    problem::{ApiError, ProblemDetails},
};
use crate::task::{domain::TaskId, ports::TaskRepository, services::TaskService};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
};
use mockable::Clock;

type ApiResult<T> = Result<T, ApiError>;

/// `POST /tasks`
pub async fn create_task<R, C>(
    State(service): State<TaskService<R, C>>,
    uri: Uri,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ProblemDetails>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    create(&service, body)
        .await
        .map(|task| (StatusCode::CREATED, Json(task)))
        .map_err(|err| err.into_problem(uri.path()))
}

/// `GET /tasks`
pub async fn list_tasks<R, C>(
    State(service): State<TaskService<R, C>>,
    uri: Uri,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<PageResponse<TaskResponse>>, ProblemDetails>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    list(&service, query)
        .await
        .map(Json)
        .map_err(|err| err.into_problem(uri.path()))
}

/// `GET /tasks/{id}`
pub async fn get_task<R, C>(
    State(service): State<TaskService<R, C>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TaskResponse>, ProblemDetails>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    get(&service, id)
        .await
        .map(Json)
        .map_err(|err| err.into_problem(uri.path()))
}

/// `PUT /tasks/{id}`
pub async fn update_task<R, C>(
    State(service): State<TaskService<R, C>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskResponse>, ProblemDetails>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    update(&service, id, body)
        .await
        .map(Json)
        .map_err(|err| err.into_problem(uri.path()))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task<R, C>(
    State(service): State<TaskService<R, C>>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ProblemDetails>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    delete(&service, id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(|err| err.into_problem(uri.path()))
}

async fn create<R, C>(
    service: &TaskService<R, C>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Json(payload) = body?;
    let request = payload.into_request()?;
    let task = service.create(request).await?;
    Ok(TaskResponse::from(&task))
}

async fn list<R, C>(
    service: &TaskService<R, C>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> ApiResult<PageResponse<TaskResponse>>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Query(params) = query?;
    let page_request = params.page_request()?;
    let status = params.status_filter()?;
    let page = service.list(&page_request, status).await?;
    Ok(PageResponse::from(page.map(|task| TaskResponse::from(&task))))
}

async fn get<R, C>(
    service: &TaskService<R, C>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Path(raw_id) = id?;
    let task = service.get(TaskId::new(raw_id)).await?;
    Ok(TaskResponse::from(&task))
}

async fn update<R, C>(
    service: &TaskService<R, C>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<TaskResponse>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Path(raw_id) = id?;
    let Json(payload) = body?;
    let request = payload.into_request(TaskId::new(raw_id))?;
    let task = service.update(request).await?;
    Ok(TaskResponse::from(&task))
}

async fn delete<R, C>(
    service: &TaskService<R, C>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let Path(raw_id) = id?;
    service.delete(TaskId::new(raw_id)).await?;
    Ok(())
}
