//! Todo resource handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::instrument;

use crate::api::{ApiError, AppState, ErrorResponse};
use crate::db::{Database, Id, TodoRepository};
use crate::serializers::{SerializerError, TodoData, TodoSerializer};
use crate::validators::ValidationErrors;

/// Route ids that are not integers cannot match any todo.
fn parse_id(raw: &str) -> Result<Id, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// List all todos
#[utoipa::path(
    get,
    path = "/todos/",
    tag = "todos",
    responses(
        (status = 200, description = "All todos", body = Vec<TodoData>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_todos<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<TodoData>>, ApiError> {
    let todos = state.db().todos().find_all().await?;
    Ok(Json(todos.into_iter().map(TodoData::from).collect()))
}

/// Create a new todo
///
/// Validation failures are refused with 406 and a message naming the
/// offending fields.
#[utoipa::path(
    post,
    path = "/todos/",
    tag = "todos",
    request_body = TodoData,
    responses(
        (status = 201, description = "Todo created", body = TodoData),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 406, description = "Validation failed", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_todo<D: Database>(
    State(state): State<AppState<D>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoData>), ApiError> {
    let Json(data) = body?;
    let repo = state.db().todos();

    let todo = TodoSerializer::create(&repo, &data)
        .await
        .map_err(|e| match e {
            SerializerError::Invalid(errors) => ApiError::refuse(&errors),
            other => other.into(),
        })?;

    tracing::debug!(id = ?todo.id, "Created todo");
    Ok((StatusCode::CREATED, Json(TodoData::from(todo))))
}

/// Get a todo by ID
#[utoipa::path(
    get,
    path = "/todos/{id}/",
    tag = "todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 200, description = "Todo found", body = TodoData),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<Json<TodoData>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.db().todos().find_by_id(id).await?;
    Ok(Json(TodoData::from(todo)))
}

/// Update a todo
///
/// Only the supplied fields change. Serves both PUT and PATCH.
#[utoipa::path(
    put,
    path = "/todos/{id}/",
    tag = "todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    request_body = TodoData,
    responses(
        (status = 200, description = "Todo updated", body = TodoData),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TodoData>, ApiError> {
    let id = parse_id(&id)?;
    let repo = state.db().todos();
    let todo = repo.find_by_id(id).await?;

    let Json(data) = body?;
    let todo = TodoSerializer::update(&repo, todo, &data, true).await?;

    Ok(Json(TodoData::from(todo)))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/todos/{id}/",
    tag = "todos",
    params(
        ("id" = i64, Path, description = "Todo ID")
    ),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 404, description = "Todo not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_todo<D: Database>(
    State(state): State<AppState<D>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.db().todos().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
