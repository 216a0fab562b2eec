use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, EMPTY_TITLE};
use crate::model::{Pagination, Todo, TodoId, TodoInput};
use crate::store::Store;

pub const ROOT_MESSAGE: &str = "Todo API is up and running!";

type Db = State<Arc<Store>>;

#[derive(Serialize)]
pub struct RootMessage {
    pub message: &'static str,
}

pub fn routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(store)
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: ROOT_MESSAGE,
    })
}

async fn list_todos(
    State(store): Db,
    query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(page) = query?;
    let todos = page.apply(store.list_all());
    debug!(returned = todos.len(), "listed todos");
    Ok(Json(todos))
}

async fn create_todo(
    State(store): Db,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload?;
    validate(&input)?;
    let todo = store.create(input);
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(store): Db,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    id.stored()
        .and_then(|id| store.get(id))
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn update_todo(
    State(store): Db,
    id: Result<Path<TodoId>, PathRejection>,
    payload: Result<Json<TodoInput>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    validate(&input)?;
    let id = id.stored().ok_or(ApiError::NotFound)?;
    let todo = store.update(id, input).ok_or(ApiError::NotFound)?;
    info!(id, "updated todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(store): Db,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let id = id.stored().ok_or(ApiError::NotFound)?;
    if !store.delete(id) {
        return Err(ApiError::NotFound);
    }
    info!(id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

fn validate(input: &TodoInput) -> Result<(), ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation(EMPTY_TITLE.to_string()));
    }
    Ok(())
}
