//! HTTP handlers for the todo routes and the home page.
//!
//! Each handler validates its input, calls the store gateway at most once
//! per step, and answers with JSON. Failures return [`ApiError`], which the
//! router turns into an error payload.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use minijinja::{context, Environment};
use serde::Serialize;
use todo_core::{Todo, TodoId, TodoPatch, TodoRecord};

use crate::error::ApiError;
use crate::AppState;

pub const HOME_TEMPLATE: &str = "home.tpl";

#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub todo_id: String,
}

#[derive(Debug, Serialize)]
pub struct TodoList {
    pub data: Vec<Todo>,
}

#[derive(Debug, Serialize)]
struct RouteDoc {
    method: &'static str,
    path: &'static str,
    summary: &'static str,
}

const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        method: "GET",
        path: "/todo",
        summary: "list all todos",
    },
    RouteDoc {
        method: "POST",
        path: "/todo",
        summary: "create a todo",
    },
    RouteDoc {
        method: "PUT",
        path: "/todo/{id}",
        summary: "update a todo",
    },
    RouteDoc {
        method: "DELETE",
        path: "/todo/{id}",
        summary: "delete a todo",
    },
];

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.template_dir.join(HOME_TEMPLATE);
    let source = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| ApiError::Render(format!("{}: {err}", path.display())))?;

    let env = Environment::new();
    let page = env
        .render_str(&source, context! { title => "Todo", routes => ROUTES })
        .map_err(|err| ApiError::Render(err.to_string()))?;
    Ok(Html(page))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Json(todo) = payload?;
    if todo.title.is_empty() {
        return Err(ApiError::EmptyTitle);
    }

    let record = TodoRecord::from_wire(todo, TodoId::generate());
    let id = record.id;
    state
        .store
        .insert(record)
        .await
        .map_err(|err| ApiError::store("Failed to create TODO", err))?;

    tracing::info!(todo_id = %id, "todo created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "TODO created successfully",
            todo_id: id.to_external(),
        }),
    ))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    let records = state
        .store
        .find_all()
        .await
        .map_err(|err| ApiError::store("Failed to fetch todo", err))?;

    Ok(Json(TodoList {
        data: records.into_iter().map(Todo::from).collect(),
    }))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    if patch.title.as_deref() == Some("") {
        return Err(ApiError::EmptyTitle);
    }

    let record = state
        .store
        .update_by_id(id, patch)
        .await
        .map_err(|err| ApiError::store("Failed to update TODO", err))?;

    tracing::info!(todo_id = %id, "todo updated");
    Ok(Json(record.into_wire()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .remove_by_id(id)
        .await
        .map_err(|err| ApiError::store("Failed to remove TODO", err))?;

    tracing::info!(todo_id = %id, "todo removed");
    Ok(StatusCode::NO_CONTENT)
}

/// Validate a path id before touching the store.
fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    let raw = raw.trim();
    if !TodoId::is_valid_external(raw) {
        return Err(ApiError::InvalidId);
    }
    TodoId::from_external(raw).map_err(|_| ApiError::InvalidId)
}
