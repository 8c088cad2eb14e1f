//! HTTP front end for the todo service.
//!
//! # Overview
//! `app()` builds the axum router over a shared [`AppState`]; `lifecycle`
//! binds it to a socket and shuts it down within a bounded grace period;
//! `config` resolves flags and environment variables into both.
//!
//! # Design
//! - The store gateway is created once in `main` and handed to the router
//!   as `Arc<dyn TodoStore>`; no ambient globals.
//! - Handlers recover every request-level failure into a JSON response.
//!   Only lifecycle failures (bind, shutdown timeout) end the process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod lifecycle;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    http::StatusCode,
    routing::{get, put},
    Router,
};
use todo_core::TodoStore;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    /// Directory holding the page templates.
    pub template_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            template_dir: template_dir.into(),
        }
    }
}

pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .merge(todo_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

/// The `/todo` sub-tree. The collection answers with or without a trailing
/// slash.
fn todo_routes() -> Router<AppState> {
    let collection = get(handlers::list_todos).post(handlers::create_todo);
    Router::new()
        .route("/todo", collection.clone())
        .route("/todo/", collection)
        .route(
            "/todo/{id}",
            put(handlers::update_todo).delete(handlers::delete_todo),
        )
}
