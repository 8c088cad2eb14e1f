//! Request-level errors and their JSON rendering.
//!
//! # Design
//! Every failure a handler can hit is recovered here and turned into a
//! response; nothing below the router terminates the process. Store and
//! decode errors travel as a tagged `{kind, message}` detail so the payload
//! shape does not change with the store driver.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use todo_core::StoreError;

pub const EMPTY_TITLE: &str = "The title cannot be empty";
pub const INVALID_URL: &str = "Invalid URL request";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not valid JSON for the expected shape.
    #[error("invalid request body: {0}")]
    Decode(String),

    #[error("{}", EMPTY_TITLE)]
    EmptyTitle,

    /// The `{id}` path segment is not a valid external id.
    #[error("{}", INVALID_URL)]
    InvalidId,

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("failed to render page: {0}")]
    Render(String),
}

impl ApiError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        ApiError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::EmptyTitle | ApiError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store { source, .. } if source.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Decode(rejection.body_text())
    }
}

/// Tagged error detail carried in failure payloads.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody {
    Plain { error: &'static str },
    Detailed { message: &'static str, error: ErrorDetail },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = match self {
            ApiError::EmptyTitle => ErrorBody::Plain { error: EMPTY_TITLE },
            ApiError::InvalidId => ErrorBody::Plain { error: INVALID_URL },
            ApiError::Decode(message) => ErrorBody::Detailed {
                message: "Invalid request body",
                error: ErrorDetail {
                    kind: "decode",
                    message,
                },
            },
            ApiError::Store { context, source } => ErrorBody::Detailed {
                message: context,
                error: ErrorDetail {
                    kind: source.kind(),
                    message: source.to_string(),
                },
            },
            ApiError::Render(message) => ErrorBody::Detailed {
                message: "Failed to render page",
                error: ErrorDetail {
                    kind: "render",
                    message,
                },
            },
        };
        (status, Json(body)).into_response()
    }
}
