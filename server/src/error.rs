//! Errors surfaced to HTTP clients.
//!
//! Every variant renders as `{"detail": "..."}`. The store never returns an
//! error; absence is an `Option`/`bool` that handlers turn into `NotFound`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub const EMPTY_TITLE: &str = "Title cannot be empty.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A field violates its constraint, e.g. a blank title.
    #[error("{0}")]
    Validation(String),

    #[error("Todo not found.")]
    NotFound,

    /// The request could not be decoded. `status` is the one the extractor
    /// picked (400, 415 or 422).
    #[error("{detail}")]
    Malformed { status: StatusCode, detail: String },
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Malformed { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

macro_rules! malformed_from {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Malformed {
                        status: rejection.status(),
                        detail: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

malformed_from!(JsonRejection, PathRejection, QueryRejection);
