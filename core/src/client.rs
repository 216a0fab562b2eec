//! Stateless HTTP request builder and response parser for the todo API.
//!
//! `TodoClient` holds only a `base_url`. Each CRUD operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ListParams, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self, params: &ListParams) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("/todos{}", params.query_string()),
            None,
        )
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/todos/{id}"), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, "/todos".to_string(), Some(body)))
    }

    pub fn build_update_todo(&self, id: u64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, format!("/todos/{id}"), Some(body)))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/todos/{id}"), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        from_json(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        from_json(&response.body)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(err) => Err(ApiError::Validation(err.detail)),
            Err(_) => Err(ApiError::Validation(response.body.clone())),
        },
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
