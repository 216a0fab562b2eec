//! Domain DTOs for the todo API.
//!
//! These mirror the server's wire schema but are declared here so the client
//! does not pull in axum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing todo.
///
/// An update replaces the whole record: a `None` description clears it and
/// `completed` is always sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<&Todo> for UpdateTodo {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }
}

impl UpdateTodo {
    /// `todo` with its completion flag flipped.
    pub fn toggled(todo: &Todo) -> Self {
        Self {
            completed: !todo.completed,
            ..Self::from(todo)
        }
    }
}

/// Offset/limit for `GET /todos`. Unset fields are left to the server's
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    pub(crate) fn query_string(&self) -> String {
        let pairs: Vec<String> = [("skip", self.skip), ("limit", self.limit)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}
