//! Wire types for the todo service.
//!
//! `Todo` is both the stored record and its JSON representation. Create and
//! update share one payload type because an update is a full replace: every
//! field is resupplied, and an omitted optional field takes its default.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SKIP: usize = 0;
pub const DEFAULT_LIMIT: usize = 100;

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Stamped on creation and reset on every update.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /todos` and `PUT /todos/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// `{id}` in `/todos/{id}`.
///
/// Any integer is accepted and clamped to the `i64` range. A negative id
/// can never name a stored record and resolves to `None`, so the handler
/// answers 404. Non-integer text is rejected by the extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodoId(pub i64);

impl TodoId {
    pub fn stored(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_saturating(&text)
            .map(TodoId)
            .ok_or_else(|| D::Error::custom(format!("expected an integer id, got `{text}`")))
    }
}

/// `?skip=&limit=` on `GET /todos`.
///
/// Parsed as signed integers clamped to the `i64` range, so negative and
/// oversized values reach `window` instead of being rejected. An empty
/// value counts as missing.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "saturating_param")]
    pub skip: Option<i64>,
    #[serde(default, deserialize_with = "saturating_param")]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Resolved `(skip, limit)`.
    pub fn window(&self) -> (usize, usize) {
        (
            resolve(self.skip, DEFAULT_SKIP),
            resolve(self.limit, DEFAULT_LIMIT),
        )
    }

    /// Slice `items` to `[skip, skip + limit)`, clamped to its bounds.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let (skip, limit) = self.window();
        items.into_iter().skip(skip).take(limit).collect()
    }
}

fn saturating_param<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let text = String::deserialize(deserializer)?;
    if text.is_empty() {
        return Ok(None);
    }
    parse_saturating(&text)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected an integer, got `{text}`")))
}

/// Optionally signed decimal digits, clamped to `i64::MIN..=i64::MAX`.
fn parse_saturating(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = match digits.parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

fn resolve(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(v) if v >= 0 => usize::try_from(v).unwrap_or(usize::MAX),
        _ => default,
    }
}
