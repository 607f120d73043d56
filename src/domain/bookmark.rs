// src/domain/bookmark.rs
use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Server-assigned bookmark identifier.
///
/// The service decides the shape (numeric ids today), so the client keeps the
/// textual form and only uses it to address `api/bookmarks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookmarkId(String);

impl BookmarkId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract an id from a JSON value: numbers and non-empty strings are accepted.
    ///
    /// String ids are kept exactly as the service sent them.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            _ => None,
        }
    }
}

impl FromStr for BookmarkId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidId("empty id".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<i64> for BookmarkId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for BookmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bookmark record as returned by the service.
///
/// Fields other than `id` are opaque; the record round-trips as the JSON
/// object it was received as.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmark(Map<String, Value>);

impl Bookmark {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<BookmarkId> {
        self.0.get("id").and_then(BookmarkId::from_value)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn url(&self) -> Option<&str> {
        self.0.get("url").and_then(Value::as_str)
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.id().map_or("?".to_string(), |id| id.to_string()),
            self.title().unwrap_or_default(),
            self.url().unwrap_or_default()
        )
    }
}

/// Client-local bookmark being composed; sent verbatim as the creation payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftBookmark(Map<String, Value>);

impl DraftBookmark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a draft from a JSON object literal.
    pub fn from_json(text: &str) -> DomainResult<Self> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            Ok(other) => Err(DomainError::Other(format!(
                "draft must be a JSON object, got: {}",
                other
            ))),
            Err(e) => Err(DomainError::Other(format!("invalid draft JSON: {}", e))),
        }
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DraftBookmark {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
