//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Identifiers are opaque to the client: the server assigns them and the
//! client only ever compares them for equality, so `TodoId` wraps a plain
//! string rather than committing to any particular id format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item returned by the API.
///
/// Servers that expose the storage key as `_id` are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(alias = "_id")]
    pub id: TodoId,
    pub body: String,
    pub completed: bool,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub body: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodo {
    /// A fresh, not yet completed todo.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            completed: false,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            body: None,
            completed: Some(completed),
        }
    }
}

/// What a server answered to a successful update.
///
/// Some servers echo the full record, others reply with a bare
/// acknowledgement such as `{"success":true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Todo),
    Acknowledged,
}
