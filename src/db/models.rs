//! Records held by the entity store.
//!
//! These are storage-agnostic and carry no validation logic; see
//! `crate::serializers` for the wire mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Integer primary key assigned by the store.
pub type Id = i64;

/// A todo item.
///
/// `id` is `None` until the record has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Option<Id>,
    /// Unique across all todos when present.
    pub task: Option<String>,
    pub details: String,
    pub completed: bool,
    /// Set once on insert.
    pub created: DateTime<Utc>,
    /// Refreshed on every save.
    pub updated: DateTime<Utc>,
}

impl Todo {
    /// Build an unsaved todo. Timestamps are placeholders until `save`.
    pub fn new(task: Option<String>, details: String, completed: bool) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            task,
            details,
            completed,
            created: now,
            updated: now,
        }
    }
}

/// An address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Option<Id>,
    pub name: String,
    /// Unique across all contacts.
    pub phone_number: String,
    /// Unique across all contacts.
    pub email: String,
}

impl Contact {
    pub fn new(name: String, phone_number: String, email: String) -> Self {
        Self {
            id: None,
            name,
            phone_number,
            email,
        }
    }
}
