//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Methods return `Send` futures so handlers generic over [`Database`]
//! stay usable as axum handlers.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Contact, Id, Todo},
};

/// Repository for Todo operations.
pub trait TodoRepository {
    /// Get all todos, ordered by id.
    fn find_all(&self) -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Get a todo by ID. Fails with `NotFound` if absent.
    fn find_by_id(&self, id: Id) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Get the todo holding the given task name, if any.
    fn find_by_task(&self, task: &str) -> impl Future<Output = DbResult<Option<Todo>>> + Send;

    /// Insert a todo without an id, or update the one with a matching id.
    ///
    /// Returns the stored record with its id and store-managed timestamps.
    fn save(&self, todo: &Todo) -> impl Future<Output = DbResult<Todo>> + Send;

    /// Delete a todo by ID. Fails with `NotFound` if absent.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for Contact operations.
pub trait ContactRepository {
    /// Get all contacts, ordered by id.
    fn find_all(&self) -> impl Future<Output = DbResult<Vec<Contact>>> + Send;

    /// Get a contact by ID. Fails with `NotFound` if absent.
    fn find_by_id(&self, id: Id) -> impl Future<Output = DbResult<Contact>> + Send;

    /// Get the contact with the given phone number, if any.
    fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> impl Future<Output = DbResult<Option<Contact>>> + Send;

    /// Get the contact with the given email, if any.
    fn find_by_email(&self, email: &str) -> impl Future<Output = DbResult<Option<Contact>>> + Send;

    /// Get the contact with the given name and phone number pair, if any.
    fn find_by_name_and_phone_number(
        &self,
        name: &str,
        phone_number: &str,
    ) -> impl Future<Output = DbResult<Option<Contact>>> + Send;

    /// Insert a contact without an id, or update the one with a matching id.
    fn save(&self, contact: &Contact) -> impl Future<Output = DbResult<Contact>> + Send;

    /// Delete a contact by ID. Fails with `NotFound` if absent.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Todos<'a>: TodoRepository + Send + Sync
    where
        Self: 'a;
    type Contacts<'a>: ContactRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the todo repository.
    fn todos(&self) -> Self::Todos<'_>;

    /// Get the contact repository.
    fn contacts(&self) -> Self::Contacts<'_>;
}
