//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod connection;
mod contact;
mod todo;

#[cfg(test)]
mod todo_test;

pub use connection::SqliteDatabase;
pub use contact::SqliteContactRepository;
pub use todo::SqliteTodoRepository;
