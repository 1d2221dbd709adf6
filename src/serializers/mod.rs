//! Wire format ⇄ record mapping.
//!
//! Serializers parse raw JSON request bodies into records (running the
//! validators on the way in) and render records back into their JSON
//! representation.

mod contact;
mod todo;

#[cfg(test)]
mod todo_test;

use thiserror::Error;

use crate::db::DbError;
use crate::validators::{self, ValidationErrors};

pub use contact::*;
pub use todo::*;

/// Why a serializer refused its input.
#[derive(Error, Debug)]
pub enum SerializerError {
    /// The input failed one or more validation rules.
    #[error("Invalid input: {}", .0.summary())]
    Invalid(ValidationErrors),

    /// The store failed while validating or saving.
    #[error(transparent)]
    Store(DbError),
}

impl From<DbError> for SerializerError {
    fn from(e: DbError) -> Self {
        match e {
            // Lost a uniqueness race after the checks passed
            DbError::Constraint { message } => {
                SerializerError::Invalid(validators::unique_violation(&message))
            }
            other => SerializerError::Store(other),
        }
    }
}

impl From<ValidationErrors> for SerializerError {
    fn from(errors: ValidationErrors) -> Self {
        SerializerError::Invalid(errors)
    }
}
