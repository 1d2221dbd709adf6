//! Todo serializer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::SerializerError;
use crate::db::{Todo, TodoRepository};
use crate::validators::{self, CharRule, REQUIRED, ValidationErrors};

const TASK: CharRule = CharRule::max(200).nullable();
const DETAILS: CharRule = CharRule::max(500);

/// JSON representation of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoData {
    /// Unique short name
    #[schema(example = "buy milk")]
    pub task: Option<String>,
    /// Longer description (up to 500 characters)
    #[schema(example = "2% milk")]
    pub details: String,
    /// Completion flag
    #[schema(example = false)]
    pub completed: bool,
}

impl From<&Todo> for TodoData {
    fn from(t: &Todo) -> Self {
        Self {
            task: t.task.clone(),
            details: t.details.clone(),
            completed: t.completed,
        }
    }
}

impl From<Todo> for TodoData {
    fn from(t: Todo) -> Self {
        Self {
            task: t.task,
            details: t.details,
            completed: t.completed,
        }
    }
}

/// Validated field values. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub task: Option<Option<String>>,
    pub details: Option<String>,
    pub completed: Option<bool>,
}

impl TodoChanges {
    /// Overwrite the supplied fields on `todo`, leaving the rest untouched.
    pub fn apply_to(self, todo: &mut Todo) {
        if let Some(task) = self.task {
            todo.task = task;
        }
        if let Some(details) = self.details {
            todo.details = details;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }

    /// Build a new record, defaulting missing optional fields.
    fn into_todo(self) -> Todo {
        Todo::new(
            self.task.flatten(),
            self.details.unwrap_or_default(),
            self.completed.unwrap_or(false),
        )
    }
}

/// Validates and persists todos.
pub struct TodoSerializer;

impl TodoSerializer {
    /// Validate a request body.
    ///
    /// With `partial` set, absent fields are skipped rather than reported as
    /// required. `instance` is the record being updated, excluded from the
    /// uniqueness check.
    pub async fn validate<R: TodoRepository>(
        repo: &R,
        data: &Value,
        instance: Option<&Todo>,
        partial: bool,
    ) -> Result<TodoChanges, SerializerError> {
        let fields = validators::expect_object(data)?;
        let mut errors = ValidationErrors::new();
        let mut changes = TodoChanges::default();

        if let Some(value) = fields.get("task") {
            match validators::clean_char(value, TASK) {
                Ok(task) => changes.task = Some(task),
                Err(message) => errors.add("task", message),
            }
        }

        match fields.get("details") {
            Some(value) => match validators::clean_char(value, DETAILS) {
                Ok(details) => changes.details = details,
                Err(message) => errors.add("details", message),
            },
            None if !partial => errors.add("details", REQUIRED),
            None => {}
        }

        if let Some(value) = fields.get("completed") {
            match validators::clean_bool(value) {
                Ok(completed) => changes.completed = Some(completed),
                Err(message) => errors.add("completed", message),
            }
        }

        // Store lookups only run once the fields themselves are well-formed
        if !errors.is_empty() {
            return Err(errors.into());
        }

        if let Some(Some(task)) = &changes.task {
            let instance_id = instance.and_then(|t| t.id);
            validators::check_unique_task(repo, task, instance_id, &mut errors).await?;
        }

        Ok(errors.into_result(changes)?)
    }

    /// Validate a request body and insert a new todo.
    pub async fn create<R: TodoRepository>(repo: &R, data: &Value) -> Result<Todo, SerializerError> {
        let changes = Self::validate(repo, data, None, false).await?;
        Ok(repo.save(&changes.into_todo()).await?)
    }

    /// Validate a request body and apply it to an existing todo.
    pub async fn update<R: TodoRepository>(
        repo: &R,
        mut instance: Todo,
        data: &Value,
        partial: bool,
    ) -> Result<Todo, SerializerError> {
        let changes = Self::validate(repo, data, Some(&instance), partial).await?;
        changes.apply_to(&mut instance);
        Ok(repo.save(&instance).await?)
    }
}
