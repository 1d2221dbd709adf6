//! SQLite TodoRepository implementation.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{DbError, DbResult, Id, Todo, TodoRepository};

const COLUMNS: &str = "id, task, details, completed, created, updated";

/// SQLx-backed todo repository.
pub struct SqliteTodoRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_todo(row: &SqliteRow) -> DbResult<Todo> {
    Ok(Todo {
        id: Some(row.try_get("id")?),
        task: row.try_get("task")?,
        details: row.try_get("details")?,
        completed: row.try_get("completed")?,
        created: row.try_get("created")?,
        updated: row.try_get("updated")?,
    })
}

fn not_found(id: Id) -> DbError {
    DbError::NotFound {
        entity_type: "Todo".to_string(),
        id: id.to_string(),
    }
}

impl<'a> TodoRepository for SqliteTodoRepository<'a> {
    async fn find_all(&self) -> DbResult<Vec<Todo>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM todo ORDER BY id ASC"))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn find_by_id(&self, id: Id) -> DbResult<Todo> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM todo WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| not_found(id))?;
        row_to_todo(&row)
    }

    async fn find_by_task(&self, task: &str) -> DbResult<Option<Todo>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM todo WHERE task = ?"))
            .bind(task)
            .fetch_optional(self.pool)
            .await?;

        row.as_ref().map(row_to_todo).transpose()
    }

    async fn save(&self, todo: &Todo) -> DbResult<Todo> {
        let now = Utc::now();

        let Some(id) = todo.id else {
            // Timestamps are always store-managed, never taken from input
            let result = sqlx::query(
                "INSERT INTO todo (task, details, completed, created, updated) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&todo.task)
            .bind(&todo.details)
            .bind(todo.completed)
            .bind(now)
            .bind(now)
            .execute(self.pool)
            .await?;

            return Ok(Todo {
                id: Some(result.last_insert_rowid()),
                task: todo.task.clone(),
                details: todo.details.clone(),
                completed: todo.completed,
                created: now,
                updated: now,
            });
        };

        let result = sqlx::query(
            "UPDATE todo SET task = ?, details = ?, completed = ?, updated = ? WHERE id = ?",
        )
        .bind(&todo.task)
        .bind(&todo.details)
        .bind(todo.completed)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
