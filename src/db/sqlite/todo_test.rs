//! Tests for SqliteTodoRepository.

use crate::db::{Database, DbError, SqliteDatabase, Todo, TodoRepository};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn todo(task: Option<&str>, details: &str) -> Todo {
    Todo::new(task.map(str::to_string), details.to_string(), false)
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_save_and_find_by_id() {
    let db = setup_db().await;
    let todos = db.todos();

    let saved = todos
        .save(&todo(Some("buy milk"), "2% milk"))
        .await
        .expect("Save should succeed");

    let id = saved.id.expect("Saved todo should have an id");
    let retrieved = todos.find_by_id(id).await.expect("Find should succeed");
    assert_eq!(retrieved, saved);
    assert_eq!(retrieved.task.as_deref(), Some("buy milk"));
    assert_eq!(retrieved.details, "2% milk");
    assert!(!retrieved.completed);
    assert_eq!(retrieved.created, retrieved.updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_find_by_id_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.todos().find_by_id(999).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_find_all_in_insertion_order() {
    let db = setup_db().await;
    let todos = db.todos();

    assert!(todos.find_all().await.unwrap().is_empty());

    todos.save(&todo(Some("first"), "a")).await.unwrap();
    todos.save(&todo(Some("second"), "b")).await.unwrap();
    todos.save(&todo(None, "c")).await.unwrap();

    let all = todos.find_all().await.expect("List should succeed");
    let tasks: Vec<Option<&str>> = all.iter().map(|t| t.task.as_deref()).collect();
    assert_eq!(tasks, vec![Some("first"), Some("second"), None]);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_find_by_task() {
    let db = setup_db().await;
    let todos = db.todos();

    todos.save(&todo(Some("laundry"), "whites")).await.unwrap();

    let found = todos.find_by_task("laundry").await.unwrap();
    assert_eq!(found.map(|t| t.details), Some("whites".to_string()));
    assert!(todos.find_by_task("dishes").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_update_preserves_created_and_refreshes_updated() {
    let db = setup_db().await;
    let todos = db.todos();

    let mut saved = todos.save(&todo(Some("old"), "details")).await.unwrap();
    let created = saved.created;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    saved.task = Some("new".to_string());
    saved.completed = true;
    let updated = todos.save(&saved).await.expect("Update should succeed");

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.task.as_deref(), Some("new"));
    assert!(updated.completed);
    assert_eq!(updated.created, created);
    assert!(updated.updated > created);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_update_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let mut ghost = todo(Some("ghost"), "nothing");
    ghost.id = Some(404);

    let result = db.todos().save(&ghost).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_duplicate_task_violates_constraint() {
    let db = setup_db().await;
    let todos = db.todos();

    todos.save(&todo(Some("unique"), "one")).await.unwrap();
    let result = todos.save(&todo(Some("unique"), "two")).await;

    assert!(matches!(result, Err(DbError::Constraint { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_null_tasks_may_repeat() {
    let db = setup_db().await;
    let todos = db.todos();

    todos.save(&todo(None, "one")).await.unwrap();
    todos.save(&todo(None, "two")).await.unwrap();

    assert_eq!(todos.find_all().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_delete() {
    let db = setup_db().await;
    let todos = db.todos();

    let saved = todos.save(&todo(Some("to delete"), "bye")).await.unwrap();
    let id = saved.id.unwrap();

    todos.delete(id).await.expect("Delete should succeed");

    assert!(matches!(
        todos.find_by_id(id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        todos.delete(id).await,
        Err(DbError::NotFound { .. })
    ));
}
