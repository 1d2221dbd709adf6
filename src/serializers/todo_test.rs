//! Tests for the todo serializer.

use serde_json::json;

use super::{SerializerError, TodoChanges, TodoData, TodoSerializer};
use crate::db::{Database, SqliteDatabase, Todo, TodoRepository};
use crate::validators::{NOT_BLANK, REQUIRED, TASK_TAKEN};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn invalid(result: Result<impl std::fmt::Debug, SerializerError>) -> crate::validators::ValidationErrors {
    match result {
        Err(SerializerError::Invalid(errors)) => errors,
        other => panic!("Expected validation failure, got {:?}", other),
    }
}

#[test]
fn todo_data_roundtrips_through_json() {
    let data = TodoData {
        task: Some("buy milk".to_string()),
        details: "2% milk".to_string(),
        completed: false,
    };

    let json = serde_json::to_string(&data).unwrap();
    let back: TodoData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);
}

#[test]
fn todo_data_exposes_only_wire_fields() {
    let todo = Todo::new(Some("t".to_string()), "d".to_string(), true);
    let value = serde_json::to_value(TodoData::from(&todo)).unwrap();
    assert_eq!(value, json!({"task": "t", "details": "d", "completed": true}));
}

#[test]
fn changes_apply_only_supplied_fields() {
    let mut todo = Todo::new(Some("keep".to_string()), "old".to_string(), false);
    TodoChanges {
        details: Some("new".to_string()),
        ..Default::default()
    }
    .apply_to(&mut todo);

    assert_eq!(todo.task.as_deref(), Some("keep"));
    assert_eq!(todo.details, "new");
    assert!(!todo.completed);
}

#[test]
fn changes_can_clear_task() {
    let mut todo = Todo::new(Some("named".to_string()), "d".to_string(), false);
    TodoChanges {
        task: Some(None),
        ..Default::default()
    }
    .apply_to(&mut todo);
    assert!(todo.task.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_completed_and_task() {
    let db = setup_db().await;

    let todo = TodoSerializer::create(&db.todos(), &json!({"details": "only details"}))
        .await
        .expect("Create should succeed");

    assert!(todo.id.is_some());
    assert!(todo.task.is_none());
    assert!(!todo.completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_requires_details() {
    let db = setup_db().await;

    let errors = invalid(TodoSerializer::create(&db.todos(), &json!({"task": "x"})).await);
    assert_eq!(errors.get("details"), Some(&[REQUIRED.to_string()][..]));
    assert!(errors.get("task").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_details_and_long_task() {
    let db = setup_db().await;
    let long_task = "x".repeat(201);

    let errors = invalid(
        TodoSerializer::create(&db.todos(), &json!({"task": long_task, "details": "   "})).await,
    );
    assert_eq!(errors.get("details"), Some(&[NOT_BLANK.to_string()][..]));
    assert_eq!(
        errors.get("task"),
        Some(&["Ensure this field has no more than 200 characters.".to_string()][..])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_task() {
    let db = setup_db().await;
    let todos = db.todos();
    let body = json!({"task": "buy milk", "details": "2% milk", "completed": false});

    TodoSerializer::create(&todos, &body).await.unwrap();
    let errors = invalid(TodoSerializer::create(&todos, &body).await);

    assert_eq!(errors.get("task"), Some(&[TASK_TAKEN.to_string()][..]));
    assert_eq!(todos.find_all().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_non_object_body() {
    let db = setup_db().await;

    let errors = invalid(TodoSerializer::create(&db.todos(), &json!(["a", "b"])).await);
    assert_eq!(
        errors.get("non_field_errors"),
        Some(&["Invalid data. Expected a dictionary, but got list.".to_string()][..])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_own_task() {
    let db = setup_db().await;
    let todos = db.todos();

    let todo = TodoSerializer::create(&todos, &json!({"task": "mine", "details": "d"}))
        .await
        .unwrap();

    let updated = TodoSerializer::update(
        &todos,
        todo.clone(),
        &json!({"task": "mine", "completed": true}),
        true,
    )
    .await
    .expect("Re-submitting own task should be allowed");

    assert!(updated.completed);
    assert_eq!(updated.details, "d");
    assert_eq!(updated.created, todo.created);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_task_held_by_another_todo() {
    let db = setup_db().await;
    let todos = db.todos();

    TodoSerializer::create(&todos, &json!({"task": "taken", "details": "a"}))
        .await
        .unwrap();
    let other = TodoSerializer::create(&todos, &json!({"task": "free", "details": "b"}))
        .await
        .unwrap();

    let errors = invalid(TodoSerializer::update(&todos, other, &json!({"task": "taken"}), true).await);
    assert_eq!(errors.get("task"), Some(&[TASK_TAKEN.to_string()][..]));
}

#[tokio::test(flavor = "multi_thread")]
async fn full_update_requires_details() {
    let db = setup_db().await;
    let todos = db.todos();

    let todo = TodoSerializer::create(&todos, &json!({"details": "d"}))
        .await
        .unwrap();

    let errors = invalid(TodoSerializer::update(&todos, todo, &json!({"completed": true}), false).await);
    assert_eq!(errors.get("details"), Some(&[REQUIRED.to_string()][..]));
}

#[tokio::test(flavor = "multi_thread")]
async fn store_unique_violation_reads_as_taken_task() {
    let db = setup_db().await;
    let todos = db.todos();

    let todo = Todo::new(Some("raced".to_string()), "d".to_string(), false);
    todos.save(&todo).await.expect("First insert should succeed");
    let lost = todos.save(&todo).await.map_err(SerializerError::from);

    let errors = invalid(lost);
    assert_eq!(errors.get("task"), Some(&[TASK_TAKEN.to_string()][..]));
    assert!(!errors.summary().contains("UNIQUE"));
}
