//! SQLite ContactRepository implementation.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::db::{Contact, ContactRepository, DbError, DbResult, Id};

const COLUMNS: &str = "id, name, phone_number, email";

/// SQLx-backed contact repository.
pub struct SqliteContactRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

fn row_to_contact(row: &SqliteRow) -> DbResult<Contact> {
    Ok(Contact {
        id: Some(row.try_get("id")?),
        name: row.try_get("name")?,
        phone_number: row.try_get("phone_number")?,
        email: row.try_get("email")?,
    })
}

fn not_found(id: Id) -> DbError {
    DbError::NotFound {
        entity_type: "Contact".to_string(),
        id: id.to_string(),
    }
}

impl<'a> SqliteContactRepository<'a> {
    async fn find_one(&self, sql: &str, binds: &[&str]) -> DbResult<Option<Contact>> {
        let mut query = sqlx::query(sql);
        for value in binds {
            query = query.bind(*value);
        }

        let row = query.fetch_optional(self.pool).await?;
        row.as_ref().map(row_to_contact).transpose()
    }
}

impl<'a> ContactRepository for SqliteContactRepository<'a> {
    async fn find_all(&self) -> DbResult<Vec<Contact>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM contact ORDER BY id ASC"))
            .fetch_all(self.pool)
            .await?;

        rows.iter().map(row_to_contact).collect()
    }

    async fn find_by_id(&self, id: Id) -> DbResult<Contact> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM contact WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| not_found(id))?;
        row_to_contact(&row)
    }

    async fn find_by_phone_number(&self, phone_number: &str) -> DbResult<Option<Contact>> {
        self.find_one(
            &format!("SELECT {COLUMNS} FROM contact WHERE phone_number = ?"),
            &[phone_number],
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<Contact>> {
        self.find_one(
            &format!("SELECT {COLUMNS} FROM contact WHERE email = ?"),
            &[email],
        )
        .await
    }

    async fn find_by_name_and_phone_number(
        &self,
        name: &str,
        phone_number: &str,
    ) -> DbResult<Option<Contact>> {
        self.find_one(
            &format!("SELECT {COLUMNS} FROM contact WHERE name = ? AND phone_number = ?"),
            &[name, phone_number],
        )
        .await
    }

    async fn save(&self, contact: &Contact) -> DbResult<Contact> {
        let Some(id) = contact.id else {
            let result =
                sqlx::query("INSERT INTO contact (name, phone_number, email) VALUES (?, ?, ?)")
                    .bind(&contact.name)
                    .bind(&contact.phone_number)
                    .bind(&contact.email)
                    .execute(self.pool)
                    .await?;

            return Ok(Contact {
                id: Some(result.last_insert_rowid()),
                ..contact.clone()
            });
        };

        let result =
            sqlx::query("UPDATE contact SET name = ?, phone_number = ?, email = ? WHERE id = ?")
                .bind(&contact.name)
                .bind(&contact.phone_number)
                .bind(&contact.email)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(contact.clone())
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM contact WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
