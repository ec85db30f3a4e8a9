//! Todo repository
//!
//! Single-statement CRUD over the `todos` table:
//! - create / update use RETURNING (no read-after-write)
//! - rows are normalized to [`Todo`] before leaving this module

use crate::db::{Database, DbError, Value};
use crate::models::todo::TodoRow;
use crate::models::{Todo, TodoTitle};

/// Todo repository
pub struct TodoRepo<'a> {
    db: &'a Database,
}

impl<'a> TodoRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All todos in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Todo>, DbError> {
        let rows: Vec<TodoRow> = self
            .db
            .all("SELECT id, title, completed FROM todos ORDER BY id", &[])
            .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    /// A single todo, or `None` if the id does not exist.
    pub async fn find_one(&self, id: i64) -> Result<Option<Todo>, DbError> {
        let row: Option<TodoRow> = self
            .db
            .get(
                "SELECT id, title, completed FROM todos WHERE id = ?",
                &[Value::Integer(id)],
            )
            .await?;

        Ok(row.map(Todo::from))
    }

    /// Insert a new, not yet completed todo.
    pub async fn create(&self, title: &TodoTitle) -> Result<Todo, DbError> {
        let row: TodoRow = self
            .db
            .get(
                "INSERT INTO todos (title, completed) VALUES (?, ?) RETURNING id, title, completed",
                &[Value::from(title.as_str()), Value::Bool(false)],
            )
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tracing::debug!(id = row.id, "Todo created");
        Ok(row.into())
    }

    /// Replace a todo's title.
    ///
    /// Returns [`DbError::NotFound`] when no row has this id.
    pub async fn update(&self, id: i64, title: &TodoTitle) -> Result<Todo, DbError> {
        let row: TodoRow = self
            .db
            .get(
                "UPDATE todos SET title = ? WHERE id = ? RETURNING id, title, completed",
                &[Value::from(title.as_str()), Value::Integer(id)],
            )
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "todo",
                id: id.to_string(),
            })?;

        Ok(row.into())
    }

    /// Hard delete. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = self
            .db
            .run("DELETE FROM todos WHERE id = ?", &[Value::Integer(id)])
            .await?;

        Ok(result.rows_affected > 0)
    }
}
