//! Schema bootstrap and demo seed data

use super::{Database, DbError, Value};

pub(crate) const CREATE_TODOS: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    completed BOOLEAN DEFAULT false NOT NULL
)
"#;

const SEED_TITLES: [&str; 2] = ["Todo 1", "Todo 2"];

/// Create the `todos` table if it does not exist.
pub async fn ensure_schema(db: &Database) -> Result<(), DbError> {
    db.exec(CREATE_TODOS).await
}

/// Create the table and insert the demo rows.
///
/// Statements run one by one; a failure part way leaves earlier rows in place.
pub async fn seed(db: &Database) -> Result<usize, DbError> {
    ensure_schema(db).await?;

    let mut inserted = 0;
    for title in SEED_TITLES {
        db.run(
            "INSERT INTO todos (title, completed) VALUES (?, ?)",
            &[Value::from(title), Value::Bool(false)],
        )
        .await?;
        inserted += 1;
    }

    tracing::info!(rows = inserted, "Database seeded");
    Ok(inserted)
}
