//! Todo entity and title validation

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for todo titles
const MAX_TITLE_LEN: usize = 256;

/// A todo as returned across the API boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Raw `todos` row; `completed` is stored as 0/1.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TodoRow {
    pub id: i64,
    pub title: String,
    pub completed: i64,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            completed: row.completed != 0,
        }
    }
}

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 256 characters
    ///
    /// # Example
    /// ```
    /// use todo_server::models::TodoTitle;
    ///
    /// assert!(TodoTitle::new("Buy milk").is_ok());
    /// assert!(TodoTitle::new("").is_err());
    /// assert!(TodoTitle::new("   ").is_err());  // whitespace only
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::MissingData);
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_titles() {
        assert!(TodoTitle::new("Buy milk").is_ok());
        assert!(TodoTitle::new("a").is_ok());
        assert!(TodoTitle::new("  Trimmed  ").is_ok());
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(TodoTitle::new("").unwrap_err(), ValidationError::MissingData);
        assert_eq!(TodoTitle::new(" \t\n ").unwrap_err(), ValidationError::MissingData);
    }

    #[test]
    fn max_length() {
        assert!(TodoTitle::new(&"a".repeat(256)).is_ok());

        let err = TodoTitle::new(&"a".repeat(257)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 256, .. }));
    }

    #[test]
    fn trims_whitespace() {
        let title = TodoTitle::new("  hello  ").unwrap();
        assert_eq!(title.as_str(), "hello");
    }

    #[test]
    fn row_completed_becomes_bool() {
        let todo = Todo::from(TodoRow {
            id: 7,
            title: "x".into(),
            completed: 1,
        });
        assert!(todo.completed);

        let json = serde_json::to_value(Todo::from(TodoRow {
            id: 8,
            title: "y".into(),
            completed: 0,
        }))
        .unwrap();
        assert_eq!(json, serde_json::json!({"id": 8, "title": "y", "completed": false}));
    }
}
