//! Todo endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::TodoRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, TodoId};
use crate::http::response::Envelope;
use crate::http::server::AppState;
use crate::models::{Todo, TodoTitle, ValidationError};

/// Create / update request body
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub title: Option<String>,
}

impl TodoPayload {
    fn title(&self) -> Result<TodoTitle, ValidationError> {
        let raw = self.title.as_deref().ok_or(ValidationError::MissingData)?;
        TodoTitle::new(raw)
    }
}

/// GET /todos - list all todos
async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<Todo>>>, ApiError> {
    let todos = TodoRepo::new(&state.db).find_all().await?;
    Ok(Json(Envelope::data(todos)))
}

/// GET /todos/{id} - a single todo, `data: null` when absent
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<Envelope<Option<Todo>>>, ApiError> {
    let todo = TodoRepo::new(&state.db).find_one(id).await?;
    Ok(Json(Envelope::data(todo)))
}

/// POST /todos - create a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> Result<Json<Envelope<Todo>>, ApiError> {
    let title = payload.title()?;
    let todo = TodoRepo::new(&state.db).create(&title).await?;

    tracing::info!(id = todo.id, "Todo added");
    Ok(Json(Envelope::data(todo).with_message("Success, Todo added!")))
}

/// PATCH /todos/{id} - rename a todo
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    JsonBody(payload): JsonBody<TodoPayload>,
) -> Result<Json<Envelope<Todo>>, ApiError> {
    let title = payload.title()?;
    let todo = TodoRepo::new(&state.db).update(id, &title).await?;
    Ok(Json(Envelope::data(todo)))
}

/// DELETE /todos/{id} - hard delete, `status: false` when absent
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<Envelope<()>>, ApiError> {
    let removed = TodoRepo::new(&state.db).delete(id).await?;

    let message = if removed {
        "Todo deleted!"
    } else {
        "Todo not found!"
    };
    Ok(Json(Envelope::message(removed, message)))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

#[cfg(test)]
mod tests {
    use crate::http::test_support::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    const MISSING: &str = "Bad request! Required todo data is missing.";

    #[tokio::test]
    async fn list_starts_empty() {
        let app = TestApp::new();
        let (status, body) = app.send("GET", "/todos", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": true, "data": []}));
    }

    #[tokio::test]
    async fn crud_flow() {
        let app = TestApp::new();

        let (status, body) = app
            .send("POST", "/todos", Some(r#"{"title": "Write tests"}"#))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], true);
        assert_eq!(body["message"], "Success, Todo added!");
        assert_eq!(body["data"]["title"], "Write tests");
        assert_eq!(body["data"]["completed"], false);
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = app.send("GET", &format!("/todos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": true, "data": {"id": id, "title": "Write tests", "completed": false}})
        );

        let (status, body) = app
            .send("PATCH", &format!("/todos/{id}"), Some(r#"{"title": "Ship it"}"#))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Ship it");

        let (_, body) = app.send("GET", "/todos", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = app.send("DELETE", &format!("/todos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": true, "message": "Todo deleted!"}));

        let (status, body) = app.send("GET", &format!("/todos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": true, "data": null}));
    }

    #[tokio::test]
    async fn blank_title_rejected_without_store_call() {
        let app = TestApp::new();

        for body in [r#"{"title": "  "}"#, r#"{}"#, r#"{"name": "x"}"#] {
            let (status, json) = app.send("POST", "/todos", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json, json!({"status": false, "message": MISSING}));
        }
        assert_eq!(app.opens(), 0);
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let app = TestApp::new();
        let (status, body) = app.send("POST", "/todos", Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], false);
        assert_eq!(app.opens(), 0);
    }

    #[tokio::test]
    async fn non_integer_id_rejected_before_repository() {
        let app = TestApp::new();

        let methods = [
            ("GET", None),
            ("PATCH", Some(r#"{"title": "x"}"#)),
            ("DELETE", None),
        ];
        for id in ["abc", "+5", "%205", "1.5", "5abc", "-"] {
            for (method, body) in methods {
                let (status, json) = app.send(method, &format!("/todos/{id}"), body).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{method} /todos/{id}");
                assert_eq!(
                    json,
                    json!({
                        "status": false,
                        "message": "Validation failed (numeric string is expected)"
                    })
                );
            }
        }
        assert_eq!(app.opens(), 0);
    }

    #[tokio::test]
    async fn patch_with_empty_body_is_400() {
        let app = TestApp::new();
        let (status, body) = app.send("PATCH", "/todos/1", Some("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], MISSING);
    }

    #[tokio::test]
    async fn patch_missing_todo_is_404() {
        let app = TestApp::new();
        let (status, body) = app
            .send("PATCH", "/todos/77", Some(r#"{"title": "ghost"}"#))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": false, "message": "Todo not found!"}));
    }

    #[tokio::test]
    async fn delete_missing_todo_reports_false() {
        let app = TestApp::new();
        let (status, body) = app.send("DELETE", "/todos/5", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": false, "message": "Todo not found!"}));
    }

    #[tokio::test]
    async fn closed_database_is_500() {
        let app = TestApp::new();
        app.db.close().await;

        let (status, body) = app.send("GET", "/todos", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": false, "message": "database connection is closed"})
        );
    }

    #[tokio::test]
    async fn concurrent_first_requests_open_once() {
        let app = TestApp::new();

        let requests = (0..10).map(|_| app.send("GET", "/todos", None));
        for (status, _) in futures::future::join_all(requests).await {
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(app.opens(), 1);
    }
}
