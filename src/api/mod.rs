mod extract;

use std::any::Any;

use axum::Json;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::put;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::{AppError, ErrorResponse, INTERNAL_ERROR_MESSAGE};
use crate::models::*;
use crate::state::AppState;

pub use extract::ApiJson;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .method_not_allowed_fallback(route_not_found);

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewTaskRequest>
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = state.store.create(req).await?;
    info!("task {} created", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateTaskRequest>
) -> Result<Json<Task>, AppError> {
    let task = state.store.update(&id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>
) -> Result<StatusCode, AppError> {
    let ok = state.store.delete(&id).await?;
    if ok {
        info!("task {} deleted", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::store::TaskStore;

    /// Store whose every call fails, to exercise the 500 paths.
    struct BrokenStore {
        panic: bool,
    }

    #[async_trait]
    impl TaskStore for BrokenStore {
        async fn list(&self) -> Result<Vec<Task>, AppError> {
            if self.panic {
                panic!("store exploded");
            }
            Err(AppError::Internal("backend unavailable".to_string()))
        }

        async fn create(&self, _req: NewTaskRequest) -> Result<Task, AppError> {
            Err(AppError::Internal("backend unavailable".to_string()))
        }

        async fn update(&self, _id: &str, _req: UpdateTaskRequest) -> Result<Option<Task>, AppError> {
            Err(AppError::Internal("backend unavailable".to_string()))
        }

        async fn delete(&self, _id: &str) -> Result<bool, AppError> {
            Err(AppError::Internal("backend unavailable".to_string()))
        }
    }

    async fn get_tasks(store: BrokenStore) -> (StatusCode, serde_json::Value) {
        let app = router(AppState::new(Arc::new(store)));
        let request = Request::builder()
            .uri("/api/tasks")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() {
        let (status, body) = get_tasks(BrokenStore { panic: false }).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_handler_panic_returns_500() {
        let (status, body) = get_tasks(BrokenStore { panic: true }).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
