//! HTTP client for the task service.
//!
//! Every call resolves to an [`ApiResponse`]: failures of any kind (transport,
//! non-2xx status, undecodable body) end up as its `error` string instead of
//! propagating.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorResponse};
use crate::models::{HealthStatus, NewTaskRequest, Task, UpdateTaskRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, String> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

/// Operations the client view layer needs from the service.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn get_tasks(&self) -> ApiResponse<Vec<Task>>;
    async fn create_task(&self, req: &NewTaskRequest) -> ApiResponse<Task>;
    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> ApiResponse<Task>;
    async fn delete_task(&self, id: &str) -> ApiResponse<()>;

    async fn toggle_task_completion(&self, id: &str, completed: bool) -> ApiResponse<Task> {
        self.update_task(id, &UpdateTaskRequest::completion(completed))
            .await
    }
}

#[derive(Clone, Debug)]
pub struct TaskApiClient {
    client: Client,
    base_url: String,
}

impl TaskApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub async fn health(&self) -> ApiResponse<HealthStatus> {
        self.request(Method::GET, "/health", None::<&()>).await
    }

    async fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> ApiResponse<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        match self.try_request(method, endpoint, body).await {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => {
                warn!("request to {} failed: {}", endpoint, e);
                ApiResponse::err(e.to_string())
            }
        }
    }

    async fn try_request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ClientError::Api(message));
        }

        // 204 carries no body; decode it as unit.
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        Ok(serde_json::from_slice(payload)?)
    }
}

#[async_trait]
impl TaskApi for TaskApiClient {
    async fn get_tasks(&self) -> ApiResponse<Vec<Task>> {
        self.request(Method::GET, "/tasks", None::<&()>).await
    }

    async fn create_task(&self, req: &NewTaskRequest) -> ApiResponse<Task> {
        self.request(Method::POST, "/tasks", Some(req)).await
    }

    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> ApiResponse<Task> {
        self.request(Method::PUT, &format!("/tasks/{id}"), Some(req))
            .await
    }

    async fn delete_task(&self, id: &str) -> ApiResponse<()> {
        self.request(Method::DELETE, &format!("/tasks/{id}"), None::<&()>)
            .await
    }
}
