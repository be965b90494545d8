//! HTTP client for the todo service.
//!
//! Wraps the `/api/v1` endpoints using [`reqwest`], sending the bearer token
//! on every request.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use todo_core::filter::TodoFilter;
use todo_core::todo::{Todo, TodoCreateOptions, TodoUpdateOptions};
use todo_core::types::TodoId;

/// Per-request timeout applied by [`TodoClient::new`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the todo client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, timeout, undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("todo API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// The status of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(err) => err.status(),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct VersionBody {
    version: String,
}

/// Client for one todo service instance.
#[derive(Debug, Clone)]
pub struct TodoClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl TodoClient {
    /// Create a client.
    ///
    /// * `base_url` - Service root, e.g. `http://localhost:7836`.
    /// * `token` - Shared bearer token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `GET /api/v1/todos`, narrowed by `filters`.
    pub async fn list_todos(&self, filters: &[TodoFilter]) -> Result<Vec<Todo>, ClientError> {
        let query: Vec<(&str, String)> = filters.iter().map(TodoFilter::query_pair).collect();
        let request = self.request(Method::GET, "/todos").query(&query);
        Self::parse_response(request.send().await?).await
    }

    /// `GET /api/v1/todos/{id}`
    pub async fn get_todo(&self, id: TodoId) -> Result<Todo, ClientError> {
        let request = self.request(Method::GET, &format!("/todos/{id}"));
        Self::parse_response(request.send().await?).await
    }

    /// `POST /api/v1/todos`
    pub async fn create_todo(&self, opts: &TodoCreateOptions) -> Result<Todo, ClientError> {
        let request = self.request(Method::POST, "/todos").json(opts);
        Self::parse_response(request.send().await?).await
    }

    /// `PATCH /api/v1/todos/{id}`. Only the fields set in `opts` are sent.
    pub async fn update_todo(
        &self,
        id: TodoId,
        opts: &TodoUpdateOptions,
    ) -> Result<Todo, ClientError> {
        let request = self.request(Method::PATCH, &format!("/todos/{id}")).json(opts);
        Self::parse_response(request.send().await?).await
    }

    /// `DELETE /api/v1/todos/{id}`. Succeeds for ids that do not exist.
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/todos/{id}"));
        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    /// `GET /api/v1/version`
    pub async fn version(&self) -> Result<String, ClientError> {
        let request = self.request(Method::GET, "/version");
        let body: VersionBody = Self::parse_response(request.send().await?).await?;
        Ok(body.version)
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/api/v1{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], taking the message
    /// from the `{"error": ...}` body when there is one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { error }) => error,
            Err(_) => body,
        };
        tracing::debug!(%status, %message, "todo API request failed");

        Err(ClientError::Api { status, message })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }
}
