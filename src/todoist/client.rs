use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api::TodoistApi;
use super::error::{ApiError, ApiResult};
use super::models::{CreateTaskRequest, Paginated, Project, Task, UpdateTaskRequest};

/// Base URL of the Todoist API v1.
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/api/v1";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Todoist REST API.
///
/// Wraps a pooled `reqwest::Client`; cloning the underlying client is cheap,
/// so one instance is shared by every request handler.
pub struct TodoistClient {
    base_url: String,
    base: Url,
    token: String,
    client: Client,
}

impl TodoistClient {
    /// Create a new client.
    ///
    /// Trailing slashes on `base_url` are dropped. The URL must be absolute
    /// and able to carry a path.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ApiResult<Self> {
        // reqwest is built without a bundled crypto provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Client { source })?;

        Ok(Self {
            base_url,
            base,
            token: token.into(),
            client,
        })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder with the bearer token attached.
    ///
    /// Every entry of `segments` becomes exactly one percent-encoded path
    /// segment below the base URL.
    fn request(&self, method: Method, segments: &[&str]) -> ApiResult<RequestBuilder> {
        // url drops "." and ".." segments instead of encoding them
        if let Some(id) = segments
            .iter()
            .find(|s| matches!(**s, "" | "." | ".."))
        {
            return Err(ApiError::InvalidId { id: id.to_string() });
        }

        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        debug!(%method, path = url.path(), "todoist request");
        Ok(self.client.request(method, url).bearer_auth(&self.token))
    }

    /// Execute a request and return the raw body when the status matches.
    ///
    /// The response is consumed on every path, so the connection goes back
    /// to the pool whether or not the status matched.
    async fn send(&self, builder: RequestBuilder, expected: StatusCode) -> ApiResult<Vec<u8>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != expected {
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        expected: StatusCode,
    ) -> ApiResult<T> {
        let body = self.send(builder, expected).await?;
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { source })
    }

    /// Fetch the first page of a v1 collection endpoint.
    async fn send_page<T: DeserializeOwned + Default>(
        &self,
        builder: RequestBuilder,
    ) -> ApiResult<Vec<T>> {
        let page: Paginated<T> = self.send_json(builder, StatusCode::OK).await?;
        if let Some(cursor) = page.next_cursor.as_deref() {
            debug!(cursor, "ignoring further pages");
        }
        Ok(page.results)
    }
}

impl TodoistApi for TodoistClient {
    async fn get_tasks(
        &self,
        project_id: Option<&str>,
        filter: Option<&str>,
    ) -> ApiResult<Vec<Task>> {
        let filter = filter.filter(|f| !f.is_empty());
        let project_id = project_id.filter(|p| !p.is_empty());

        // Filters use a separate endpoint in API v1
        let builder = match (filter, project_id) {
            (Some(query), _) => self
                .request(Method::GET, &["tasks", "filter"])?
                .query(&[("query", query)]),
            (None, Some(project_id)) => self
                .request(Method::GET, &["tasks"])?
                .query(&[("project_id", project_id)]),
            (None, None) => self.request(Method::GET, &["tasks"])?,
        };

        self.send_page(builder).await
    }

    async fn get_task(&self, id: &str) -> ApiResult<Task> {
        let builder = self.request(Method::GET, &["tasks", id])?;
        self.send_json(builder, StatusCode::OK).await
    }

    async fn create_task(&self, req: &CreateTaskRequest) -> ApiResult<Task> {
        let builder = self.request(Method::POST, &["tasks"])?.json(req);
        self.send_json(builder, StatusCode::OK).await
    }

    async fn update_task(&self, id: &str, req: &UpdateTaskRequest) -> ApiResult<Task> {
        let builder = self
            .request(Method::POST, &["tasks", id])?
            .json(req);
        self.send_json(builder, StatusCode::OK).await
    }

    async fn close_task(&self, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::POST, &["tasks", id, "close"])?;
        self.send(builder, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    async fn reopen_task(&self, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::POST, &["tasks", id, "reopen"])?;
        self.send(builder, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    async fn delete_task(&self, id: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, &["tasks", id])?;
        self.send(builder, StatusCode::NO_CONTENT).await.map(|_| ())
    }

    async fn get_projects(&self) -> ApiResult<Vec<Project>> {
        let builder = self.request(Method::GET, &["projects"])?;
        self.send_page(builder).await
    }

    async fn get_project(&self, id: &str) -> ApiResult<Project> {
        let builder = self.request(Method::GET, &["projects", id])?;
        self.send_json(builder, StatusCode::OK).await
    }
}
