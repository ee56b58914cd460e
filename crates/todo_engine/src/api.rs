use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use todo_logging::{todo_debug, todo_warn};
use url::Url;

use crate::types::{TaskBody, TodoListBody};
use crate::{ApiError, FailureKind, RemoteTask};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Service root; endpoint paths are appended to it.
    pub base_url: String,
    /// Owner of the task list.
    pub user: String,
    /// `None` leaves the connect phase unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://playground.4geeks.com/todo".to_string(),
            user: "julia12navio".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// Operations of the remote task service.
#[async_trait::async_trait]
pub trait TodoApi: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<RemoteTask>, ApiError>;

    async fn create_task(&self, label: &str) -> Result<(), ApiError>;

    async fn update_task(&self, id: &str, label: &str, is_done: bool) -> Result<(), ApiError>;

    async fn delete_task(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTodoApi {
    client: reqwest::Client,
    base_url: Url,
    user: String,
}

impl ReqwestTodoApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            user: settings.user,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<TaskBody<'_>>,
    ) -> Result<reqwest::Response, ApiError> {
        todo_debug!("{} {}", method, url);
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            let payload = serde_json::to_vec(&body)
                .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !is_success(status) {
            todo_warn!("{} {} failed with {}", method, url, status);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl TodoApi for ReqwestTodoApi {
    async fn list_tasks(&self) -> Result<Vec<RemoteTask>, ApiError> {
        let url = self.endpoint(&["users", self.user.as_str()])?;
        let response = self.send(Method::GET, url, None).await?;
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let body: TodoListBody = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::InvalidResponse, err.to_string()))?;
        todo_debug!("Fetched {} tasks for {}", body.todos.len(), self.user);
        Ok(body.todos)
    }

    async fn create_task(&self, label: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["todos", self.user.as_str()])?;
        let body = TaskBody {
            label,
            is_done: false,
        };
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    async fn update_task(&self, id: &str, label: &str, is_done: bool) -> Result<(), ApiError> {
        let url = self.endpoint(&["todos", id])?;
        self.send(Method::PUT, url, Some(TaskBody { label, is_done }))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["todos", id])?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}

fn is_success(status: StatusCode) -> bool {
    status == StatusCode::NO_CONTENT || status.is_success()
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> ReqwestTodoApi {
        ReqwestTodoApi::new(ApiSettings {
            base_url: base_url.to_string(),
            user: "sam".to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_segments_with_or_without_trailing_slash() {
        for base in ["https://api.example.com/todo", "https://api.example.com/todo/"] {
            let url = api(base).endpoint(&["users", "sam"]).unwrap();
            assert_eq!(url.as_str(), "https://api.example.com/todo/users/sam");
        }
    }

    #[test]
    fn endpoint_escapes_opaque_ids() {
        let url = api("https://api.example.com").endpoint(&["todos", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/todos/a%2Fb%20c");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = ReqwestTodoApi::new(ApiSettings {
            base_url: "not a url".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn rejects_non_base_url() {
        let err = ReqwestTodoApi::new(ApiSettings {
            base_url: "mailto:someone@example.com".to_string(),
            ..ApiSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
