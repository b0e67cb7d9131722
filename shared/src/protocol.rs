use crate::error::{ApiError, ApiResult};
use crate::filter::{TaskFilter, encode_pairs};
use crate::{AnalyticsSummary, Credentials, NewTask, Task, TaskId, TaskPage, TaskPatch, TokenPair};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded request body together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(String),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> ApiResult<Self> {
        serde_json::to_string(value)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }

    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Form(_) => Some("application/x-www-form-urlencoded"),
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(s) | RequestBody::Form(s) => Some(s),
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, including any query string.
    fn path(&self) -> String;

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }

    /// Decode a successful response body.
    fn decode(body: &str) -> ApiResult<Self::Response> {
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// List tasks, filtered and paginated
#[derive(Debug, Clone)]
pub struct ListTasksRequest {
    pub filter: TaskFilter,
    pub page: u32,
    pub page_size: u32,
}

impl ApiRequest for ListTasksRequest {
    type Response = TaskPage;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/api/tasks/?{}",
            self.filter.to_list_query(self.page, self.page_size)
        )
    }
}

/// Create a task
#[derive(Debug, Clone)]
pub struct CreateTaskRequest(pub NewTask);

impl ApiRequest for CreateTaskRequest {
    type Response = Task;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/tasks/".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(&self.0)
    }
}

/// Partially update a task
#[derive(Debug, Clone)]
pub struct UpdateTaskRequest {
    pub id: TaskId,
    pub patch: TaskPatch,
}

impl ApiRequest for UpdateTaskRequest {
    type Response = Task;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/tasks/{}", self.id)
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(&self.patch)
    }
}

/// Delete a task
#[derive(Debug, Clone)]
pub struct DeleteTaskRequest {
    pub id: TaskId,
}

impl ApiRequest for DeleteTaskRequest {
    type Response = (); // 204, no body
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/tasks/{}", self.id)
    }

    fn decode(_body: &str) -> ApiResult<()> {
        Ok(())
    }
}

/// Log in with form-encoded credentials
#[derive(Debug, Clone)]
pub struct LoginRequest(pub Credentials);

impl ApiRequest for LoginRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Form(encode_pairs([
            ("username", self.0.email.trim()),
            ("password", self.0.password.as_str()),
        ])))
    }
}

/// Register a new account with JSON credentials.
///
/// Some deployments answer with a token pair, others with the created user;
/// the raw JSON is returned and interpreted by the client.
#[derive(Debug, Clone)]
pub struct RegisterRequest(pub Credentials);

impl ApiRequest for RegisterRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/register".to_string()
    }

    fn body(&self) -> ApiResult<RequestBody> {
        RequestBody::json(&Credentials::new(self.0.email.trim(), self.0.password.clone()))
    }

    fn decode(body: &str) -> ApiResult<serde_json::Value> {
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Fetch the precomputed analytics summary
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsSummaryRequest;

impl ApiRequest for AnalyticsSummaryRequest {
    type Response = AnalyticsSummary;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/analytics/summary".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskStatus;

    #[test]
    fn login_body_is_form_encoded() {
        let req = LoginRequest(Credentials::new(" demo@example.com ", "p@ss word"));
        let body = req.body().unwrap();
        assert_eq!(body.content_type(), Some("application/x-www-form-urlencoded"));
        assert_eq!(
            body.into_string().as_deref(),
            Some("username=demo%40example.com&password=p%40ss%20word")
        );
    }

    #[test]
    fn update_path_and_body() {
        let req = UpdateTaskRequest {
            id: 42,
            patch: TaskPatch::status(TaskStatus::InProgress),
        };
        assert_eq!(req.path(), "/api/tasks/42");
        assert_eq!(UpdateTaskRequest::METHOD, HttpMethod::Patch);
        assert_eq!(
            req.body().unwrap(),
            RequestBody::Json(r#"{"status":"in_progress"}"#.to_string())
        );
    }

    #[test]
    fn delete_ignores_empty_body() {
        assert_eq!(DeleteTaskRequest::decode(""), Ok(()));
        assert_eq!(DeleteTaskRequest { id: 3 }.body(), Ok(RequestBody::Empty));
    }
}
