//! 任务服务的 HTTP 客户端
//!
//! `HttpClient` 是对底层传输的抽象：浏览器里由 fetch 实现，测试里由
//! `MockHttpClient` 实现。`TaskApi` 负责拼接 URL、附加 Bearer 令牌、
//! 把非 2xx 响应转换为 `ApiError`。

use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    AnalyticsSummaryRequest, ApiRequest, CreateTaskRequest, DeleteTaskRequest, HttpMethod,
    ListTasksRequest, LoginRequest, RegisterRequest, UpdateTaskRequest,
};
use crate::storage::{KeyValueStore, TokenStore};
use crate::{
    AnalyticsSummary, Credentials, HEADER_AUTHORIZATION, NewTask, Task, TaskFilter, TaskId,
    TaskPage, TaskPatch, TaskStatus, TokenPair,
};
use std::collections::HashMap;

#[cfg(test)]
mod tests;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 业务层: TaskApi
// =========================================================

/// 任务服务客户端
///
/// 令牌从 `TokenStore` 读取，每次请求前重新读取，
/// 因此登录/注销后无需重建客户端。
#[derive(Clone)]
pub struct TaskApi<C, S> {
    base_url: String,
    http: C,
    tokens: TokenStore<S>,
}

impl<C: HttpClient, S: KeyValueStore> TaskApi<C, S> {
    pub fn new(base_url: &str, http: C, tokens: TokenStore<S>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送一个接口请求并解码响应
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let url = self.url(&request.path());
        let body = request.body()?;

        let mut req = HttpRequest::new(&url, R::METHOD);
        if let Some(content_type) = body.content_type() {
            req = req.with_header("Content-Type", content_type);
        }
        if let Some(token) = self.tokens.access_token() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = body.into_string() {
            req = req.with_body(body);
        }

        tracing::debug!(method = %R::METHOD, %url, "sending request");
        let resp = self.http.send(req).await.inspect_err(|e| {
            tracing::warn!(method = %R::METHOD, %url, error = %e, "request did not complete");
        })?;

        if !resp.is_success() {
            let err = ApiError::from_response(resp.status, &resp.body);
            tracing::warn!(
                method = %R::METHOD,
                %url,
                status = resp.status,
                detail = err.detail().unwrap_or_default(),
                "request rejected"
            );
            return Err(err);
        }

        R::decode(&resp.body)
    }

    // --- 任务 ---

    /// 读取第一页任务
    pub async fn list_tasks(&self, filter: &TaskFilter, page_size: u32) -> ApiResult<TaskPage> {
        self.execute(&ListTasksRequest {
            filter: filter.clone(),
            page: 1,
            page_size,
        })
        .await
    }

    pub async fn create_task(&self, task: NewTask) -> ApiResult<Task> {
        self.execute(&CreateTaskRequest(task)).await
    }

    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> ApiResult<Task> {
        self.execute(&UpdateTaskRequest { id, patch }).await
    }

    pub async fn set_status(&self, id: TaskId, status: TaskStatus) -> ApiResult<Task> {
        self.update_task(id, TaskPatch::status(status)).await
    }

    pub async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        self.execute(&DeleteTaskRequest { id }).await
    }

    // --- 认证 ---

    /// 登录并持久化令牌
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<TokenPair> {
        let tokens = self.execute(&LoginRequest(credentials.clone())).await?;
        if !tokens.has_access() {
            return Err(ApiError::Decode("login response carried no access token".into()));
        }
        self.tokens.save(&tokens);
        tracing::info!("signed in");
        Ok(tokens)
    }

    /// 注册；响应里带令牌则直接使用，否则用同一组凭据登录
    pub async fn register(&self, credentials: &Credentials) -> ApiResult<TokenPair> {
        let body = self.execute(&RegisterRequest(credentials.clone())).await?;
        match serde_json::from_value::<TokenPair>(body) {
            Ok(tokens) if tokens.has_access() => {
                self.tokens.save(&tokens);
                tracing::info!("registered with issued tokens");
                Ok(tokens)
            }
            _ => {
                tracing::debug!("register response carried no tokens, signing in");
                self.login(credentials).await
            }
        }
    }

    pub fn logout(&self) {
        self.tokens.clear();
        tracing::info!("signed out");
    }

    // --- 统计 ---

    pub async fn analytics_summary(&self) -> ApiResult<AnalyticsSummary> {
        self.execute(&AnalyticsSummaryRequest).await
    }
}
