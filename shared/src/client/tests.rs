use super::*;
use crate::storage::MemoryStore;
use crate::{Priority, TaskStatus};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

const BASE: &str = "http://api.test";

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 克隆后共享同一份响应表与请求记录
#[derive(Clone, Default)]
struct MockHttpClient {
    // ("METHOD url", (Status, Response Body))
    responses: Rc<RefCell<HashMap<String, (u16, String)>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockHttpClient {
    fn new() -> Self {
        Self::default()
    }

    fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.mock_raw(method, url, status, &body.to_string());
    }

    fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(format!("{method} {url}"), (status, body.to_string()));
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let key = format!("{} {}", req.method, req.url);
        self.requests.borrow_mut().push(req);

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Err(ApiError::Network(format!("no route for {key}")))
        }
    }
}

// =========================================================
// 辅助函数
// =========================================================

fn create_api() -> (TaskApi<MockHttpClient, MemoryStore>, MockHttpClient, MemoryStore) {
    let http = MockHttpClient::new();
    let store = MemoryStore::new();
    let api = TaskApi::new(
        &format!("{BASE}/"),
        http.clone(),
        TokenStore::new(store.clone()),
    );
    (api, http, store)
}

fn task_json(id: i64, title: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "due_date": null,
        "priority": "medium",
        "status": status,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-01T10:00:00",
        "completed_at": null
    })
}

fn empty_page() -> serde_json::Value {
    json!({ "items": [], "total": 0, "page": 1, "page_size": 50 })
}

// =========================================================
// 认证
// =========================================================

#[tokio::test]
async fn test_login_stores_tokens_and_authorizes_requests() {
    let (api, http, store) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/login",
        200,
        json!({ "access": "tok-1", "refresh": "ref-1" }),
    );
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/tasks/?page=1&page_size=50",
        200,
        empty_page(),
    );

    assert!(!api.is_authenticated());
    let tokens = api
        .login(&Credentials::new("demo@example.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(tokens.access, "tok-1");
    assert!(api.is_authenticated());
    assert!(store.get(crate::STORAGE_TOKENS_KEY).is_some());
    assert_eq!(api.tokens().load(), Some(tokens));

    // 登录请求是表单编码，且不带令牌
    let login = &http.requests()[0];
    assert_eq!(
        login.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(login.header(HEADER_AUTHORIZATION), None);
    assert_eq!(
        login.body.as_deref(),
        Some("username=demo%40example.com&password=secret1")
    );

    api.list_tasks(&TaskFilter::default(), 50).await.unwrap();
    assert_eq!(
        http.last_request().header(HEADER_AUTHORIZATION),
        Some("Bearer tok-1")
    );
}

#[tokio::test]
async fn test_logout_drops_authorization_header() {
    let (api, http, store) = create_api();
    TokenStore::new(store.clone()).save(&TokenPair::new("tok-2", None));
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/analytics/summary",
        200,
        json!({ "active": 1, "done": 2, "overdue": 0 }),
    );

    api.analytics_summary().await.unwrap();
    assert_eq!(
        http.last_request().header(HEADER_AUTHORIZATION),
        Some("Bearer tok-2")
    );

    api.logout();
    assert!(!api.is_authenticated());
    assert_eq!(store.get(crate::STORAGE_TOKENS_KEY), None);

    api.analytics_summary().await.unwrap();
    assert_eq!(http.last_request().header(HEADER_AUTHORIZATION), None);
}

#[tokio::test]
async fn test_login_failure_surfaces_detail_and_keeps_state() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/login",
        401,
        json!({ "detail": "Incorrect email or password" }),
    );

    let err = api
        .login(&Credentials::new("demo@example.com", "wrong"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(crate::auth::login_error_message(&err), "Incorrect email or password");
    assert!(!api.is_authenticated());
}

#[tokio::test]
async fn test_register_uses_issued_tokens() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/register",
        201,
        json!({ "access": "fresh", "refresh": null }),
    );

    let tokens = api
        .register(&Credentials::new("new@example.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(tokens.access, "fresh");
    assert_eq!(http.requests().len(), 1);

    let req = http.last_request();
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "new@example.com", "password": "secret1" }));
}

#[tokio::test]
async fn test_register_without_tokens_falls_back_to_login() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/register",
        201,
        json!({ "id": 7, "email": "new@example.com" }),
    );
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/login",
        200,
        json!({ "access": "after-login" }),
    );

    let tokens = api
        .register(&Credentials::new("new@example.com", "secret1"))
        .await
        .unwrap();
    assert_eq!(tokens.access, "after-login");
    assert_eq!(http.requests().len(), 2);
    assert!(api.is_authenticated());
}

#[tokio::test]
async fn test_register_taken_email_message() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/auth/register",
        400,
        json!({ "detail": "Email already registered" }),
    );

    let err = api
        .register(&Credentials::new("taken@example.com", "secret1"))
        .await
        .unwrap_err();
    assert_eq!(
        crate::auth::signup_error_message(&err),
        crate::auth::EMAIL_TAKEN_MESSAGE
    );
    assert_eq!(http.requests().len(), 1);
}

// =========================================================
// 任务
// =========================================================

#[tokio::test]
async fn test_create_task_defaults_to_todo_medium() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Post,
        "http://api.test/api/tasks/",
        201,
        task_json(1, "Buy milk", "todo"),
    );

    let task = api.create_task(NewTask::new("Buy milk")).await.unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.priority, Priority::Medium);

    let body: serde_json::Value =
        serde_json::from_str(http.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "title": "Buy milk", "priority": "medium" }));
}

#[tokio::test]
async fn test_list_tasks_sends_filters_and_paging() {
    let (api, http, _) = create_api();
    let filter = TaskFilter::from_query_string("status=todo&q=milk&sort=due_date");
    http.mock_response(
        HttpMethod::Get,
        "http://api.test/api/tasks/?status=todo&q=milk&sort=due_date&page=1&page_size=100",
        200,
        json!({
            "items": [task_json(1, "Buy milk", "todo")],
            "total": 1,
            "page": 1,
            "page_size": 100
        }),
    );

    let page = api.list_tasks(&filter, 100).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Buy milk");
    assert_eq!(http.last_request().method, HttpMethod::Get);
    assert_eq!(http.last_request().body, None);
}

#[tokio::test]
async fn test_set_status_patches_only_status() {
    let (api, http, _) = create_api();
    http.mock_response(
        HttpMethod::Patch,
        "http://api.test/api/tasks/1",
        200,
        task_json(1, "Buy milk", "in_progress"),
    );

    let task = api.set_status(1, TaskStatus::InProgress).await.unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(
        http.last_request().body.as_deref(),
        Some(r#"{"status":"in_progress"}"#)
    );
}

#[tokio::test]
async fn test_delete_accepts_empty_response() {
    let (api, http, _) = create_api();
    http.mock_raw(HttpMethod::Delete, "http://api.test/api/tasks/9", 204, "");

    api.delete_task(9).await.unwrap();
    assert_eq!(http.last_request().method, HttpMethod::Delete);
}

#[tokio::test]
async fn test_error_without_detail_uses_fallback() {
    let (api, http, _) = create_api();
    http.mock_raw(
        HttpMethod::Patch,
        "http://api.test/api/tasks/3",
        500,
        "Internal Server Error",
    );

    let err = api
        .update_task(3, TaskPatch::status(TaskStatus::Done))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.user_message(crate::error::fallback::UPDATE_TASK),
        "Failed to update task"
    );
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    let (api, _, _) = create_api();
    let err = api.analytics_summary().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message("Failed to load analytics"), "Failed to load analytics");
}
