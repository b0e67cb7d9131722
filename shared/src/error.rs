use serde_json::Value;
use thiserror::Error;

// =========================================================
// 兜底提示文案
// =========================================================

/// 服务端未给出 `detail` 时展示的提示
pub mod fallback {
    pub const LOAD_TASKS: &str = "Failed to load tasks";
    pub const ADD_TASK: &str = "Failed to add task";
    pub const UPDATE_TASK: &str = "Failed to update task";
    pub const DELETE_TASK: &str = "Failed to delete task";
    pub const SAVE_TASK: &str = "Failed to save task";
    pub const LOAD_ANALYTICS: &str = "Failed to load analytics";
    pub const LOGIN: &str = "Login failed";
    pub const SIGNUP: &str = "Sign up failed";
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// 所有失败都只在本地展示，不重试。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 请求未能到达服务端
    #[error("network error: {0}")]
    Network(String),
    /// 服务端返回非 2xx
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    /// 响应体无法解析
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// 请求体无法序列化
    #[error("failed to encode request: {0}")]
    Encode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 根据非 2xx 响应构造错误，尽量提取服务端的 `detail`
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: extract_detail(body),
        }
    }

    /// 服务端提供的说明
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// 面向用户的提示：优先服务端 `detail`，否则使用兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// 从响应体中提取 `detail`
///
/// 支持两种形态：
/// - `{"detail": "Task not found"}`
/// - `{"detail": [{"msg": "..."}, ...]}`（字段校验错误，多条以 `; ` 连接）
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
