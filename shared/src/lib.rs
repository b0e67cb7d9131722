//! TaskDeck 共享领域层
//!
//! 不依赖 DOM 的纯逻辑，前端与测试共用：
//! - 领域模型（任务、令牌、主题、统计）
//! - `protocol`: 接口定义
//! - `client`: 携带 Bearer 令牌的 API 客户端
//! - `filter` / `board` / `calendar` / `analytics` / `edit`: 视图背后的纯计算

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod analytics;
pub mod auth;
pub mod board;
pub mod calendar;
pub mod client;
pub mod config;
pub mod date;
pub mod debounce;
pub mod edit;
pub mod error;
pub mod filter;
pub mod protocol;
pub mod storage;

pub use client::{HttpClient, HttpRequest, HttpResponse, TaskApi};
pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use filter::TaskFilter;
pub use storage::{KeyValueStore, MemoryStore, ThemeStore, TokenStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKENS_KEY: &str = "tm_tokens";
pub const STORAGE_THEME_KEY: &str = "tm_theme";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub type TaskId = i64;

/// 枚举字符串解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 任务优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// 紧急程度权重，越小越靠前：urgent 0, high 1, medium 2, low 3
    pub fn urgency_weight(&self) -> u8 {
        match self {
            Priority::Urgent => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(ParseEnumError::new("priority", s)),
        }
    }
}

/// 任务状态，对应看板的三列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// 看板列标题
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            _ => Err(ParseEnumError::new("status", s)),
        }
    }
}

/// 任务
///
/// 由远端 API 持有，客户端只保存一份可能过期的副本。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// 只取日期部分，服务端若返回时间戳会被截断
    #[serde(default, deserialize_with = "date::deserialize_opt_date_key")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// 相对 `today` 的到期标记
    pub fn due_flag(&self, today: NaiveDate) -> date::DueFlag {
        date::DueFlag::evaluate(self.due_date, self.is_done(), today)
    }
}

/// 分页列表响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskPage {
    pub items: Vec<Task>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

/// 创建任务请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: Priority::default(),
        }
    }
}

/// 局部更新请求体
///
/// 外层 `None` 表示不发送该字段；`Some(None)` 表示显式置空。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// 仅修改状态
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 把补丁应用到本地副本（乐观更新用）
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

/// 访问令牌对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }

    /// 访问令牌非空才视为有效
    pub fn has_access(&self) -> bool {
        !self.access.is_empty()
    }
}

/// 登录/注册凭据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// 统计摘要（服务端预先计算）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub done: u64,
    #[serde(default)]
    pub overdue: u64,
}

/// 主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn task_decodes_server_shape_and_truncates_timestamp_due_date() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Write report",
            "description": null,
            "due_date": "2026-10-20T00:00:00",
            "priority": "urgent",
            "status": "in_progress",
            "created_at": "2026-10-01T10:00:00",
            "updated_at": "2026-10-01T10:00:00",
            "completed_at": null
        }))
        .unwrap();

        assert_eq!(task.id, 7);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 20));
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn task_defaults_missing_priority_and_status() {
        let task: Task = serde_json::from_value(json!({"id": 1, "title": "t"})).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn parsing_unknown_wire_names_reports_the_value() {
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert_eq!("urgent".parse::<Priority>(), Ok(Priority::Urgent));

        let err = "blocked".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err, ParseEnumError::new("status", "blocked"));
        assert_eq!(err.to_string(), "unknown status: \"blocked\"");
        assert_eq!(
            "Urgent".parse::<Priority>().unwrap_err().to_string(),
            "unknown priority: \"Urgent\""
        );
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch = TaskPatch {
            description: Some(None),
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({"description": null, "status": "done"}));
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut task: Task = serde_json::from_value(json!({
            "id": 1, "title": "old", "description": "keep", "priority": "low"
        }))
        .unwrap();
        TaskPatch {
            title: Some("new".into()),
            due_date: Some(NaiveDate::from_ymd_opt(2026, 1, 2)),
            ..Default::default()
        }
        .apply_to(&mut task);

        assert_eq!(task.title, "new");
        assert_eq!(task.description.as_deref(), Some("keep"));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 1, 2));
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn new_task_defaults_to_medium_priority() {
        let value = serde_json::to_value(NewTask::new("Buy milk")).unwrap();
        assert_eq!(value, json!({"title": "Buy milk", "priority": "medium"}));
    }

    #[test]
    fn urgency_weights_are_ordered() {
        let mut all = Priority::ALL;
        all.sort_by_key(Priority::urgency_weight);
        assert_eq!(
            all,
            [Priority::Urgent, Priority::High, Priority::Medium, Priority::Low]
        );
    }
}
