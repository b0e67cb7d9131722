//! 看板筛选条件
//!
//! 筛选状态保存在 URL 查询串中，便于分享和收藏。
//! `TaskFilter` 与查询串之间是纯粹的双向序列化，不依赖任何 UI。

use crate::date::{date_key, parse_date_key};
use crate::{Priority, TaskStatus};
use chrono::NaiveDate;
use std::fmt;

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// 创建时间倒序（服务端默认）
    CreatedAt,
    /// 截止日期正序
    DueDate,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::CreatedAt, SortKey::DueDate];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::DueDate => "due_date",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(SortKey::CreatedAt),
            "due_date" => Some(SortKey::DueDate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "Newest first",
            SortKey::DueDate => "Due date",
        }
    }
}

/// 查询串中的筛选键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Status,
    Priority,
    Query,
    DueFrom,
    DueTo,
    Sort,
}

impl FilterKey {
    /// 编码顺序固定，保证同一筛选得到同一 URL
    pub const ALL: [FilterKey; 6] = [
        FilterKey::Status,
        FilterKey::Priority,
        FilterKey::Query,
        FilterKey::DueFrom,
        FilterKey::DueTo,
        FilterKey::Sort,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Status => "status",
            FilterKey::Priority => "priority",
            FilterKey::Query => "q",
            FilterKey::DueFrom => "due_from",
            FilterKey::DueTo => "due_to",
            FilterKey::Sort => "sort",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }
}

/// 看板筛选状态，所有字段可选
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub query: Option<String>,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub sort: Option<SortKey>,
}

impl TaskFilter {
    /// 截止日期范围两端都设为同一天
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            due_from: Some(day),
            due_to: Some(day),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }

    /// 读取某个键的字符串形式
    pub fn get(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Status => self.status.map(|s| s.as_str().to_string()),
            FilterKey::Priority => self.priority.map(|p| p.as_str().to_string()),
            FilterKey::Query => self
                .query
                .clone()
                .filter(|q| !q.trim().is_empty()),
            FilterKey::DueFrom => self.due_from.map(date_key),
            FilterKey::DueTo => self.due_to.map(date_key),
            FilterKey::Sort => self.sort.map(|s| s.as_str().to_string()),
        }
    }

    /// 设置某个键；空串或无法识别的值会清除该键
    ///
    /// 返回值表示该键最终是否被设置。
    pub fn set(&mut self, key: FilterKey, raw: &str) -> bool {
        let value = raw.trim();
        match key {
            FilterKey::Status => self.status = value.parse().ok(),
            FilterKey::Priority => self.priority = value.parse().ok(),
            FilterKey::Query => {
                self.query = if value.is_empty() {
                    None
                } else {
                    Some(raw.to_string())
                }
            }
            FilterKey::DueFrom => self.due_from = parse_date_key(value),
            FilterKey::DueTo => self.due_to = parse_date_key(value),
            FilterKey::Sort => self.sort = SortKey::parse(value),
        }
        let is_set = self.get(key).is_some();
        if !is_set && !value.is_empty() {
            tracing::debug!(key = key.as_str(), value, "ignoring unrecognised filter value");
        }
        is_set
    }

    pub fn clear(&mut self, key: FilterKey) {
        self.set(key, "");
    }

    /// 返回设置了 `key` 之后的新筛选
    pub fn with(&self, key: FilterKey, raw: &str) -> Self {
        let mut next = self.clone();
        next.set(key, raw);
        next
    }

    /// 非空的键值对，顺序固定
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        FilterKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key.as_str(), value)))
            .collect()
    }

    /// 编码为查询串（不含前导 `?`）
    pub fn to_query_string(&self) -> String {
        encode_pairs(
            self.to_query_pairs()
                .iter()
                .map(|(k, v)| (*k, v.as_str())),
        )
    }

    /// 列表接口的查询串：全部非空筛选 + 分页参数
    pub fn to_list_query(&self, page: u32, page_size: u32) -> String {
        let page = page.to_string();
        let page_size = page_size.to_string();
        let pairs = self.to_query_pairs();
        encode_pairs(
            pairs
                .iter()
                .map(|(k, v)| (*k, v.as_str()))
                .chain([("page", page.as_str()), ("page_size", page_size.as_str())]),
        )
    }

    /// 从查询串解析，允许带前导 `?`；未知键与非法值被忽略
    pub fn from_query_string(query: &str) -> Self {
        let mut filter = Self::default();
        for (key, value) in decode_pairs(query) {
            if let Some(key) = FilterKey::parse(&key) {
                filter.set(key, &value);
            }
        }
        filter
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// =========================================================
// 查询串编解码
// =========================================================

/// 按 `application/x-www-form-urlencoded` 规则编码
pub fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// 解码查询串为键值对，`+` 视为空格
pub fn decode_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (k, v) = part.split_once('=').unwrap_or((part, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn every_key_round_trips_through_the_query_string() {
        let cases = [
            (FilterKey::Status, "in_progress"),
            (FilterKey::Priority, "urgent"),
            (FilterKey::Query, "buy milk & eggs"),
            (FilterKey::DueFrom, "2026-10-01"),
            (FilterKey::DueTo, "2026-10-31"),
            (FilterKey::Sort, "due_date"),
        ];
        for (key, value) in cases {
            let filter = TaskFilter::default().with(key, value);
            let decoded = TaskFilter::from_query_string(&filter.to_query_string());
            assert_eq!(decoded.get(key).as_deref(), Some(value), "key {:?}", key);
            assert_eq!(decoded, filter);
        }
    }

    #[test]
    fn clearing_a_filter_removes_its_key() {
        let mut filter = TaskFilter::from_query_string("?status=done&q=report");
        filter.clear(FilterKey::Status);
        assert_eq!(filter.to_query_string(), "q=report");

        filter.set(FilterKey::Query, "   ");
        assert_eq!(filter.to_query_string(), "");
        assert!(filter.is_empty());
    }

    #[test]
    fn invalid_values_are_dropped() {
        let filter =
            TaskFilter::from_query_string("status=archived&priority=HIGH&due_from=tomorrow&x=1");
        assert!(filter.is_empty());
    }

    #[test]
    fn plus_and_percent_escapes_decode_to_text() {
        let filter = TaskFilter::from_query_string("q=quarterly+report%2Fdraft");
        assert_eq!(filter.query.as_deref(), Some("quarterly report/draft"));
    }

    #[test]
    fn list_query_includes_only_non_empty_filters_and_paging() {
        let filter = TaskFilter {
            priority: Some(Priority::High),
            query: Some("tax".into()),
            ..Default::default()
        };
        assert_eq!(
            filter.to_list_query(1, 50),
            "priority=high&q=tax&page=1&page_size=50"
        );
        assert_eq!(TaskFilter::default().to_list_query(1, 100), "page=1&page_size=100");
    }

    #[test]
    fn single_day_filter_sets_both_ends() {
        let filter = TaskFilter::for_day(d(2026, 10, 18));
        assert_eq!(
            filter.to_query_string(),
            "due_from=2026-10-18&due_to=2026-10-18"
        );
    }
}
