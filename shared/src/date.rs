//! 日期工具模块
//!
//! 提供看板与日历共用的日期计算：
//! - 日期键 (`YYYY-MM-DD`) 的解析与格式化
//! - 到期标记（今日到期 / 已逾期）
//! - 以周一为起点的月份网格

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer};

/// 月视图固定为 6 行 × 7 列
pub const GRID_CELLS: usize = 42;

const DATE_KEY_LEN: usize = 10;

// =========================================================
// 日期键
// =========================================================

/// 解析日期键，只看前 10 个字符
///
/// `"2026-10-18"` 与 `"2026-10-18T09:30:00Z"` 得到同一天。
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    let key = s.trim().get(..DATE_KEY_LEN)?;
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// 格式化为 `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 本地时区的今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// serde 辅助：把可选的日期或时间戳字符串解析成日期
pub fn deserialize_opt_date_key<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date_key(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s))),
    }
}

// =========================================================
// 到期标记
// =========================================================

/// 任务相对今天的到期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFlag {
    /// 未完成且截止日期早于今天
    Overdue,
    /// 未完成且今天到期
    DueToday,
    None,
}

impl DueFlag {
    pub fn evaluate(due: Option<NaiveDate>, done: bool, today: NaiveDate) -> Self {
        match due {
            Some(due) if !done && due < today => DueFlag::Overdue,
            Some(due) if !done && due == today => DueFlag::DueToday,
            _ => DueFlag::None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DueFlag::Overdue)
    }

    pub fn is_due_today(&self) -> bool {
        matches!(self, DueFlag::DueToday)
    }
}

// =========================================================
// 月份计算
// =========================================================

/// 所在月份的第一天
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 偏移 `delta` 个月，返回目标月份第一天
///
/// 超出 chrono 可表示范围时原样返回月初。
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let start = month_start(date);
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    shifted.unwrap_or(start)
}

/// 当天所在周的周一
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// 两个日期是否属于同一年同一月
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// 生成月视图网格
///
/// 从月初所在周的周一开始连续 42 天；自然网格不足 42 格时向后续周补齐。
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = week_start_monday(month_start(anchor));
    first.iter_days().take(GRID_CELLS).collect()
}
