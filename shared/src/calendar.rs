//! 日历月视图
//!
//! 按截止日期把任务分桶，日内按紧急程度排序，再铺到 6×7 的月份网格上。

use crate::date::{self, DueFlag};
use crate::{Priority, Task, TaskId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 日历一次拉取的任务上限，不受看板筛选影响
pub const CALENDAR_PAGE_SIZE: u32 = 100;
/// 单元格内最多展示的任务数
pub const PREVIEW_LIMIT: usize = 3;
pub const TITLE_PREVIEW_CHARS: usize = 18;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 日期 -> 当天任务
pub type DayBuckets = BTreeMap<NaiveDate, Vec<Task>>;

/// 按截止日期分桶
///
/// 无截止日期的任务不进入任何桶；桶内按优先级权重稳定排序。
pub fn bucket_by_due_date(tasks: &[Task]) -> DayBuckets {
    let mut buckets = DayBuckets::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            buckets.entry(due).or_default().push(task.clone());
        }
    }
    for day in buckets.values_mut() {
        day.sort_by_key(|t| t.priority.urgency_weight());
    }
    buckets
}

/// 某天未完成的任务（单元格与详情面板只展示这些）
pub fn open_tasks_on(buckets: &DayBuckets, day: NaiveDate) -> Vec<Task> {
    buckets
        .get(&day)
        .map(|tasks| tasks.iter().filter(|t| !t.is_done()).cloned().collect())
        .unwrap_or_default()
}

/// 按字符截断，超出部分以 `…` 结尾
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    }
}

/// 日期详情里每个任务的附加信息行：状态、优先级、截止日期
pub fn detail_meta(task: &Task) -> Vec<String> {
    let mut meta = vec![
        format!("Status: {}", task.status.label()),
        format!("Priority: {}", task.priority),
    ];
    if let Some(due) = task.due_date {
        meta.push(format!("Due: {}", date::date_key(due)));
    }
    meta
}

// =========================================================
// 网格
// =========================================================

/// 单元格里的任务徽标
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChip {
    pub id: TaskId,
    pub label: String,
    pub tooltip: Option<String>,
    pub priority: Priority,
}

impl From<&Task> for TaskChip {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            label: truncate_chars(&task.title, TITLE_PREVIEW_CHARS),
            tooltip: task.description.clone(),
            priority: task.priority,
        }
    }
}

/// 网格中的一天
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// 是否属于当前展示的月份（否则淡化）
    pub in_month: bool,
    pub is_today: bool,
    pub chips: Vec<TaskChip>,
    /// 超出预览数量的任务数
    pub more: usize,
    /// 早于今天且仍有未完成任务
    pub has_overdue: bool,
}

impl DayCell {
    pub fn key(&self) -> String {
        date::date_key(self.date)
    }
}

/// 月视图
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    /// 当前月份第一天
    pub month: NaiveDate,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    pub fn build(anchor: NaiveDate, today: NaiveDate, buckets: &DayBuckets) -> Self {
        let month = date::month_start(anchor);
        let cells = date::month_grid(anchor)
            .into_iter()
            .map(|day| {
                let open = open_tasks_on(buckets, day);
                DayCell {
                    date: day,
                    in_month: date::same_month(day, month),
                    is_today: day == today,
                    chips: open.iter().take(PREVIEW_LIMIT).map(TaskChip::from).collect(),
                    more: open.len().saturating_sub(PREVIEW_LIMIT),
                    has_overdue: !open.is_empty()
                        && DueFlag::evaluate(Some(day), false, today).is_overdue(),
                }
            })
            .collect();
        Self { month, cells }
    }

    /// 例如 "October 2026"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(WEEKDAY_LABELS.len())
    }
}

// =========================================================
// 导航
// =========================================================

/// 月份导航动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarNav {
    Previous,
    Next,
    Today,
}

impl CalendarNav {
    /// 键盘快捷键：← 上月，→ 下月，T 回到今天
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(CalendarNav::Previous),
            "ArrowRight" => Some(CalendarNav::Next),
            k if k.eq_ignore_ascii_case("t") => Some(CalendarNav::Today),
            _ => None,
        }
    }

    /// 返回新的锚点日期
    pub fn apply(&self, anchor: NaiveDate, today: NaiveDate) -> NaiveDate {
        match self {
            CalendarNav::Previous => date::shift_months(anchor, -1),
            CalendarNav::Next => date::shift_months(anchor, 1),
            CalendarNav::Today => today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskStatus;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: TaskId, due: Option<NaiveDate>, priority: Priority, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: None,
            due_date: due,
            priority,
            status,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn detail_meta_lists_status_priority_and_due() {
        let dated = task(1, Some(d(2026, 10, 18)), Priority::High, TaskStatus::InProgress);
        assert_eq!(
            detail_meta(&dated),
            vec!["Status: In Progress", "Priority: high", "Due: 2026-10-18"]
        );

        let undated = task(2, None, Priority::Low, TaskStatus::Todo);
        assert_eq!(detail_meta(&undated), vec!["Status: To Do", "Priority: low"]);
    }

    #[test]
    fn each_dated_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            task(1, Some(d(2026, 10, 3)), Priority::Low, TaskStatus::Todo),
            task(2, None, Priority::High, TaskStatus::Todo),
            task(3, Some(d(2026, 10, 3)), Priority::Urgent, TaskStatus::Done),
            task(4, Some(d(2026, 11, 1)), Priority::Medium, TaskStatus::InProgress),
        ];
        let buckets = bucket_by_due_date(&tasks);

        let placed: Vec<TaskId> = buckets.values().flatten().map(|t| t.id).collect();
        assert_eq!(placed.len(), 3);
        assert!(!placed.contains(&2));
        for t in tasks.iter().filter(|t| t.due_date.is_some()) {
            let bucket = &buckets[&t.due_date.unwrap()];
            assert_eq!(bucket.iter().filter(|b| b.id == t.id).count(), 1);
        }
    }

    #[test]
    fn day_is_ordered_by_urgency() {
        let day = d(2026, 10, 18);
        let tasks = vec![
            task(1, Some(day), Priority::Low, TaskStatus::Todo),
            task(2, Some(day), Priority::Medium, TaskStatus::Todo),
            task(3, Some(day), Priority::Urgent, TaskStatus::Todo),
            task(4, Some(day), Priority::High, TaskStatus::Todo),
            task(5, Some(day), Priority::Urgent, TaskStatus::Todo),
        ];
        let bucket = &bucket_by_due_date(&tasks)[&day];
        let weights: Vec<u8> = bucket.iter().map(|t| t.priority.urgency_weight()).collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(bucket.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 5, 4, 2, 1]);
    }

    #[test]
    fn cells_preview_open_tasks_and_flag_overdue() {
        let today = d(2026, 10, 18);
        let past = d(2026, 10, 10);
        let mut tasks: Vec<Task> = (1..=5)
            .map(|id| task(id, Some(past), Priority::Medium, TaskStatus::Todo))
            .collect();
        tasks.push(task(6, Some(past), Priority::Urgent, TaskStatus::Done));
        tasks.push(task(7, Some(d(2026, 10, 12)), Priority::Low, TaskStatus::Done));

        let view = MonthView::build(today, today, &bucket_by_due_date(&tasks));
        let cell = view.cells.iter().find(|c| c.date == past).unwrap();
        assert_eq!(cell.chips.len(), PREVIEW_LIMIT);
        assert_eq!(cell.more, 2);
        assert!(cell.has_overdue);

        // 只有已完成任务的日子不算逾期
        let done_only = view.cells.iter().find(|c| c.date == d(2026, 10, 12)).unwrap();
        assert!(done_only.chips.is_empty());
        assert!(!done_only.has_overdue);

        let today_cell = view.cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today_cell.date, today);
        assert_eq!(view.title(), "October 2026");
        assert_eq!(view.weeks().count(), 6);
        assert!(!view.cells[0].in_month);
    }

    #[test]
    fn chip_titles_are_truncated() {
        let mut t = task(1, None, Priority::Low, TaskStatus::Todo);
        t.title = "Prepare the quarterly budget review".into();
        assert_eq!(TaskChip::from(&t).label, "Prepare the quarte…");
        assert_eq!(truncate_chars("short", 18), "short");
    }

    #[test]
    fn keyboard_navigation() {
        let today = d(2026, 10, 18);
        let anchor = d(2026, 1, 15);
        assert_eq!(CalendarNav::from_key("ArrowLeft"), Some(CalendarNav::Previous));
        assert_eq!(CalendarNav::from_key("T"), Some(CalendarNav::Today));
        assert_eq!(CalendarNav::from_key("x"), None);
        assert_eq!(CalendarNav::Previous.apply(anchor, today), d(2025, 12, 1));
        assert_eq!(CalendarNav::Next.apply(anchor, today), d(2026, 2, 1));
        assert_eq!(CalendarNav::Today.apply(anchor, today), today);
    }

    #[test]
    fn open_tasks_skip_done() {
        let day = d(2026, 10, 18);
        let tasks = vec![
            task(1, Some(day), Priority::Low, TaskStatus::Done),
            task(2, Some(day), Priority::Low, TaskStatus::Todo),
        ];
        let open = open_tasks_on(&bucket_by_due_date(&tasks), day);
        assert_eq!(open.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert!(open_tasks_on(&DayBuckets::new(), day).is_empty());
    }
}
