//! 看板逻辑
//!
//! - 按状态分列（稳定划分，保持服务端顺序）
//! - 新建任务草稿的校验
//! - 乐观更新与统一回滚

use crate::{NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus};

/// 每次列表请求的固定页大小
pub const BOARD_PAGE_SIZE: u32 = 50;

// =========================================================
// 分列
// =========================================================

/// 三个状态列
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusBuckets {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl StatusBuckets {
    /// 纯划分：每个任务恰好进入一列，列内顺序与输入一致
    pub fn group(tasks: &[Task]) -> Self {
        let mut buckets = Self::default();
        for task in tasks {
            buckets.column_mut(task.status).push(task.clone());
        }
        buckets
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 卡片上可用的状态按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusActions {
    /// "Start"：仅待办任务
    pub start: bool,
    /// "Done"：所有未完成任务
    pub finish: bool,
}

impl StatusActions {
    pub fn for_status(status: TaskStatus) -> Self {
        Self {
            start: status == TaskStatus::Todo,
            finish: status != TaskStatus::Done,
        }
    }
}

// =========================================================
// 新建任务草稿
// =========================================================

/// 看板顶部的新建表单
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Priority,
}

impl TaskDraft {
    /// 去除首尾空白后标题非空才允许提交
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn to_new_task(&self) -> Option<NewTask> {
        if !self.can_submit() {
            return None;
        }
        Some(NewTask {
            priority: self.priority,
            ..NewTask::new(self.title.trim())
        })
    }

    /// 提交成功后清空标题并恢复默认优先级
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =========================================================
// 本地列表维护
// =========================================================

/// 用服务端返回的权威版本替换本地副本
pub fn replace_task(tasks: &mut [Task], updated: Task) -> bool {
    match tasks.iter_mut().find(|t| t.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_task(tasks: &mut Vec<Task>, id: TaskId) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

// =========================================================
// 乐观更新
// =========================================================

/// 乐观更新的回滚凭据
///
/// 修改前捕获旧任务，同时记下补丁写入后的值。看板与日历共用。
#[derive(Debug, Clone, PartialEq)]
#[must_use = "keep the rollback handle until the server responds"]
pub struct OptimisticPatch {
    previous: Task,
    applied: Task,
}

impl OptimisticPatch {
    /// 对本地列表应用补丁；任务不存在时返回 `None`
    pub fn apply(tasks: &mut [Task], id: TaskId, patch: &TaskPatch) -> Option<Self> {
        let slot = tasks.iter_mut().find(|t| t.id == id)?;
        let previous = slot.clone();
        patch.apply_to(slot);
        Some(Self {
            previous,
            applied: slot.clone(),
        })
    }

    pub fn task_id(&self) -> TaskId {
        self.previous.id
    }

    pub fn previous(&self) -> &Task {
        &self.previous
    }

    /// 恢复旧值
    ///
    /// 只有本地副本仍是本次补丁写入的值时才恢复；任务已被移除，
    /// 或已被后续的更新（服务端响应、另一次乐观补丁）覆盖时返回 `false`。
    pub fn rollback(self, tasks: &mut [Task]) -> bool {
        match tasks.iter_mut().find(|t| t.id == self.previous.id) {
            Some(slot) if *slot == self.applied => {
                *slot = self.previous;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: TaskId, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            description: None,
            due_date: None,
            priority: Priority::Medium,
            status,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn grouping_is_a_stable_partition() {
        let tasks = vec![
            task(1, TaskStatus::Done),
            task(2, TaskStatus::Todo),
            task(3, TaskStatus::InProgress),
            task(4, TaskStatus::Todo),
            task(5, TaskStatus::Done),
        ];
        let buckets = StatusBuckets::group(&tasks);

        let ids = |col: &[Task]| col.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids(&buckets.todo), vec![2, 4]);
        assert_eq!(ids(&buckets.in_progress), vec![3]);
        assert_eq!(ids(&buckets.done), vec![1, 5]);
        assert_eq!(buckets.len(), tasks.len());
        assert!(!buckets.is_empty());
        assert!(StatusBuckets::group(&[]).is_empty());

        let mut union: Vec<TaskId> = TaskStatus::ALL
            .iter()
            .flat_map(|s| ids(buckets.column(*s)))
            .collect();
        union.sort();
        assert_eq!(union, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn draft_requires_trimmed_title_and_resets() {
        let mut draft = TaskDraft {
            title: "   ".into(),
            priority: Priority::Urgent,
        };
        assert!(!draft.can_submit());
        assert_eq!(draft.to_new_task(), None);

        draft.title = "  Buy milk ".into();
        let new_task = draft.to_new_task().unwrap();
        assert_eq!(new_task.title, "Buy milk");
        assert_eq!(new_task.priority, Priority::Urgent);

        draft.reset();
        assert_eq!(draft, TaskDraft::default());
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn optimistic_patch_rolls_back_to_captured_state() {
        let mut tasks = vec![task(1, TaskStatus::Todo), task(2, TaskStatus::InProgress)];
        let handle =
            OptimisticPatch::apply(&mut tasks, 2, &TaskPatch::status(TaskStatus::Done)).unwrap();
        assert_eq!(tasks[1].status, TaskStatus::Done);
        assert_eq!(handle.previous().status, TaskStatus::InProgress);
        assert_eq!(handle.task_id(), 2);

        assert!(handle.rollback(&mut tasks));
        assert_eq!(tasks[1].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn optimistic_patch_on_missing_task_is_noop() {
        let mut tasks = vec![task(1, TaskStatus::Todo)];
        assert!(OptimisticPatch::apply(&mut tasks, 9, &TaskPatch::status(TaskStatus::Done)).is_none());

        let handle =
            OptimisticPatch::apply(&mut tasks, 1, &TaskPatch::status(TaskStatus::Done)).unwrap();
        remove_task(&mut tasks, 1);
        assert!(!handle.rollback(&mut tasks));
        assert!(tasks.is_empty());
    }

    #[test]
    fn stale_rollback_keeps_newer_server_state() {
        let mut tasks = vec![task(1, TaskStatus::Todo)];
        let start =
            OptimisticPatch::apply(&mut tasks, 1, &TaskPatch::status(TaskStatus::InProgress))
                .unwrap();
        let _done =
            OptimisticPatch::apply(&mut tasks, 1, &TaskPatch::status(TaskStatus::Done)).unwrap();

        // 第二次修改先成功返回
        replace_task(&mut tasks, task(1, TaskStatus::Done));

        // 第一次修改随后失败，不能覆盖服务端结果
        assert!(!start.rollback(&mut tasks));
        assert_eq!(tasks[0].status, TaskStatus::Done);
    }

    #[test]
    fn rollback_skips_task_superseded_by_later_patch() {
        let mut tasks = vec![task(1, TaskStatus::Todo)];
        let start =
            OptimisticPatch::apply(&mut tasks, 1, &TaskPatch::status(TaskStatus::InProgress))
                .unwrap();
        let done =
            OptimisticPatch::apply(&mut tasks, 1, &TaskPatch::status(TaskStatus::Done)).unwrap();

        assert!(!start.rollback(&mut tasks));
        assert_eq!(tasks[0].status, TaskStatus::Done);

        assert!(done.rollback(&mut tasks));
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
    }

    #[test]
    fn status_actions_follow_column() {
        assert_eq!(
            StatusActions::for_status(TaskStatus::Todo),
            StatusActions { start: true, finish: true }
        );
        assert_eq!(
            StatusActions::for_status(TaskStatus::InProgress),
            StatusActions { start: false, finish: true }
        );
        assert_eq!(
            StatusActions::for_status(TaskStatus::Done),
            StatusActions { start: false, finish: false }
        );
    }
}
