//! 编辑弹窗的表单值
//!
//! 弹窗打开时从任务播种，保存时只发送五个可编辑字段。

use crate::date::{date_key, parse_date_key};
use crate::{Priority, Task, TaskPatch, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskEditForm {
    pub title: String,
    pub description: String,
    /// `<input type="date">` 的原始值，空串表示无截止日期
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl TaskEditForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.map(date_key).unwrap_or_default(),
            priority: task.priority,
            status: task.status,
        }
    }

    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// 转换为局部更新；标题为空时返回 `None`
    ///
    /// 描述与截止日期为空时显式置空。
    pub fn to_patch(&self) -> Option<TaskPatch> {
        if !self.can_save() {
            return None;
        }
        let description = self.description.trim();
        Some(TaskPatch {
            title: Some(self.title.trim().to_string()),
            description: Some((!description.is_empty()).then(|| description.to_string())),
            due_date: Some(parse_date_key(self.due_date.trim())),
            priority: Some(self.priority),
            status: Some(self.status),
        })
    }
}
