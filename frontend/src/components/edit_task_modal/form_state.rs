//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 从任务播种
//! - 与共享层 `TaskEditForm` 之间的转换

use leptos::prelude::*;
use taskdeck_shared::edit::TaskEditForm;
use taskdeck_shared::{Priority, Task, TaskPatch, TaskStatus};

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub due_date: RwSignal<String>,
    pub priority: RwSignal<Priority>,
    pub status: RwSignal<TaskStatus>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            due_date: RwSignal::new(String::new()),
            priority: RwSignal::new(Priority::default()),
            status: RwSignal::new(TaskStatus::default()),
        }
    }

    /// 用任务当前值填充各字段
    pub fn seed(&self, task: &Task) {
        let form = TaskEditForm::from_task(task);
        self.title.set(form.title);
        self.description.set(form.description);
        self.due_date.set(form.due_date);
        self.priority.set(form.priority);
        self.status.set(form.status);
    }

    fn snapshot(&self) -> TaskEditForm {
        TaskEditForm {
            title: self.title.get(),
            description: self.description.get(),
            due_date: self.due_date.get(),
            priority: self.priority.get(),
            status: self.status.get(),
        }
    }

    /// 响应式：标题非空才允许保存
    pub fn can_save(&self) -> bool {
        self.title.with(|t| !t.trim().is_empty())
    }

    pub fn to_patch(&self) -> Option<TaskPatch> {
        self.snapshot().to_patch()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
