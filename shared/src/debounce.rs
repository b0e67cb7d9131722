//! 防抖状态机
//!
//! 每次输入都会作废之前的票据；计时器到期时只有最新票据能提交。
//! 计时本身由调用方负责（浏览器里是 `setTimeout`），这里只做裁决。

use std::time::Duration;

/// 看板搜索框的防抖间隔
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// 一次输入对应的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 记录一次输入，之前的票据全部失效
    pub fn push(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// 计时器到期：票据仍是最新时取出待提交的值
    pub fn settle(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// 放弃待提交的值（例如清空筛选）
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
