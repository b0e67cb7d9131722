//! 定时器封装模块
//!
//! 用 `gloo-timers` 的 `Timeout` 驱动共享层的 `Debouncer`：
//! 每次输入登记一张票据并启动一个计时器，计时器到期时只有最新票据能提交。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::time::Duration;
use taskdeck_shared::debounce::Debouncer;

/// 文本输入防抖
#[derive(Clone, Copy)]
pub struct DebouncedText {
    state: StoredValue<Debouncer<String>>,
}

impl DebouncedText {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: StoredValue::new(Debouncer::new(delay)),
        }
    }

    /// 登记一次输入；静默 `delay` 之后以最新值调用 `commit`
    pub fn push<F>(&self, value: String, commit: F)
    where
        F: FnOnce(String) + 'static,
    {
        let Some((ticket, delay)) = self
            .state
            .try_update_value(|d| (d.push(value), d.delay()))
        else {
            return;
        };

        let state = self.state;
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            if let Some(value) = state.try_update_value(|d| d.settle(ticket)).flatten() {
                commit(value);
            }
        })
        .forget();
    }

    pub fn is_pending(&self) -> bool {
        self.state.with_value(Debouncer::is_pending)
    }

    /// 作废尚未到期的输入
    pub fn cancel(&self) {
        self.state.update_value(Debouncer::cancel);
    }
}
