//! `localStorage` 上的 `KeyValueStore`
//!
//! 写入失败（隐私模式、配额用尽）只记录日志，不影响界面。

use gloo_storage::{LocalStorage, Storage};
use taskdeck_shared::KeyValueStore;

/// 浏览器本地存储
///
/// 零大小类型，可以放进任何 Context。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match LocalStorage::raw().set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = ?e, "localStorage write failed");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        LocalStorage::delete(key);
        true
    }
}
