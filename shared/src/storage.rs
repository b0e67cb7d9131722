//! 本地持久化抽象
//!
//! `KeyValueStore` 描述最小的键值存储接口，浏览器里由 `localStorage` 实现，
//! 测试里由 `MemoryStore` 实现。令牌与主题都建立在它之上，
//! 由启动时创建的唯一实例注入各视图。

use crate::{STORAGE_THEME_KEY, STORAGE_TOKENS_KEY, ThemeMode, TokenPair};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// 键值存储接口
pub trait KeyValueStore {
    /// 读取值；键不存在或出错时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    /// 写入值，返回是否成功
    fn set(&self, key: &str, value: &str) -> bool;

    /// 删除键，返回是否成功
    fn remove(&self, key: &str) -> bool;
}

// =========================================================
// 内存实现
// =========================================================

/// 进程内存储，克隆后共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries().insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries().remove(key);
        true
    }
}

// =========================================================
// 令牌存储
// =========================================================

/// 令牌对的持久化，以 JSON 形式保存在 `tm_tokens`
#[derive(Clone)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取令牌对，内容损坏时视为未登录
    pub fn load(&self) -> Option<TokenPair> {
        let raw = self.store.get(STORAGE_TOKENS_KEY)?;
        match serde_json::from_str::<TokenPair>(&raw) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable token record");
                None
            }
        }
    }

    pub fn save(&self, tokens: &TokenPair) -> bool {
        match serde_json::to_string(tokens) {
            Ok(raw) => self.store.set(STORAGE_TOKENS_KEY, &raw),
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode token record");
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        self.store.remove(STORAGE_TOKENS_KEY)
    }

    /// 非空的访问令牌
    pub fn access_token(&self) -> Option<String> {
        self.load()
            .filter(TokenPair::has_access)
            .map(|tokens| tokens.access)
    }

    /// 路由守卫唯一依据：是否存在访问令牌（不检查过期）
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

// =========================================================
// 主题存储
// =========================================================

/// 主题偏好持久化，保存在 `tm_theme`
#[derive(Clone)]
pub struct ThemeStore<S> {
    store: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 已保存的偏好
    pub fn saved(&self) -> Option<ThemeMode> {
        self.store
            .get(STORAGE_THEME_KEY)
            .and_then(|raw| ThemeMode::parse(raw.trim()))
    }

    /// 读取主题；未保存时跟随系统偏好
    pub fn load(&self, system_prefers_dark: bool) -> ThemeMode {
        self.saved().unwrap_or(if system_prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }

    pub fn save(&self, mode: ThemeMode) -> bool {
        self.store.set(STORAGE_THEME_KEY, mode.as_str())
    }

    /// 切换并保存，返回新主题
    pub fn toggle(&self, current: ThemeMode) -> ThemeMode {
        let next = current.toggled();
        self.save(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_and_clear() {
        let store = MemoryStore::new();
        let tokens = TokenStore::new(store.clone());
        assert!(!tokens.is_authenticated());

        tokens.save(&TokenPair::new("abc", Some("r1".into())));
        assert_eq!(
            tokens.load(),
            Some(TokenPair::new("abc", Some("r1".into())))
        );
        assert_eq!(tokens.access_token().as_deref(), Some("abc"));
        assert!(store.get(STORAGE_TOKENS_KEY).is_some());

        tokens.clear();
        assert!(!tokens.is_authenticated());
        assert_eq!(store.get(STORAGE_TOKENS_KEY), None);
    }

    #[test]
    fn corrupt_or_empty_tokens_are_not_authenticated() {
        let store = MemoryStore::new();
        let tokens = TokenStore::new(store.clone());

        store.set(STORAGE_TOKENS_KEY, "{not json");
        assert!(!tokens.is_authenticated());

        store.set(STORAGE_TOKENS_KEY, r#"{"access":""}"#);
        assert!(!tokens.is_authenticated());

        store.set(STORAGE_TOKENS_KEY, r#"{"access":"x"}"#);
        assert!(tokens.is_authenticated());
    }

    #[test]
    fn theme_prefers_saved_value_over_system() {
        let store = MemoryStore::new();
        let theme = ThemeStore::new(store.clone());

        assert_eq!(theme.load(true), ThemeMode::Dark);
        assert_eq!(theme.load(false), ThemeMode::Light);

        theme.save(ThemeMode::Light);
        assert_eq!(theme.load(true), ThemeMode::Light);

        assert_eq!(theme.toggle(ThemeMode::Light), ThemeMode::Dark);
        assert_eq!(store.get(STORAGE_THEME_KEY).as_deref(), Some("dark"));

        store.set(STORAGE_THEME_KEY, "sepia");
        assert_eq!(theme.load(false), ThemeMode::Light);
    }
}
