//! 主题模块
//!
//! 偏好保存在 `tm_theme`，未保存时跟随系统配色；
//! 生效方式是切换 `<html>` 上的 `dark` 类。

use crate::web::BrowserStorage;
use leptos::prelude::*;
use taskdeck_shared::{ThemeMode, ThemeStore};

const DARK_CLASS: &str = "dark";

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// 把主题写到文档根节点
fn apply(mode: ThemeMode) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let class_list = root.class_list();
    let result = if mode.is_dark() {
        class_list.add_1(DARK_CLASS)
    } else {
        class_list.remove_1(DARK_CLASS)
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, "failed to apply theme class");
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    mode: RwSignal<ThemeMode>,
    store: StoredValue<ThemeStore<BrowserStorage>>,
}

impl ThemeContext {
    /// 读取偏好并立即应用
    pub fn new(storage: BrowserStorage) -> Self {
        let store = ThemeStore::new(storage);
        let mode = store.load(system_prefers_dark());
        apply(mode);
        Self {
            mode: RwSignal::new(mode),
            store: StoredValue::new(store),
        }
    }

    pub fn mode(&self) -> Signal<ThemeMode> {
        self.mode.into()
    }

    pub fn toggle(&self) {
        let current = self.mode.get_untracked();
        let next = self.store.with_value(|store| store.toggle(current));
        apply(next);
        tracing::debug!(theme = next.as_str(), "theme toggled");
        self.mode.set(next);
    }
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext should be provided")
}
