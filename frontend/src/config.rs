//! 编译期配置
//!
//! WASM 里没有进程环境变量，配置在构建时通过 `option_env!` 写入。

use taskdeck_shared::AppConfig;
use taskdeck_shared::config::{
    ENV_API_URL, ENV_BOARD_PAGE_SIZE, ENV_CALENDAR_PAGE_SIZE, ENV_SEARCH_DEBOUNCE_MS,
};

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        ENV_API_URL => option_env!("TASKDECK_API_URL"),
        ENV_BOARD_PAGE_SIZE => option_env!("TASKDECK_BOARD_PAGE_SIZE"),
        ENV_CALENDAR_PAGE_SIZE => option_env!("TASKDECK_CALENDAR_PAGE_SIZE"),
        ENV_SEARCH_DEBOUNCE_MS => option_env!("TASKDECK_SEARCH_DEBOUNCE_MS"),
        _ => None,
    }
}

/// 读取配置；构建参数非法时回退到默认值
pub fn load() -> AppConfig {
    match AppConfig::from_lookup(|key| build_env(key).map(str::to_string)) {
        Ok(config) => {
            tracing::debug!(api = %config.api_base_url, "configuration loaded");
            config
        }
        Err(e) => {
            tracing::error!(error = %e, "invalid build configuration, falling back to defaults");
            AppConfig::default()
        }
    }
}
