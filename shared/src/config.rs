//! 运行时配置
//!
//! 前端在编译期从环境变量读取，未设置时使用默认值。

use crate::board::BOARD_PAGE_SIZE;
use crate::calendar::CALENDAR_PAGE_SIZE;
use crate::debounce::SEARCH_DEBOUNCE;
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_URL: &str = "TASKDECK_API_URL";
pub const ENV_BOARD_PAGE_SIZE: &str = "TASKDECK_BOARD_PAGE_SIZE";
pub const ENV_CALENDAR_PAGE_SIZE: &str = "TASKDECK_CALENDAR_PAGE_SIZE";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "TASKDECK_SEARCH_DEBOUNCE_MS";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
/// 服务端允许的最大页大小
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be between 1 and 100, got {value}")]
    PageSizeOutOfRange { key: &'static str, value: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// API 根地址，不带结尾 `/`
    pub api_base_url: String,
    pub board_page_size: u32,
    pub calendar_page_size: u32,
    pub search_debounce: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            board_page_size: BOARD_PAGE_SIZE,
            calendar_page_size: CALENDAR_PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }
}

impl AppConfig {
    /// 通过查找函数构造配置，读不到的键使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = read(ENV_API_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let board_page_size = match read(ENV_BOARD_PAGE_SIZE) {
            Some(raw) => page_size(ENV_BOARD_PAGE_SIZE, &raw)?,
            None => defaults.board_page_size,
        };
        let calendar_page_size = match read(ENV_CALENDAR_PAGE_SIZE) {
            Some(raw) => page_size(ENV_CALENDAR_PAGE_SIZE, &raw)?,
            None => defaults.calendar_page_size,
        };
        let search_debounce = match read(ENV_SEARCH_DEBOUNCE_MS) {
            Some(raw) => Duration::from_millis(number(ENV_SEARCH_DEBOUNCE_MS, &raw)?),
            None => defaults.search_debounce,
        };

        Ok(Self {
            api_base_url,
            board_page_size,
            calendar_page_size,
            search_debounce,
        })
    }
}

fn number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

fn page_size(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let value = u32::try_from(number(key, raw)?).unwrap_or(u32::MAX);
    if (1..=MAX_PAGE_SIZE).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::PageSizeOutOfRange { key, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.board_page_size, 50);
        assert_eq!(config.calendar_page_size, 100);
        assert_eq!(config.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn overrides_are_parsed_and_trimmed() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://tasks.example.com/"),
            (ENV_BOARD_PAGE_SIZE, "20"),
            (ENV_SEARCH_DEBOUNCE_MS, "150"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://tasks.example.com");
        assert_eq!(config.board_page_size, 20);
        assert_eq!(config.search_debounce, Duration::from_millis(150));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(ENV_CALENDAR_PAGE_SIZE, "500")])),
            Err(ConfigError::PageSizeOutOfRange {
                key: ENV_CALENDAR_PAGE_SIZE,
                value: 500
            })
        );
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(ENV_SEARCH_DEBOUNCE_MS, "soon")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
