//! 浏览器适配层
//!
//! 把共享层的抽象落到浏览器 API 上：
//! - `http`: fetch 传输
//! - `storage`: `localStorage`
//! - `timer`: 防抖计时
//! - `route` / `router`: 路由与守卫

mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::FetchHttpClient;
pub use storage::BrowserStorage;
pub use timer::DebouncedText;

use taskdeck_shared::TaskApi;

/// 应用使用的 API 客户端
pub type Api = TaskApi<FetchHttpClient, BrowserStorage>;
