//! TaskDeck 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `theme`: 启动时创建一次、通过 Context 注入的状态
//! - `components`: UI 组件层
//!
//! 业务计算全部在 `taskdeck-shared` 中，这里只负责把它们接到 DOM 上。

mod auth;
mod components {
    pub mod analytics;
    mod banner;
    pub mod board;
    pub mod calendar;
    mod edit_task_modal;
    mod icons;
    pub mod login;
    pub mod topbar;
}
mod config;
mod theme;
mod web;

use crate::auth::AuthContext;
use crate::components::analytics::AnalyticsPage;
use crate::components::board::BoardPage;
use crate::components::calendar::CalendarPage;
use crate::components::login::LoginPage;
use crate::components::topbar::TopBar;
use crate::theme::ThemeContext;

use leptos::prelude::*;
use taskdeck_shared::{TaskApi, TokenStore};

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};
use web::{Api, BrowserStorage, FetchHttpClient};

/// 受保护页面的外壳：顶栏 + 内容
fn shell(page: AnyView) -> AnyView {
    view! {
        <div class="min-h-screen bg-base-200">
            <TopBar />
            <main class="px-4 md:px-6 py-6">
                <div class="w-full max-w-6xl mx-auto">{page}</div>
            </main>
        </div>
    }
    .into_any()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Board => shell(view! { <BoardPage /> }.into_any()),
        AppRoute::Calendar => shell(view! { <CalendarPage /> }.into_any()),
        AppRoute::Analytics => shell(view! { <AnalyticsPage /> }.into_any()),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link route=AppRoute::Board class="btn btn-primary">"Back to board"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与 API 客户端（唯一实例）
    let config = config::load();
    let api: Api = TaskApi::new(
        &config.api_base_url,
        FetchHttpClient,
        TokenStore::new(BrowserStorage),
    );
    provide_context(config);

    // 2. 认证与主题上下文
    let auth_ctx = AuthContext::new(api);
    provide_context(auth_ctx);
    provide_context(ThemeContext::new(BrowserStorage));

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
